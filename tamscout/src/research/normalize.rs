use crate::models::{CpcField, NormalizedMetric, RawMetric, VolumeField};

/// Turns provider records into canonical metrics. Never fails: anything
/// missing or malformed becomes zero.
pub struct MetricsNormalizer;

impl MetricsNormalizer {
    pub fn normalize(raw: Option<&RawMetric>) -> NormalizedMetric {
        let Some(raw) = raw else {
            return NormalizedMetric::default();
        };

        let volume = match raw.volume_field() {
            VolumeField::Vol(v) | VolumeField::Volume(v) => non_negative_round(v),
            VolumeField::Missing => 0,
        };

        let cpc = match raw.cpc_field() {
            CpcField::Bare(v) | CpcField::Nested(v) => round_cents(v),
            CpcField::Missing => 0.0,
        };

        // Zero-volume phrases carry zero competition regardless of what the provider says.
        let competition = if volume == 0 {
            0
        } else {
            raw.competition_value().map(competition_percent).unwrap_or(0)
        };

        NormalizedMetric {
            volume,
            cpc,
            competition,
        }
    }
}

fn non_negative_round(value: f64) -> u64 {
    if value <= 0.0 {
        0
    } else {
        value.round() as u64
    }
}

fn round_cents(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        (value * 100.0).round() / 100.0
    }
}

/// `[0, 1]` is a ratio and is scaled; `(1, 100]` is already a percentage.
fn competition_percent(value: f64) -> u8 {
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    percent.round().clamp(0.0, 100.0) as u8
}
