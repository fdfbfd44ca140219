use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A generated search query such as `"AC repair Boise"`. Identity is the literal string.
pub type Phrase = String;

/// One provider record before normalization.
///
/// Every metric field is kept as raw JSON so a single malformed record can
/// never fail decoding of the whole batch response. Use [`RawMetric::volume_field`]
/// and [`RawMetric::cpc_field`] to read the accepted shapes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMetric {
    #[serde(default)]
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vol: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpc: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<Value>,
}

/// Search volume as reported under one of the two accepted field names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeField {
    Vol(f64),
    Volume(f64),
    Missing,
}

/// Cost-per-click as either a bare number or `{ "value": ... }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CpcField {
    Bare(f64),
    Nested(f64),
    Missing,
}

impl RawMetric {
    /// `vol` wins over `volume` when both are numeric.
    pub fn volume_field(&self) -> VolumeField {
        if let Some(v) = self.vol.as_ref().and_then(finite_number) {
            return VolumeField::Vol(v);
        }
        if let Some(v) = self.volume.as_ref().and_then(finite_number) {
            return VolumeField::Volume(v);
        }
        VolumeField::Missing
    }

    pub fn cpc_field(&self) -> CpcField {
        match self.cpc.as_ref() {
            Some(value @ Value::Number(_)) => match finite_number(value) {
                Some(v) => CpcField::Bare(v),
                None => CpcField::Missing,
            },
            Some(Value::Object(map)) => match map.get("value").and_then(numeric_or_text) {
                Some(v) => CpcField::Nested(v),
                None => CpcField::Missing,
            },
            _ => CpcField::Missing,
        }
    }

    pub fn competition_value(&self) -> Option<f64> {
        self.competition.as_ref().and_then(finite_number)
    }
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

/// Nested CPC values are sometimes sent as strings (`"4.50"`).
fn numeric_or_text(value: &Value) -> Option<f64> {
    match value {
        Value::Number(_) => finite_number(value),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Canonical metric triple. `volume == 0` always implies `competition == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedMetric {
    pub volume: u64,
    pub cpc: f64,
    pub competition: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opportunity {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Opportunity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordResult {
    pub keyword: Phrase,
    pub search_volume: u64,
    pub cpc: f64,
    pub competition: u8,
    pub opportunity: Opportunity,
}

impl KeywordResult {
    /// Suggested monthly PPC spend: `round(searchVolume * cpc * 0.30)`.
    pub fn ppc_budget(&self) -> u64 {
        (self.search_volume as f64 * self.cpc * PPC_BUDGET_SHARE).round() as u64
    }
}

pub const PPC_BUDGET_SHARE: f64 = 0.30;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMetric {
        serde_json::from_value(value).expect("raw metric")
    }

    #[test]
    fn volume_prefers_vol_over_volume() {
        let metric = raw(json!({"keyword": "a", "vol": 10, "volume": 20}));
        assert_eq!(metric.volume_field(), VolumeField::Vol(10.0));
    }

    #[test]
    fn volume_falls_back_when_vol_not_numeric() {
        let metric = raw(json!({"keyword": "a", "vol": "n/a", "volume": 20}));
        assert_eq!(metric.volume_field(), VolumeField::Volume(20.0));
    }

    #[test]
    fn cpc_shapes() {
        assert_eq!(
            raw(json!({"cpc": 4.5})).cpc_field(),
            CpcField::Bare(4.5)
        );
        assert_eq!(
            raw(json!({"cpc": {"currency": "$", "value": "3.25"}})).cpc_field(),
            CpcField::Nested(3.25)
        );
        assert_eq!(
            raw(json!({"cpc": {"value": null}})).cpc_field(),
            CpcField::Missing
        );
        assert_eq!(raw(json!({"cpc": "4.5"})).cpc_field(), CpcField::Missing);
        assert_eq!(raw(json!({})).cpc_field(), CpcField::Missing);
    }

    #[test]
    fn missing_keyword_still_decodes() {
        let metric = raw(json!({"vol": 5}));
        assert_eq!(metric.keyword, "");
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = KeywordResult {
            keyword: "AC repair Boise".into(),
            search_volume: 120,
            cpc: 4.5,
            competition: 55,
            opportunity: Opportunity::Medium,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["searchVolume"], 120);
        assert_eq!(json["opportunity"], "Medium");
    }

    #[test]
    fn ppc_budget_rounds() {
        let result = KeywordResult {
            keyword: "x".into(),
            search_volume: 120,
            cpc: 4.5,
            competition: 55,
            opportunity: Opportunity::Medium,
        };
        assert_eq!(result.ppc_budget(), 162);
    }
}
