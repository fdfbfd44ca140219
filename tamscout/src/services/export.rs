use crate::error::{Result, ScoutError};
use crate::models::ResearchRecord;

pub const CSV_HEADERS: [&str; 4] = ["keyword", "searchVolume", "cpc", "ppcBudget"];

/// Renders research results as a CSV report, one row per phrase in stored order.
pub fn render_csv(record: &ResearchRecord) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for result in &record.results {
        writer.write_record([
            result.keyword.clone(),
            result.search_volume.to_string(),
            format!("{:.2}", result.cpc),
            result.ppc_budget().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScoutError::Internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ScoutError::Internal(format!("CSV encoding: {e}")))
}

pub fn export_filename(record: &ResearchRecord) -> String {
    format!("keyword-research-{}.csv", record.id)
}
