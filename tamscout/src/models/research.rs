use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::KeywordResult;

/// The stored output of one research run. Only `title` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRecord {
    pub id: String,
    pub title: Option<String>,
    pub industry: String,
    pub cities: Vec<String>,
    pub results: Vec<KeywordResult>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl ResearchRecord {
    pub fn summary(&self) -> ResearchSummary {
        ResearchSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            industry: self.industry.clone(),
            city_count: self.cities.len() as u32,
            keyword_count: self.results.len() as u32,
            source: self.source.clone(),
            created_at: self.created_at,
        }
    }
}

/// History listing entry without the result payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSummary {
    pub id: String,
    pub title: Option<String>,
    pub industry: String,
    pub city_count: u32,
    pub keyword_count: u32,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ListResearchRequest {
    pub industry: Option<String>,
    pub limit: Option<u32>,
}

/// Outcome of probing a provider API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCheck {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_remaining: Option<f64>,
}
