//! Research request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models;
use crate::services::{TamEstimate, TierTotals};

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/research`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResearchRequest {
    /// Industry name, e.g. `"hvac"` (case-insensitive).
    pub industry: String,
    /// City names; blanks are dropped and repeats collapsed.
    pub cities: Vec<String>,
    /// Optional display title for the history list.
    pub title: Option<String>,
}

/// Request body for `PATCH /v1/research/{researchId}`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResearchRequest {
    /// New title. `null` or blank clears it.
    pub title: Option<String>,
}

/// Query parameters for `GET /v1/research`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListResearchQuery {
    /// Only runs for this industry.
    pub industry: Option<String>,
    /// Maximum results (default 20, max 100).
    pub limit: Option<u32>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub enum OpportunityTier {
    High,
    Medium,
    Low,
}

impl From<models::Opportunity> for OpportunityTier {
    fn from(opportunity: models::Opportunity) -> Self {
        match opportunity {
            models::Opportunity::High => Self::High,
            models::Opportunity::Medium => Self::Medium,
            models::Opportunity::Low => Self::Low,
        }
    }
}

/// One scored phrase.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordResultResponse {
    pub keyword: String,
    /// Monthly searches.
    pub search_volume: u64,
    /// Cost per click in the provider currency, two decimals.
    pub cpc: f64,
    /// Competition percentage, 0-100.
    pub competition: u8,
    pub opportunity: OpportunityTier,
    /// `round(searchVolume * cpc * 0.30)`.
    pub ppc_budget: u64,
}

impl From<models::KeywordResult> for KeywordResultResponse {
    fn from(result: models::KeywordResult) -> Self {
        Self {
            ppc_budget: result.ppc_budget(),
            keyword: result.keyword,
            search_volume: result.search_volume,
            cpc: result.cpc,
            competition: result.competition,
            opportunity: result.opportunity.into(),
        }
    }
}

/// Full research run including every scored phrase.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResponse {
    pub research_id: String,
    pub title: Option<String>,
    pub industry: String,
    pub cities: Vec<String>,
    /// Provider that supplied the metrics.
    pub source: String,
    pub keyword_count: u32,
    pub results: Vec<KeywordResultResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<models::ResearchRecord> for ResearchResponse {
    fn from(record: models::ResearchRecord) -> Self {
        Self {
            research_id: record.id,
            title: record.title,
            industry: record.industry,
            cities: record.cities,
            source: record.source,
            keyword_count: record.results.len() as u32,
            results: record.results.into_iter().map(Into::into).collect(),
            created_at: record.created_at,
        }
    }
}

/// History entry without the result payload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSummaryResponse {
    pub research_id: String,
    pub title: Option<String>,
    pub industry: String,
    pub city_count: u32,
    pub keyword_count: u32,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::ResearchSummary> for ResearchSummaryResponse {
    fn from(summary: models::ResearchSummary) -> Self {
        Self {
            research_id: summary.id,
            title: summary.title,
            industry: summary.industry,
            city_count: summary.city_count,
            keyword_count: summary.keyword_count,
            source: summary.source,
            created_at: summary.created_at,
        }
    }
}

/// Response body for `GET /v1/research`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResearchResponse {
    pub research: Vec<ResearchSummaryResponse>,
}

#[derive(Debug, Clone, Copy, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierTotalsResponse {
    pub phrases: u32,
    pub search_volume: u64,
}

impl From<TierTotals> for TierTotalsResponse {
    fn from(totals: TierTotals) -> Self {
        Self {
            phrases: totals.phrases,
            search_volume: totals.search_volume,
        }
    }
}

/// Funnel assumptions used for the estimate.
#[derive(Debug, Clone, Copy, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TamAssumptionsResponse {
    pub click_through_rate: f64,
    pub lead_conversion_rate: f64,
    pub close_rate: f64,
    pub average_ticket: f64,
}

/// Response body for `GET /v1/research/{researchId}/tam`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TamEstimateResponse {
    pub research_id: String,
    pub industry: String,
    pub keyword_count: u32,
    pub monthly_search_volume: u64,
    pub high: TierTotalsResponse,
    pub medium: TierTotalsResponse,
    pub low: TierTotalsResponse,
    pub monthly_clicks: f64,
    pub monthly_leads: f64,
    pub monthly_jobs: f64,
    pub annual_revenue: f64,
    pub monthly_ppc_budget: u64,
    pub assumptions: TamAssumptionsResponse,
}

impl From<TamEstimate> for TamEstimateResponse {
    fn from(estimate: TamEstimate) -> Self {
        let a = estimate.assumptions;
        Self {
            research_id: estimate.research_id,
            industry: estimate.industry,
            keyword_count: estimate.keyword_count,
            monthly_search_volume: estimate.monthly_search_volume,
            high: estimate.tiers.high.into(),
            medium: estimate.tiers.medium.into(),
            low: estimate.tiers.low.into(),
            monthly_clicks: estimate.monthly_clicks,
            monthly_leads: estimate.monthly_leads,
            monthly_jobs: estimate.monthly_jobs,
            annual_revenue: estimate.annual_revenue,
            monthly_ppc_budget: estimate.monthly_ppc_budget,
            assumptions: TamAssumptionsResponse {
                click_through_rate: a.click_through_rate,
                lead_conversion_rate: a.lead_conversion_rate,
                close_rate: a.close_rate,
                average_ticket: a.average_ticket,
            },
        }
    }
}
