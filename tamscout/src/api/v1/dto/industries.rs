//! Industry catalogue DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use crate::models;

/// Request body for `POST /v1/industries`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndustryRequest {
    /// Lookup key, stored lowercase (e.g. `"pest-control"`).
    pub name: String,
    /// Display name. Defaults to `name`.
    pub label: Option<String>,
    /// Base keywords combined with each city.
    pub keywords: Vec<String>,
}

/// Request body for `PATCH /v1/industries/{industryId}`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndustryRequest {
    pub label: Option<String>,
    /// Replaces the whole keyword list.
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndustryResponse {
    pub industry_id: String,
    pub name: String,
    pub label: String,
    pub keywords: Vec<String>,
}

impl From<models::Industry> for IndustryResponse {
    fn from(industry: models::Industry) -> Self {
        Self {
            industry_id: industry.id,
            name: industry.name,
            label: industry.label,
            keywords: industry.keywords,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ListIndustriesResponse {
    pub industries: Vec<IndustryResponse>,
}
