//! Provider API key settings DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use crate::models::CredentialCheck;
use crate::services::{CredentialSource, CredentialStatus};

/// Request body for `PUT /v1/settings/api-key`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// Request body for `POST /v1/settings/api-key:test`.
///
/// Without `apiKey` the currently active key is tested.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestApiKeyRequest {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeySource {
    Environment,
    Settings,
}

impl From<CredentialSource> for ApiKeySource {
    fn from(source: CredentialSource) -> Self {
        match source {
            CredentialSource::Environment => Self::Environment,
            CredentialSource::Settings => Self::Settings,
        }
    }
}

/// The active key is only ever shown masked.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyStatusResponse {
    pub configured: bool,
    pub source: Option<ApiKeySource>,
    /// e.g. `"********c0de"`.
    pub masked_key: Option<String>,
}

impl From<CredentialStatus> for ApiKeyStatusResponse {
    fn from(status: CredentialStatus) -> Self {
        Self {
            configured: status.configured,
            source: status.source.map(Into::into),
            masked_key: status.masked_key,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyTestResponse {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_remaining: Option<f64>,
}

impl From<CredentialCheck> for ApiKeyTestResponse {
    fn from(check: CredentialCheck) -> Self {
        Self {
            valid: check.valid,
            message: check.message,
            credits_remaining: check.credits_remaining,
        }
    }
}
