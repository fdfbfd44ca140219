//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint (except the CSV export) returns an [`ApiResponse<T>`]
//! envelope with three optional top-level fields:
//!
//! ```json
//! {
//!   "data": { ... },              // present on success, absent on error
//!   "meta": { "total": 42 },      // optional list metadata
//!   "error": { "code": "not_found", "message": "..." }  // present on error only
//! }
//! ```
//!
//! ## ID Formats
//!
//! - **researchId**: nanoid, 21 characters (e.g. `"V1StGXR8_Z5jdHi6B-myT"`)
//! - **industryId**: seeded industries use `ind_<name>`, created ones a nanoid

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderFailure, ScoutError};

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed request, empty keyword/city list, or failed validation. HTTP 400.
    InvalidRequest,
    /// No keyword provider API key is configured. HTTP 400.
    MissingCredential,
    /// The requested resource does not exist. HTTP 404.
    NotFound,
    /// The provider rejected the API key. HTTP 502.
    ProviderUnauthorized,
    /// The provider account is out of credits or forbidden. HTTP 502.
    ProviderInsufficientCredit,
    /// The provider is throttling requests. HTTP 429.
    ProviderRateLimited,
    /// Any other provider failure. HTTP 502.
    ProviderError,
    /// The provider returned implausible volumes and the run was aborted. HTTP 502.
    SuspiciousData,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
}

impl ErrorCode {
    /// Returns the HTTP status code corresponding to this error code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::MissingCredential => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ProviderRateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ProviderUnauthorized
            | Self::ProviderInsufficientCredit
            | Self::ProviderError
            | Self::SuspiciousData => StatusCode::BAD_GATEWAY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::MissingCredential => write!(f, "missing_credential"),
            Self::NotFound => write!(f, "not_found"),
            Self::ProviderUnauthorized => write!(f, "provider_unauthorized"),
            Self::ProviderInsufficientCredit => write!(f, "provider_insufficient_credit"),
            Self::ProviderRateLimited => write!(f, "provider_rate_limited"),
            Self::ProviderError => write!(f, "provider_error"),
            Self::SuspiciousData => write!(f, "suspicious_data"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

impl From<ProviderFailure> for ErrorCode {
    fn from(reason: ProviderFailure) -> Self {
        match reason {
            ProviderFailure::Unauthorized => Self::ProviderUnauthorized,
            ProviderFailure::InsufficientCredit => Self::ProviderInsufficientCredit,
            ProviderFailure::RateLimited => Self::ProviderRateLimited,
            ProviderFailure::Other => Self::ProviderError,
        }
    }
}

/// Structured error payload within the API envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable description safe to display to end users.
    pub message: String,
}

/// List metadata.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Number of items in `data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Canonical v1 API response envelope.
///
/// On success, `data` is present and `error` is absent. On error, `error`
/// is present and `data` is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Success response with list metadata (HTTP 200).
    pub fn success_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Resource created response (HTTP 201).
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::CREATED,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            meta: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<ScoutError> for ApiResponse<T> {
    /// Convert a [`ScoutError`] into a v1 [`ApiResponse`].
    ///
    /// Internal error details are **never** leaked to the client. For
    /// `internal_error` responses, a generic message is returned and the
    /// real error is logged via `tracing::error!`.
    fn from(err: ScoutError) -> Self {
        match err {
            ScoutError::InvalidInput(ref msg) | ScoutError::Validation(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            ScoutError::MissingCredential => {
                ApiResponse::error(ErrorCode::MissingCredential, err.to_string())
            }

            ScoutError::NotFound(ref msg) => ApiResponse::error(ErrorCode::NotFound, msg.clone()),

            ScoutError::Provider { reason, .. } => {
                tracing::warn!(error = %err, "Keyword provider error mapped to v1 response");
                ApiResponse::error(reason.into(), err.to_string())
            }

            ScoutError::SuspiciousData { .. } => {
                ApiResponse::error(ErrorCode::SuspiciousData, err.to_string())
            }

            ref internal @ (ScoutError::Database(_)
            | ScoutError::Http(_)
            | ScoutError::Json(_)
            | ScoutError::Csv(_)
            | ScoutError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}
