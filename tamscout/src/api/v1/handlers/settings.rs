use axum::extract::State;

use crate::api::state::AppState;
use crate::api::v1::dto::{
    ApiKeyStatusResponse, ApiKeyTestResponse, SetApiKeyRequest, TestApiKeyRequest,
};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppJson;

/// `GET /api/v1/settings/api-key`
#[utoipa::path(
    get,
    path = "/api/v1/settings/api-key",
    tag = "settings",
    operation_id = "settings.apiKey.get",
    responses(
        (status = 200, description = "Active key status (masked)", body = ApiKeyStatusResponse),
    )
)]
pub async fn get_api_key(State(state): State<AppState>) -> ApiResponse<ApiKeyStatusResponse> {
    match state.credentials.status().await {
        Ok(status) => ApiResponse::success(status.into()),
        Err(e) => e.into(),
    }
}

/// `PUT /api/v1/settings/api-key`
///
/// Stores a provider key. `KEYWORDS_API_KEY` in the environment still wins.
#[utoipa::path(
    put,
    path = "/api/v1/settings/api-key",
    tag = "settings",
    operation_id = "settings.apiKey.set",
    request_body = SetApiKeyRequest,
    responses(
        (status = 200, description = "Key stored", body = ApiKeyStatusResponse),
        (status = 400, description = "Blank key", body = ApiError),
    )
)]
pub async fn set_api_key(
    State(state): State<AppState>,
    AppJson(req): AppJson<SetApiKeyRequest>,
) -> ApiResponse<ApiKeyStatusResponse> {
    match state.credentials.store(&req.api_key).await {
        Ok(status) => {
            tracing::info!("Provider API key stored in settings");
            ApiResponse::success(status.into())
        }
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/settings/api-key`
#[utoipa::path(
    delete,
    path = "/api/v1/settings/api-key",
    tag = "settings",
    operation_id = "settings.apiKey.delete",
    responses(
        (status = 200, description = "Stored key removed", body = ApiKeyStatusResponse),
    )
)]
pub async fn delete_api_key(State(state): State<AppState>) -> ApiResponse<ApiKeyStatusResponse> {
    if let Err(e) = state.credentials.clear().await {
        return e.into();
    }
    match state.credentials.status().await {
        Ok(status) => ApiResponse::success(status.into()),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/settings/api-key:test`
///
/// Sends a one-phrase request to the provider with the given key (or the
/// active one) and reports whether it was accepted.
#[utoipa::path(
    post,
    path = "/api/v1/settings/api-key:test",
    tag = "settings",
    operation_id = "settings.apiKey.test",
    request_body = TestApiKeyRequest,
    responses(
        (status = 200, description = "Probe result", body = ApiKeyTestResponse),
        (status = 400, description = "No key to test", body = ApiError),
    )
)]
pub async fn test_api_key(
    State(state): State<AppState>,
    AppJson(req): AppJson<TestApiKeyRequest>,
) -> ApiResponse<ApiKeyTestResponse> {
    let key = match req.api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => match state.credentials.resolve().await {
            Ok(key) => key,
            Err(e) => return e.into(),
        },
    };

    let check = state.pipeline.fetcher().test_credential(&key).await;
    tracing::info!(valid = check.valid, "Provider API key tested");
    ApiResponse::success(check.into())
}
