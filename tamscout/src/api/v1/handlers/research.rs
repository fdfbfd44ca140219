use axum::extract::{Path, State};
use axum_extra::extract::Query;

use crate::api::state::AppState;
use crate::api::v1::dto::{
    CreateResearchRequest, ListResearchQuery, ListResearchResponse, ResearchResponse,
    TamEstimateResponse, UpdateResearchRequest,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppJson;
use crate::error::ScoutError;
use crate::models::ListResearchRequest;

/// `POST /api/v1/research`
///
/// Runs the full pipeline synchronously: phrase generation, batched metric
/// lookups, scoring, storage. Nothing is stored when any step fails.
#[utoipa::path(
    post,
    path = "/api/v1/research",
    tag = "research",
    operation_id = "research.create",
    request_body = CreateResearchRequest,
    responses(
        (status = 201, description = "Research completed and stored", body = ResearchResponse),
        (status = 400, description = "No keywords, no cities, or no API key", body = ApiError),
        (status = 404, description = "Unknown industry", body = ApiError),
        (status = 429, description = "Provider rate limit", body = ApiError),
        (status = 502, description = "Provider failure or implausible data", body = ApiError),
    )
)]
pub async fn create_research(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateResearchRequest>,
) -> ApiResponse<ResearchResponse> {
    let industry = match state.db.get_industry_by_name(&req.industry).await {
        Ok(Some(industry)) => industry,
        Ok(None) => {
            return ApiResponse::error(
                ErrorCode::NotFound,
                format!("Industry '{}' not found", req.industry.trim()),
            )
        }
        Err(e) => return e.into(),
    };

    let cities: Vec<String> = req
        .cities
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    // An absent key is reported by the pipeline, after input validation.
    let credential = match state.credentials.resolve().await {
        Ok(key) => key,
        Err(ScoutError::MissingCredential) => String::new(),
        Err(e) => return e.into(),
    };

    match state
        .pipeline
        .run_titled(&industry, &cities, &credential, req.title)
        .await
    {
        Ok(record) => ApiResponse::created(record.into()),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/research`
///
/// Research history, newest first, without result rows.
#[utoipa::path(
    get,
    path = "/api/v1/research",
    tag = "research",
    operation_id = "research.list",
    params(ListResearchQuery),
    responses(
        (status = 200, description = "Research listed", body = ListResearchResponse),
    )
)]
pub async fn list_research(
    State(state): State<AppState>,
    Query(query): Query<ListResearchQuery>,
) -> ApiResponse<ListResearchResponse> {
    let req = ListResearchRequest {
        industry: query
            .industry
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty()),
        limit: query.limit,
    };

    match state.db.list_research(&req).await {
        Ok(summaries) => {
            let total = summaries.len() as u64;
            ApiResponse::success_with_meta(
                ListResearchResponse {
                    research: summaries.into_iter().map(Into::into).collect(),
                },
                ResponseMeta { total: Some(total) },
            )
        }
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/research/{researchId}`
#[utoipa::path(
    get,
    path = "/api/v1/research/{researchId}",
    tag = "research",
    operation_id = "research.get",
    params(("researchId" = String, Path, description = "Research ID")),
    responses(
        (status = 200, description = "Research found", body = ResearchResponse),
        (status = 404, description = "Research not found", body = ApiError),
    )
)]
pub async fn get_research(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<ResearchResponse> {
    match state.db.get_research(&id).await {
        Ok(Some(record)) => ApiResponse::success(record.into()),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, format!("Research {id} not found")),
        Err(e) => e.into(),
    }
}

/// `PATCH /api/v1/research/{researchId}`
///
/// Renames a run. The title is the only mutable field.
#[utoipa::path(
    patch,
    path = "/api/v1/research/{researchId}",
    tag = "research",
    operation_id = "research.update",
    params(("researchId" = String, Path, description = "Research ID")),
    request_body = UpdateResearchRequest,
    responses(
        (status = 200, description = "Research renamed", body = ResearchResponse),
        (status = 404, description = "Research not found", body = ApiError),
    )
)]
pub async fn update_research(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateResearchRequest>,
) -> ApiResponse<ResearchResponse> {
    let title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match state.db.update_research_title(&id, title).await {
        Ok(true) => {}
        Ok(false) => {
            return ApiResponse::error(ErrorCode::NotFound, format!("Research {id} not found"))
        }
        Err(e) => return e.into(),
    }

    match state.db.get_research(&id).await {
        Ok(Some(record)) => ApiResponse::success(record.into()),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, format!("Research {id} not found")),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/research/{researchId}`
#[utoipa::path(
    delete,
    path = "/api/v1/research/{researchId}",
    tag = "research",
    operation_id = "research.delete",
    params(("researchId" = String, Path, description = "Research ID")),
    responses(
        (status = 200, description = "Research deleted"),
        (status = 404, description = "Research not found", body = ApiError),
    )
)]
pub async fn delete_research(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<serde_json::Value> {
    match state.db.delete_research(&id).await {
        Ok(true) => ApiResponse::success(serde_json::json!({ "deleted": true })),
        Ok(false) => ApiResponse::error(ErrorCode::NotFound, format!("Research {id} not found")),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/research/{researchId}/tam`
///
/// Market-size estimate. Only HVAC research is supported.
#[utoipa::path(
    get,
    path = "/api/v1/research/{researchId}/tam",
    tag = "research",
    operation_id = "research.tam",
    params(("researchId" = String, Path, description = "Research ID")),
    responses(
        (status = 200, description = "TAM estimate", body = TamEstimateResponse),
        (status = 400, description = "Research is not for HVAC", body = ApiError),
        (status = 404, description = "Research not found", body = ApiError),
    )
)]
pub async fn get_research_tam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<TamEstimateResponse> {
    let record = match state.db.get_research(&id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return ApiResponse::error(ErrorCode::NotFound, format!("Research {id} not found"))
        }
        Err(e) => return e.into(),
    };

    match state.tam.estimate(&record) {
        Ok(estimate) => ApiResponse::success(estimate.into()),
        Err(e) => e.into(),
    }
}
