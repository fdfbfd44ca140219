use axum::extract::{Path, State};
use nanoid::nanoid;

use crate::api::state::AppState;
use crate::api::v1::dto::{
    CreateIndustryRequest, IndustryResponse, ListIndustriesResponse, UpdateIndustryRequest,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppJson;
use crate::models::{self, clean_keywords, Industry};

/// `GET /api/v1/industries`
#[utoipa::path(
    get,
    path = "/api/v1/industries",
    tag = "industries",
    operation_id = "industries.list",
    responses(
        (status = 200, description = "Industries listed", body = ListIndustriesResponse),
    )
)]
pub async fn list_industries(State(state): State<AppState>) -> ApiResponse<ListIndustriesResponse> {
    match state.db.list_industries().await {
        Ok(industries) => {
            let total = industries.len() as u64;
            ApiResponse::success_with_meta(
                ListIndustriesResponse {
                    industries: industries.into_iter().map(Into::into).collect(),
                },
                ResponseMeta { total: Some(total) },
            )
        }
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/industries/{industryId}`
#[utoipa::path(
    get,
    path = "/api/v1/industries/{industryId}",
    tag = "industries",
    operation_id = "industries.get",
    params(("industryId" = String, Path, description = "Industry ID")),
    responses(
        (status = 200, description = "Industry found", body = IndustryResponse),
        (status = 404, description = "Industry not found", body = ApiError),
    )
)]
pub async fn get_industry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<IndustryResponse> {
    match state.db.get_industry_by_id(&id).await {
        Ok(Some(industry)) => ApiResponse::success(industry.into()),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, format!("Industry {id} not found")),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/industries`
#[utoipa::path(
    post,
    path = "/api/v1/industries",
    tag = "industries",
    operation_id = "industries.create",
    request_body = CreateIndustryRequest,
    responses(
        (status = 201, description = "Industry created", body = IndustryResponse),
        (status = 400, description = "Invalid name or keywords", body = ApiError),
    )
)]
pub async fn create_industry(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateIndustryRequest>,
) -> ApiResponse<IndustryResponse> {
    let name = req.name.trim().to_lowercase();
    if name.is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Industry name is required");
    }

    let keywords = clean_keywords(&req.keywords);
    if keywords.is_empty() {
        return ApiResponse::error(
            ErrorCode::InvalidRequest,
            "At least one keyword is required",
        );
    }

    match state.db.get_industry_by_name(&name).await {
        Ok(Some(_)) => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                format!("Industry '{name}' already exists"),
            )
        }
        Ok(None) => {}
        Err(e) => return e.into(),
    }

    let label = req
        .label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| name.clone());

    let industry = Industry {
        id: nanoid!(),
        name,
        label,
        keywords,
    };

    if let Err(e) = state.db.create_industry(&industry).await {
        return e.into();
    }

    tracing::info!(industry = %industry.name, keywords = industry.keywords.len(), "Industry created");
    ApiResponse::created(industry.into())
}

/// `PATCH /api/v1/industries/{industryId}`
#[utoipa::path(
    patch,
    path = "/api/v1/industries/{industryId}",
    tag = "industries",
    operation_id = "industries.update",
    params(("industryId" = String, Path, description = "Industry ID")),
    request_body = UpdateIndustryRequest,
    responses(
        (status = 200, description = "Industry updated", body = IndustryResponse),
        (status = 400, description = "Empty keyword list", body = ApiError),
        (status = 404, description = "Industry not found", body = ApiError),
    )
)]
pub async fn update_industry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateIndustryRequest>,
) -> ApiResponse<IndustryResponse> {
    let keywords = req.keywords.as_ref().map(clean_keywords);
    if keywords.as_ref().is_some_and(Vec::is_empty) {
        return ApiResponse::error(
            ErrorCode::InvalidRequest,
            "At least one keyword is required",
        );
    }

    let update = models::UpdateIndustryRequest {
        label: req
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
        keywords,
    };

    match state.db.update_industry(&id, &update).await {
        Ok(Some(industry)) => ApiResponse::success(industry.into()),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, format!("Industry {id} not found")),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/industries/{industryId}`
///
/// Past research keeps the industry name it was run with.
#[utoipa::path(
    delete,
    path = "/api/v1/industries/{industryId}",
    tag = "industries",
    operation_id = "industries.delete",
    params(("industryId" = String, Path, description = "Industry ID")),
    responses(
        (status = 200, description = "Industry deleted"),
        (status = 404, description = "Industry not found", body = ApiError),
    )
)]
pub async fn delete_industry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<serde_json::Value> {
    match state.db.delete_industry(&id).await {
        Ok(true) => ApiResponse::success(serde_json::json!({ "deleted": true })),
        Ok(false) => ApiResponse::error(ErrorCode::NotFound, format!("Industry {id} not found")),
        Err(e) => e.into(),
    }
}
