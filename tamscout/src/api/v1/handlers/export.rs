use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::state::AppState;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::services::{export_filename, render_csv};

/// `GET /api/v1/research/{researchId}/export`
///
/// Downloads the results as CSV: `keyword,searchVolume,cpc,ppcBudget`.
#[utoipa::path(
    get,
    path = "/api/v1/research/{researchId}/export",
    tag = "research",
    operation_id = "research.export",
    params(("researchId" = String, Path, description = "Research ID")),
    responses(
        (status = 200, description = "CSV report", content_type = "text/csv", body = String),
        (status = 404, description = "Research not found", body = ApiError),
    )
)]
pub async fn export_research(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let record = match state.db.get_research(&id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return ApiResponse::<()>::error(ErrorCode::NotFound, format!("Research {id} not found"))
                .into_response()
        }
        Err(e) => return e.into_response(),
    };

    let csv = match render_csv(&record) {
        Ok(csv) => csv,
        Err(e) => return e.into_response(),
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(&record)),
            ),
        ],
        csv,
    )
        .into_response()
}
