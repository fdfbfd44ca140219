use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tamscout API",
        version = "1.0.0",
        description = "Local-search keyword research: city x keyword phrase expansion, provider metrics, opportunity scoring and HVAC market sizing.",
    ),
    paths(
        handlers::health::health_check,
        handlers::industries::list_industries,
        handlers::industries::get_industry,
        handlers::industries::create_industry,
        handlers::industries::update_industry,
        handlers::industries::delete_industry,
        handlers::research::create_research,
        handlers::research::list_research,
        handlers::research::get_research,
        handlers::research::update_research,
        handlers::research::delete_research,
        handlers::research::get_research_tam,
        handlers::export::export_research,
        handlers::settings::get_api_key,
        handlers::settings::set_api_key,
        handlers::settings::delete_api_key,
        handlers::settings::test_api_key,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Industries
        dto::industries::CreateIndustryRequest,
        dto::industries::UpdateIndustryRequest,
        dto::industries::IndustryResponse,
        dto::industries::ListIndustriesResponse,
        // Research
        dto::research::CreateResearchRequest,
        dto::research::UpdateResearchRequest,
        dto::research::ListResearchQuery,
        dto::research::OpportunityTier,
        dto::research::KeywordResultResponse,
        dto::research::ResearchResponse,
        dto::research::ResearchSummaryResponse,
        dto::research::ListResearchResponse,
        dto::research::TierTotalsResponse,
        dto::research::TamAssumptionsResponse,
        dto::research::TamEstimateResponse,
        // Settings
        dto::settings::SetApiKeyRequest,
        dto::settings::TestApiKeyRequest,
        dto::settings::ApiKeySource,
        dto::settings::ApiKeyStatusResponse,
        dto::settings::ApiKeyTestResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::ProviderStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "industries", description = "Industry keyword lists"),
        (name = "research", description = "Keyword research runs, history, CSV export and TAM"),
        (name = "settings", description = "Keyword provider API key"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
