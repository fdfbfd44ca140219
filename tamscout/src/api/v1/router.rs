use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let industries = Router::new()
        .route(
            "/",
            get(handlers::industries::list_industries)
                .post(handlers::industries::create_industry),
        )
        .route(
            "/{industryId}",
            get(handlers::industries::get_industry)
                .patch(handlers::industries::update_industry)
                .delete(handlers::industries::delete_industry),
        );

    let research = Router::new()
        .route(
            "/",
            get(handlers::research::list_research).post(handlers::research::create_research),
        )
        .route(
            "/{researchId}",
            get(handlers::research::get_research)
                .patch(handlers::research::update_research)
                .delete(handlers::research::delete_research),
        )
        .route(
            "/{researchId}/export",
            get(handlers::export::export_research),
        )
        .route("/{researchId}/tam", get(handlers::research::get_research_tam));

    let settings = Router::new().route(
        "/api-key",
        get(handlers::settings::get_api_key)
            .put(handlers::settings::set_api_key)
            .delete(handlers::settings::delete_api_key),
    );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .route(
            "/settings/api-key:test",
            post(handlers::settings::test_api_key),
        )
        .nest("/industries", industries)
        .nest("/research", research)
        .nest("/settings", settings)
}
