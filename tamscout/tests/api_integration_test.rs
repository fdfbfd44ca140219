mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tamscout::api::{create_router, AppState};
use tamscout::provider::KeywordsEverywhereClient;

use common::{app_config, provider_config, EchoMetrics};

async fn app(server: &MockServer, env_key: Option<&str>) -> (axum::Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut provider = provider_config(&server.uri(), 250);
    provider.api_key = env_key.map(str::to_string);
    let config = app_config(&dir, provider);

    let raw_db = tamscout::db::Database::new(&config.database).await.unwrap();
    let db: Arc<dyn tamscout::db::DatabaseBackend> =
        Arc::new(tamscout::db::LibSqlBackend::new(raw_db));
    let client = Arc::new(KeywordsEverywhereClient::new(&config.provider).unwrap());

    (create_router(AppState::new(config, db, client)), dir)
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn stored_key_is_sent_to_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .and(header("Authorization", "Bearer stored-key-9876"))
        .respond_with(EchoMetrics::new(vec![(
            "",
            json!({"vol": 320, "cpc": {"value": 6.25}, "competition": 0.5}),
        )]))
        .mount(&server)
        .await;

    let (router, _dir) = app(&server, None).await;

    let (status, body) = send(
        &router,
        json_request("POST", "/api/v1/research", json!({"industry": "hvac", "cities": ["Boise"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "missing_credential");

    let (status, body) = send(
        &router,
        json_request("PUT", "/api/v1/settings/api-key", json!({"apiKey": "stored-key-9876"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], "settings");
    assert_eq!(body["data"]["maskedKey"], "***********9876");

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/v1/research",
            json!({"industry": "HVAC", "cities": [" Boise ", ""], "title": "Boise launch"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Boise launch");
    assert_eq!(body["data"]["cities"], json!(["Boise"]));
    assert_eq!(body["data"]["source"], "keywords_everywhere");

    let first = &body["data"]["results"][0];
    assert_eq!(first["keyword"], "HVAC repair Boise");
    assert_eq!(first["searchVolume"], 320);
    assert_eq!(first["competition"], 50);
    assert_eq!(first["opportunity"], "Medium");
    assert_eq!(first["ppcBudget"], 600);
}

#[tokio::test]
async fn environment_key_wins_over_stored_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .and(header("Authorization", "Bearer env-key-0001"))
        .and(body_partial_json(json!({"kw": ["hvac repair"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"keyword": "hvac repair", "vol": 40}],
            "credits_remaining": 4321
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (router, _dir) = app(&server, Some("env-key-0001")).await;

    let (status, _) = send(
        &router,
        json_request("PUT", "/api/v1/settings/api-key", json!({"apiKey": "stored-key"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, empty_request("GET", "/api/v1/settings/api-key")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], "environment");
    assert_eq!(body["data"]["maskedKey"], "********0001");

    let (status, body) = send(
        &router,
        json_request("POST", "/api/v1/settings/api-key:test", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["creditsRemaining"], 4321.0);
}

#[tokio::test]
async fn provider_credit_failure_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({"message": "out of credits"})))
        .mount(&server)
        .await;

    let (router, _dir) = app(&server, Some("env-key-0001")).await;

    let (status, body) = send(
        &router,
        json_request("POST", "/api/v1/research", json!({"industry": "roofing", "cities": ["Boise"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "provider_insufficient_credit");

    let (status, body) = send(&router, empty_request("GET", "/api/v1/research")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["research"], json!([]));
}
