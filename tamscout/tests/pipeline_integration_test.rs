mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tamscout::error::{ProviderFailure, ScoutError};
use tamscout::models::{Industry, ListResearchRequest, Opportunity};
use tamscout::provider::{FetchSettings, KeywordsEverywhereClient, MetricsBatchFetcher};
use tamscout::research::ResearchPipeline;

use common::{provider_config, test_backend, EchoMetrics};

fn hvac() -> Industry {
    Industry {
        id: "ind_hvac".to_string(),
        name: "hvac".to_string(),
        label: "HVAC".to_string(),
        keywords: vec!["HVAC repair".to_string(), "AC repair".to_string()],
    }
}

fn cities() -> Vec<String> {
    vec!["Boise".to_string(), "Meridian".to_string()]
}

fn fetcher_for(server: &MockServer, batch_size: usize) -> MetricsBatchFetcher {
    let config = provider_config(&server.uri(), batch_size);
    let client = KeywordsEverywhereClient::new(&config).unwrap();
    MetricsBatchFetcher::new(Arc::new(client), FetchSettings::from_config(&config))
}

fn boise_metrics() -> EchoMetrics {
    EchoMetrics::new(vec![
        ("Meridian", json!({"vol": 0, "competition": 0.9})),
        ("HVAC", json!({"vol": 600, "cpc": {"currency": "$", "value": "12.50"}, "competition": 0.4})),
        ("AC repair", json!({"volume": 150, "cpc": 3.1, "competition": 70})),
    ])
}

async fn stored_count(db: &Arc<dyn tamscout::db::DatabaseBackend>) -> usize {
    db.list_research(&ListResearchRequest {
        industry: None,
        limit: None,
    })
    .await
    .unwrap()
    .len()
}

// ── Happy path ────────────────────────────────────────────────────────────

#[tokio::test]
async fn research_run_batches_scores_and_persists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .and(header("Authorization", "Bearer ke-key"))
        .respond_with(boise_metrics())
        .expect(3)
        .mount(&server)
        .await;

    let (db, _dir) = test_backend().await;
    let pipeline = ResearchPipeline::new(fetcher_for(&server, 3), db.clone());

    let record = pipeline.run(&hvac(), &cities(), "ke-key").await.unwrap();

    let keywords: Vec<&str> = record.results.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(
        keywords,
        vec![
            "HVAC repair Boise",
            "Boise HVAC repair",
            "HVAC repair Meridian",
            "Meridian HVAC repair",
            "AC repair Boise",
            "Boise AC repair",
            "AC repair Meridian",
            "Meridian AC repair",
        ]
    );

    let first = &record.results[0];
    assert_eq!(first.search_volume, 600);
    assert_eq!(first.cpc, 12.5);
    assert_eq!(first.competition, 40);
    assert_eq!(first.opportunity, Opportunity::High);
    assert_eq!(first.ppc_budget(), 2250);

    let meridian = &record.results[2];
    assert_eq!(meridian.search_volume, 0);
    assert_eq!(meridian.competition, 0);
    assert_eq!(meridian.opportunity, Opportunity::Low);

    let ac = &record.results[4];
    assert_eq!(ac.search_volume, 150);
    assert_eq!(ac.cpc, 3.1);
    assert_eq!(ac.competition, 70);
    assert_eq!(ac.opportunity, Opportunity::Medium);

    assert_eq!(record.source, "keywords_everywhere");
    assert_eq!(record.industry, "hvac");

    let stored = db.get_research(&record.id).await.unwrap().unwrap();
    assert_eq!(stored.results, record.results);
    assert_eq!(stored.cities, cities());
}

#[tokio::test]
async fn phrases_without_provider_record_score_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .respond_with(EchoMetrics::new(vec![(
            "HVAC",
            json!({"vol": 900, "cpc": 8, "competition": 0.2}),
        )]))
        .mount(&server)
        .await;

    let (db, _dir) = test_backend().await;
    let pipeline = ResearchPipeline::new(fetcher_for(&server, 250), db.clone());

    let record = pipeline
        .run(&hvac(), &["Boise".to_string()], "ke-key")
        .await
        .unwrap();

    assert_eq!(record.results.len(), 4);
    for result in &record.results[2..] {
        assert_eq!(result.search_volume, 0);
        assert_eq!(result.cpc, 0.0);
        assert_eq!(result.competition, 0);
        assert_eq!(result.opportunity, Opportunity::Low);
    }
}

// ── Failures leave nothing behind ─────────────────────────────────────────

#[tokio::test]
async fn rate_limit_on_later_batch_aborts_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .respond_with(boise_metrics())
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"message": "slow down"})))
        .mount(&server)
        .await;

    let (db, _dir) = test_backend().await;
    let pipeline = ResearchPipeline::new(fetcher_for(&server, 3), db.clone());

    let err = pipeline.run(&hvac(), &cities(), "ke-key").await.unwrap_err();

    assert!(matches!(
        err,
        ScoutError::Provider {
            reason: ProviderFailure::RateLimited,
            status: Some(429),
            ..
        }
    ));
    assert_eq!(stored_count(&db).await, 0);
}

#[tokio::test]
async fn rejected_key_is_reported_as_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad key"})))
        .expect(1)
        .mount(&server)
        .await;

    let (db, _dir) = test_backend().await;
    let pipeline = ResearchPipeline::new(fetcher_for(&server, 250), db.clone());

    let err = pipeline.run(&hvac(), &cities(), "wrong").await.unwrap_err();

    match err {
        ScoutError::Provider {
            reason, message, ..
        } => {
            assert_eq!(reason, ProviderFailure::Unauthorized);
            assert!(message.contains("bad key"), "message was {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(stored_count(&db).await, 0);
}

#[tokio::test]
async fn implausible_first_volume_aborts_before_more_batches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_keyword_data"))
        .respond_with(EchoMetrics::new(vec![(
            "repair",
            json!({"vol": 250000, "cpc": 1, "competition": 0.1}),
        )]))
        .expect(1)
        .mount(&server)
        .await;

    let (db, _dir) = test_backend().await;
    let pipeline = ResearchPipeline::new(fetcher_for(&server, 2), db.clone());

    let err = pipeline.run(&hvac(), &cities(), "ke-key").await.unwrap_err();

    match err {
        ScoutError::SuspiciousData {
            keyword,
            volume,
            threshold,
        } => {
            assert_eq!(keyword, "HVAC repair Boise");
            assert_eq!(volume, 250_000);
            assert_eq!(threshold, 5000);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(stored_count(&db).await, 0);
}

#[tokio::test]
async fn missing_key_never_reaches_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (db, _dir) = test_backend().await;
    let pipeline = ResearchPipeline::new(fetcher_for(&server, 250), db.clone());

    let err = pipeline.run(&hvac(), &cities(), "  ").await.unwrap_err();
    assert!(matches!(err, ScoutError::MissingCredential));

    let err = pipeline.run(&hvac(), &[], "").await.unwrap_err();
    assert!(matches!(err, ScoutError::InvalidInput(_)));

    assert_eq!(stored_count(&db).await, 0);
}
