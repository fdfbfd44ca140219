#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::{Request, Respond, ResponseTemplate};

use tamscout::config::{Config, DatabaseConfig, ProviderConfig, ServerConfig, TamConfig};
use tamscout::db::{Database, DatabaseBackend, LibSqlBackend};

// ── Test Helpers ──────────────────────────────────────────────────────────

/// File-backed database in a temp dir. Keep the `TempDir` alive for the test.
pub async fn test_backend() -> (Arc<dyn DatabaseBackend>, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = DatabaseConfig {
        url: format!("file:{}", dir.path().join("tamscout.db").display()),
        auth_token: None,
        local_path: None,
    };
    let db = Database::new(&config).await.expect("database init");
    (Arc::new(LibSqlBackend::new(db)), dir)
}

/// Provider settings pointed at a mock server with no pacing delay.
pub fn provider_config(base_url: &str, batch_size: usize) -> ProviderConfig {
    ProviderConfig {
        api_key: None,
        base_url: base_url.to_string(),
        timeout_secs: 5,
        batch_size,
        batch_delay_ms: 0,
        ..ProviderConfig::default()
    }
}

pub fn app_config(dir: &TempDir, provider: ProviderConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: format!("file:{}", dir.path().join("tamscout.db").display()),
            auth_token: None,
            local_path: None,
        },
        provider,
        tam: TamConfig::default(),
    }
}

/// Answers every phrase in the request body, looking up volume and CPC by
/// phrase. Phrases without a rule get no record at all.
pub struct EchoMetrics {
    rules: Vec<(&'static str, Value)>,
}

impl EchoMetrics {
    pub fn new(rules: Vec<(&'static str, Value)>) -> Self {
        Self { rules }
    }
}

impl Respond for EchoMetrics {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let phrases = body["kw"].as_array().cloned().unwrap_or_default();

        let data: Vec<Value> = phrases
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|phrase| {
                self.rules
                    .iter()
                    .find(|(needle, _)| phrase.contains(needle))
                    .map(|(_, metrics)| {
                        let mut record = metrics.clone();
                        record["keyword"] = json!(phrase);
                        record
                    })
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "data": data,
            "credits_remaining": 1000
        }))
    }
}
