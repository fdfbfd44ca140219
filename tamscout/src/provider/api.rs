use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{MetricsProvider, ProviderBatch};
use crate::config::ProviderConfig;
use crate::error::{ProviderFailure, Result, ScoutError};
use crate::models::{Phrase, RawMetric};

const PROVIDER_NAME: &str = "keywords_everywhere";
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Clone, Debug)]
pub struct KeywordsEverywhereClient {
    client: Client,
    base_url: String,
    country: String,
    currency: String,
    data_source: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeywordDataRequest<'a> {
    country: &'a str,
    currency: &'a str,
    data_source: &'a str,
    kw: &'a [Phrase],
}

#[derive(Debug, Deserialize)]
struct KeywordDataResponse {
    #[serde(default)]
    data: Vec<RawMetric>,
    #[serde(default)]
    credits_remaining: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl KeywordsEverywhereClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone(),
            currency: config.currency.clone(),
            data_source: config.data_source.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/get_keyword_data", self.base_url)
    }

    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY_CHARS).collect());

        let hint = match ProviderFailure::from_status(status.as_u16()) {
            ProviderFailure::Unauthorized => "API key was rejected",
            ProviderFailure::InsufficientCredit => "account has insufficient credits or access",
            ProviderFailure::RateLimited => "too many requests, slow down and retry later",
            ProviderFailure::Other => "request failed",
        };

        if detail.trim().is_empty() {
            format!("{status}: {hint}")
        } else {
            format!("{status}: {hint} ({})", detail.trim())
        }
    }
}

#[async_trait]
impl MetricsProvider for KeywordsEverywhereClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_batch(&self, phrases: &[Phrase], credential: &str) -> Result<ProviderBatch> {
        let request = KeywordDataRequest {
            country: &self.country,
            currency: &self.currency,
            data_source: &self.data_source,
            kw: phrases,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {credential}"))
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ScoutError::provider(
                    ProviderFailure::Other,
                    None,
                    format!("network error contacting provider: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                batch_size = phrases.len(),
                "Keyword provider rejected batch"
            );
            return Err(ScoutError::provider(
                ProviderFailure::from_status(status.as_u16()),
                Some(status.as_u16()),
                Self::error_message(status, &body),
            ));
        }

        let parsed: KeywordDataResponse = response.json().await.map_err(|e| {
            ScoutError::provider(
                ProviderFailure::Other,
                Some(status.as_u16()),
                format!("failed to parse provider response: {e}"),
            )
        })?;

        tracing::debug!(
            requested = phrases.len(),
            returned = parsed.data.len(),
            credits_remaining = ?parsed.credits_remaining,
            "Keyword provider batch received"
        );

        Ok(ProviderBatch {
            records: parsed.data,
            credits_remaining: parsed.credits_remaining,
        })
    }
}
