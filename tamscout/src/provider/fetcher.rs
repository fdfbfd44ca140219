use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::MetricsProvider;
use crate::config::ProviderConfig;
use crate::error::{ProviderFailure, Result, ScoutError};
use crate::models::{CredentialCheck, Phrase, RawMetric};
use crate::research::MetricsNormalizer;

/// Phrase sent when probing an API key.
const CREDENTIAL_PROBE_PHRASE: &str = "hvac repair";

/// Waits between provider batches.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub suspicious_volume_threshold: Option<u64>,
}

impl FetchSettings {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            batch_delay: config.batch_delay(),
            suspicious_volume_threshold: config.suspicious_volume_threshold,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from_config(&ProviderConfig::default())
    }
}

/// Sends phrases to a [`MetricsProvider`] in sequential, paced batches.
#[derive(Clone)]
pub struct MetricsBatchFetcher {
    provider: Arc<dyn MetricsProvider>,
    pacer: Arc<dyn Pacer>,
    settings: FetchSettings,
}

impl MetricsBatchFetcher {
    pub fn new(provider: Arc<dyn MetricsProvider>, settings: FetchSettings) -> Self {
        Self::with_pacer(provider, Arc::new(TokioPacer), settings)
    }

    pub fn with_pacer(
        provider: Arc<dyn MetricsProvider>,
        pacer: Arc<dyn Pacer>,
        settings: FetchSettings,
    ) -> Self {
        let settings = FetchSettings {
            batch_size: settings.batch_size.max(1),
            ..settings
        };
        Self {
            provider,
            pacer,
            settings,
        }
    }

    pub fn source(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> FetchSettings {
        self.settings
    }

    /// Fetch raw metrics for every phrase, keyed by the keyword the provider returned.
    ///
    /// Fails fast: the first rejected batch aborts the whole fetch and nothing
    /// collected so far is returned. Phrases the provider stays silent on are
    /// simply absent from the map.
    pub async fn fetch(
        &self,
        phrases: &[Phrase],
        credential: &str,
    ) -> Result<HashMap<Phrase, RawMetric>> {
        if credential.trim().is_empty() {
            return Err(ScoutError::MissingCredential);
        }

        let mut metrics = HashMap::with_capacity(phrases.len());
        let batch_count = phrases.len().div_ceil(self.settings.batch_size);

        for (index, batch) in phrases.chunks(self.settings.batch_size).enumerate() {
            if index > 0 {
                self.pacer.pause(self.settings.batch_delay).await;
            }

            tracing::debug!(
                batch = index + 1,
                batches = batch_count,
                phrases = batch.len(),
                "Requesting keyword metrics"
            );

            let response = self.provider.fetch_batch(batch, credential).await?;

            if index == 0 {
                self.check_plausibility(response.records.first())?;
            }

            for record in response.records {
                metrics.insert(record.keyword.clone(), record);
            }
        }

        tracing::info!(
            requested = phrases.len(),
            returned = metrics.len(),
            batches = batch_count,
            source = self.source(),
            "Keyword metrics fetched"
        );

        Ok(metrics)
    }

    fn check_plausibility(&self, first: Option<&RawMetric>) -> Result<()> {
        let (Some(threshold), Some(record)) = (self.settings.suspicious_volume_threshold, first)
        else {
            return Ok(());
        };

        let volume = MetricsNormalizer::normalize(Some(record)).volume;
        if volume > threshold {
            tracing::error!(
                keyword = %record.keyword,
                volume,
                threshold,
                "Keyword provider returned implausible search volume, aborting fetch"
            );
            return Err(ScoutError::SuspiciousData {
                keyword: record.keyword.clone(),
                volume,
                threshold,
            });
        }
        Ok(())
    }

    /// Probe an API key with a single-phrase request.
    pub async fn test_credential(&self, credential: &str) -> CredentialCheck {
        if credential.trim().is_empty() {
            return CredentialCheck {
                valid: false,
                message: "No API key provided".to_string(),
                credits_remaining: None,
            };
        }

        let probe = [CREDENTIAL_PROBE_PHRASE.to_string()];
        match self.provider.fetch_batch(&probe, credential).await {
            Ok(batch) => CredentialCheck {
                valid: true,
                message: "API key is valid".to_string(),
                credits_remaining: batch.credits_remaining,
            },
            Err(ScoutError::Provider {
                reason, message, ..
            }) => {
                let summary = match reason {
                    ProviderFailure::Unauthorized => "API key was rejected by the provider",
                    ProviderFailure::InsufficientCredit => {
                        "API key has no remaining credits or lacks access"
                    }
                    ProviderFailure::RateLimited => {
                        "Provider is rate limiting requests, try again shortly"
                    }
                    ProviderFailure::Other => "Could not verify API key",
                };
                CredentialCheck {
                    valid: false,
                    message: format!("{summary}: {message}"),
                    credits_remaining: None,
                }
            }
            Err(e) => CredentialCheck {
                valid: false,
                message: format!("Could not verify API key: {e}"),
                credits_remaining: None,
            },
        }
    }
}
