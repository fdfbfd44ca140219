mod api;
mod fetcher;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Phrase, RawMetric};

pub use api::KeywordsEverywhereClient;
pub use fetcher::{FetchSettings, MetricsBatchFetcher, Pacer, TokioPacer};

/// One provider response for one batch of phrases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderBatch {
    pub records: Vec<RawMetric>,
    pub credits_remaining: Option<f64>,
}

/// A keyword-metrics service that answers one batch of phrases per call.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Short identifier stored as the `source` of research records.
    fn name(&self) -> &str;

    /// Fetch metrics for `phrases` in a single request.
    ///
    /// Any non-success response must surface as [`crate::error::ScoutError::Provider`].
    async fn fetch_batch(&self, phrases: &[Phrase], credential: &str) -> Result<ProviderBatch>;
}
