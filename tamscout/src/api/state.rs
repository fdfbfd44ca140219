use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::provider::{FetchSettings, MetricsBatchFetcher, MetricsProvider};
use crate::research::ResearchPipeline;
use crate::services::{CredentialResolver, TamCalculator};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub pipeline: ResearchPipeline<dyn DatabaseBackend>,
    pub credentials: Arc<CredentialResolver<dyn DatabaseBackend>>,
    pub tam: Arc<TamCalculator>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Arc<dyn DatabaseBackend>,
        provider: Arc<dyn MetricsProvider>,
    ) -> Self {
        let fetcher = MetricsBatchFetcher::new(provider, FetchSettings::from_config(&config.provider));
        Self::with_fetcher(config, db, fetcher)
    }

    /// Builds the state around an already configured fetcher (custom pacing in tests).
    pub fn with_fetcher(
        config: Config,
        db: Arc<dyn DatabaseBackend>,
        fetcher: MetricsBatchFetcher,
    ) -> Self {
        let config = Arc::new(config);
        let pipeline = ResearchPipeline::new(fetcher, db.clone());
        let credentials = Arc::new(CredentialResolver::new(
            config.provider.api_key.clone(),
            db.clone(),
        ));
        let tam = Arc::new(TamCalculator::new(config.tam));

        Self {
            config,
            db,
            pipeline,
            credentials,
            tam,
        }
    }
}
