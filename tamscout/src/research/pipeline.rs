use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use nanoid::nanoid;

use super::{MetricsNormalizer, OpportunityClassifier, PhraseGenerator};
use crate::db::ResearchStore;
use crate::error::{Result, ScoutError};
use crate::models::{Industry, KeywordResult, ResearchRecord};
use crate::provider::MetricsBatchFetcher;

/// Where a research run is. `Persisted` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResearchStage {
    Idle,
    Generating,
    Fetching,
    Classifying,
    Persisted,
    Failed,
}

impl fmt::Display for ResearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Generating => write!(f, "generating"),
            Self::Fetching => write!(f, "fetching"),
            Self::Classifying => write!(f, "classifying"),
            Self::Persisted => write!(f, "persisted"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Tracks one run through its stages and logs every transition.
struct RunTracker<'a> {
    run_id: &'a str,
    stage: ResearchStage,
}

impl<'a> RunTracker<'a> {
    fn new(run_id: &'a str) -> Self {
        Self {
            run_id,
            stage: ResearchStage::Idle,
        }
    }

    fn advance(&mut self, next: ResearchStage) {
        tracing::debug!(run_id = %self.run_id, from = %self.stage, to = %next, "Research stage");
        self.stage = next;
    }

    fn fail(&mut self, error: ScoutError) -> ScoutError {
        tracing::warn!(run_id = %self.run_id, stage = %self.stage, error = %error, "Research run failed");
        self.stage = ResearchStage::Failed;
        error
    }
}

/// generate → fetch → normalize → classify → persist.
///
/// A run either stores exactly one complete record or stores nothing.
/// Errors propagate unchanged and are never retried here.
pub struct ResearchPipeline<S: ResearchStore + ?Sized> {
    fetcher: MetricsBatchFetcher,
    store: Arc<S>,
}

impl<S: ResearchStore + ?Sized> Clone for ResearchPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ResearchStore + ?Sized> ResearchPipeline<S> {
    pub fn new(fetcher: MetricsBatchFetcher, store: Arc<S>) -> Self {
        Self { fetcher, store }
    }

    pub fn fetcher(&self) -> &MetricsBatchFetcher {
        &self.fetcher
    }

    pub async fn run(
        &self,
        industry: &Industry,
        cities: &[String],
        credential: &str,
    ) -> Result<ResearchRecord> {
        self.run_titled(industry, cities, credential, None).await
    }

    pub async fn run_titled(
        &self,
        industry: &Industry,
        cities: &[String],
        credential: &str,
        title: Option<String>,
    ) -> Result<ResearchRecord> {
        let id = nanoid!();
        let mut tracker = RunTracker::new(&id);
        let cities = distinct_in_order(cities);

        tracker.advance(ResearchStage::Generating);
        let phrases = PhraseGenerator::generate(&industry.keywords, &cities)
            .map_err(|e| tracker.fail(e))?;

        tracker.advance(ResearchStage::Fetching);
        if credential.trim().is_empty() {
            return Err(tracker.fail(ScoutError::MissingCredential));
        }
        tracing::info!(
            run_id = %id,
            industry = %industry.name,
            cities = cities.len(),
            phrases = phrases.len(),
            "Starting keyword research"
        );
        let metrics = self
            .fetcher
            .fetch(&phrases, credential)
            .await
            .map_err(|e| tracker.fail(e))?;

        tracker.advance(ResearchStage::Classifying);
        let results: Vec<KeywordResult> = phrases
            .into_iter()
            .map(|phrase| {
                let metric = MetricsNormalizer::normalize(metrics.get(&phrase));
                KeywordResult {
                    opportunity: OpportunityClassifier::classify(metric.volume, metric.competition),
                    keyword: phrase,
                    search_volume: metric.volume,
                    cpc: metric.cpc,
                    competition: metric.competition,
                }
            })
            .collect();

        let record = ResearchRecord {
            id: id.clone(),
            title: title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            industry: industry.name.clone(),
            cities,
            results,
            source: self.fetcher.source().to_string(),
            created_at: Utc::now(),
        };

        self.store
            .create_research(&record)
            .await
            .map_err(|e| tracker.fail(e))?;
        tracker.advance(ResearchStage::Persisted);

        tracing::info!(
            run_id = %id,
            keywords = record.results.len(),
            "Keyword research stored"
        );

        Ok(record)
    }
}

fn distinct_in_order(values: &[String]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !distinct.contains(value) {
            distinct.push(value.clone());
        }
    }
    distinct
}
