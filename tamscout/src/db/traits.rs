use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Industry, ListResearchRequest, ResearchRecord, ResearchSummary, UpdateIndustryRequest,
};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// Storage for completed research runs.
///
/// `create_research` must store the whole record atomically: a concurrent
/// reader sees either nothing or the complete record.
#[async_trait]
pub trait ResearchStore: Send + Sync {
    async fn create_research(&self, record: &ResearchRecord) -> Result<()>;
    async fn get_research(&self, id: &str) -> Result<Option<ResearchRecord>>;
    /// Newest first.
    async fn list_research(&self, req: &ListResearchRequest) -> Result<Vec<ResearchSummary>>;
    /// Returns `false` when no record has this id.
    async fn update_research_title(&self, id: &str, title: Option<&str>) -> Result<bool>;
    async fn delete_research(&self, id: &str) -> Result<bool>;
}

/// Industry catalogue (base keyword lists).
#[async_trait]
pub trait IndustryStore: Send + Sync {
    async fn list_industries(&self) -> Result<Vec<Industry>>;
    async fn get_industry_by_id(&self, id: &str) -> Result<Option<Industry>>;
    /// Case-insensitive match on `name`.
    async fn get_industry_by_name(&self, name: &str) -> Result<Option<Industry>>;
    async fn create_industry(&self, industry: &Industry) -> Result<()>;
    async fn update_industry(
        &self,
        id: &str,
        update: &UpdateIndustryRequest,
    ) -> Result<Option<Industry>>;
    async fn delete_industry(&self, id: &str) -> Result<bool>;
}

/// Key-value application settings (e.g. a stored provider API key).
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
    async fn set_setting(&self, key: &str, value: &str) -> Result<()>;
    async fn delete_setting(&self, key: &str) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait DatabaseBackend: ResearchStore + IndustryStore + SettingsStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
