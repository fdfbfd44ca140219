use crate::db::connection::Database;
use crate::db::repository::{IndustryRepository, ResearchRepository, SettingsRepository};
use crate::db::traits::{DatabaseBackend, IndustryStore, ResearchStore, SettingsStore};
use crate::error::Result;
use crate::models::{
    Industry, ListResearchRequest, ResearchRecord, ResearchSummary, UpdateIndustryRequest,
};
use async_trait::async_trait;

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResearchStore for LibSqlBackend {
    async fn create_research(&self, record: &ResearchRecord) -> Result<()> {
        let conn = self.db.connect()?;
        ResearchRepository::create(&conn, record).await
    }
    async fn get_research(&self, id: &str) -> Result<Option<ResearchRecord>> {
        let conn = self.db.connect()?;
        ResearchRepository::get_by_id(&conn, id).await
    }
    async fn list_research(&self, req: &ListResearchRequest) -> Result<Vec<ResearchSummary>> {
        let conn = self.db.connect()?;
        ResearchRepository::list(&conn, req).await
    }
    async fn update_research_title(&self, id: &str, title: Option<&str>) -> Result<bool> {
        let conn = self.db.connect()?;
        ResearchRepository::update_title(&conn, id, title).await
    }
    async fn delete_research(&self, id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        ResearchRepository::delete(&conn, id).await
    }
}

#[async_trait]
impl IndustryStore for LibSqlBackend {
    async fn list_industries(&self) -> Result<Vec<Industry>> {
        let conn = self.db.connect()?;
        IndustryRepository::list(&conn).await
    }
    async fn get_industry_by_id(&self, id: &str) -> Result<Option<Industry>> {
        let conn = self.db.connect()?;
        IndustryRepository::get_by_id(&conn, id).await
    }
    async fn get_industry_by_name(&self, name: &str) -> Result<Option<Industry>> {
        let conn = self.db.connect()?;
        IndustryRepository::get_by_name(&conn, name).await
    }
    async fn create_industry(&self, industry: &Industry) -> Result<()> {
        let conn = self.db.connect()?;
        IndustryRepository::create(&conn, industry).await
    }
    async fn update_industry(
        &self,
        id: &str,
        update: &UpdateIndustryRequest,
    ) -> Result<Option<Industry>> {
        let conn = self.db.connect()?;
        IndustryRepository::update(&conn, id, update).await
    }
    async fn delete_industry(&self, id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        IndustryRepository::delete(&conn, id).await
    }
}

#[async_trait]
impl SettingsStore for LibSqlBackend {
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.db.connect()?;
        SettingsRepository::get(&conn, key).await
    }
    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.db.connect()?;
        SettingsRepository::set(&conn, key, value).await
    }
    async fn delete_setting(&self, key: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        SettingsRepository::delete(&conn, key).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::{KeywordResult, Opportunity};
    use chrono::Utc;
    use tempfile::TempDir;

    async fn setup_test_db() -> (LibSqlBackend, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tamscout_test.db");
        let config = DatabaseConfig {
            url: format!("file:{}", path.display()),
            auth_token: None,
            local_path: None,
        };
        let db = Database::new(&config)
            .await
            .expect("Failed to create database");

        (LibSqlBackend::new(db), dir)
    }

    #[tokio::test]
    async fn test_research_lifecycle() {
        let (backend, _dir) = setup_test_db().await;
        let record = ResearchRecord {
            id: "abc".to_string(),
            title: Some("Reno".to_string()),
            industry: "hvac".to_string(),
            cities: vec!["Reno".to_string()],
            results: vec![KeywordResult {
                keyword: "HVAC repair Reno".to_string(),
                search_volume: 720,
                cpc: 12.3,
                competition: 41,
                opportunity: Opportunity::High,
            }],
            source: "keywords_everywhere".to_string(),
            created_at: Utc::now(),
        };

        backend.create_research(&record).await.unwrap();
        let loaded = backend.get_research("abc").await.unwrap().unwrap();
        assert_eq!(loaded.results, record.results);

        let listed = backend
            .list_research(&ListResearchRequest::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title.as_deref(), Some("Reno"));

        assert!(backend.update_research_title("abc", None).await.unwrap());
        assert!(backend.get_research("abc").await.unwrap().unwrap().title.is_none());
        assert!(backend.delete_research("abc").await.unwrap());
        assert!(backend.get_research("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_default_industries_available() {
        let (backend, _dir) = setup_test_db().await;
        let names: Vec<String> = backend
            .list_industries()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["electrical", "hvac", "plumbing", "roofing"]);
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let (backend, _dir) = setup_test_db().await;
        backend.set_setting("provider_api_key", "k-123").await.unwrap();
        assert_eq!(
            backend.get_setting("provider_api_key").await.unwrap().as_deref(),
            Some("k-123")
        );
        assert!(backend.delete_setting("provider_api_key").await.unwrap());
    }

    #[tokio::test]
    async fn test_sync_is_noop_locally() {
        let (backend, _dir) = setup_test_db().await;
        backend.sync().await.unwrap();
    }
}
