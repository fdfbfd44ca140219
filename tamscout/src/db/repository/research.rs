use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{ListResearchRequest, ResearchRecord, ResearchSummary};

pub const DEFAULT_LIST_LIMIT: u32 = 20;
pub const MAX_LIST_LIMIT: u32 = 100;

pub struct ResearchRepository;

impl ResearchRepository {
    /// Single INSERT, so a record is either fully stored or absent.
    pub async fn create(conn: &Connection, record: &ResearchRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO research_records (
                id, title, industry, cities, results, keyword_count, source, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.id.clone(),
                record.title.clone(),
                record.industry.clone(),
                serde_json::to_string(&record.cities)?,
                serde_json::to_string(&record.results)?,
                record.results.len() as i64,
                record.source.clone(),
                record.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<ResearchRecord>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, title, industry, cities, results, source, created_at
                FROM research_records WHERE id = ?1
                "#,
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_record(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list(
        conn: &Connection,
        req: &ListResearchRequest,
    ) -> Result<Vec<ResearchSummary>> {
        let limit = req
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT) as i64;

        let mut rows = match req.industry.as_deref() {
            Some(industry) => {
                conn.query(
                    r#"
                    SELECT id, title, industry, cities, keyword_count, source, created_at
                    FROM research_records
                    WHERE industry = ?1 COLLATE NOCASE
                    ORDER BY created_at DESC, rowid DESC
                    LIMIT ?2
                    "#,
                    params![industry, limit],
                )
                .await?
            }
            None => {
                conn.query(
                    r#"
                    SELECT id, title, industry, cities, keyword_count, source, created_at
                    FROM research_records
                    ORDER BY created_at DESC, rowid DESC
                    LIMIT ?1
                    "#,
                    params![limit],
                )
                .await?
            }
        };

        let mut summaries = Vec::new();
        while let Some(row) = rows.next().await? {
            let cities: Vec<String> = serde_json::from_str(&row.get::<String>(3)?)?;
            summaries.push(ResearchSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                industry: row.get(2)?,
                city_count: cities.len() as u32,
                keyword_count: row.get::<i64>(4)? as u32,
                source: row.get(5)?,
                created_at: parse_timestamp(&row.get::<String>(6)?),
            });
        }
        Ok(summaries)
    }

    pub async fn update_title(conn: &Connection, id: &str, title: Option<&str>) -> Result<bool> {
        let rows_affected = conn
            .execute(
                "UPDATE research_records SET title = ?2 WHERE id = ?1",
                params![id, title],
            )
            .await?;

        Ok(rows_affected > 0)
    }

    pub async fn delete(conn: &Connection, id: &str) -> Result<bool> {
        let rows_affected = conn
            .execute("DELETE FROM research_records WHERE id = ?1", params![id])
            .await?;

        Ok(rows_affected > 0)
    }

    fn row_to_record(row: &libsql::Row) -> Result<ResearchRecord> {
        Ok(ResearchRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            industry: row.get(2)?,
            cities: serde_json::from_str(&row.get::<String>(3)?)?,
            results: serde_json::from_str(&row.get::<String>(4)?)?,
            source: row.get(5)?,
            created_at: parse_timestamp(&row.get::<String>(6)?),
        })
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
