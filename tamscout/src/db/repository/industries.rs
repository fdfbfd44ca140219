use chrono::Utc;
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{Industry, UpdateIndustryRequest};

pub struct IndustryRepository;

impl IndustryRepository {
    pub async fn list(conn: &Connection) -> Result<Vec<Industry>> {
        let mut rows = conn
            .query(
                "SELECT id, name, label, keywords FROM industries ORDER BY name ASC",
                (),
            )
            .await?;

        let mut industries = Vec::new();
        while let Some(row) = rows.next().await? {
            industries.push(Self::row_to_industry(&row)?);
        }
        Ok(industries)
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Industry>> {
        let mut rows = conn
            .query(
                "SELECT id, name, label, keywords FROM industries WHERE id = ?1",
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_industry(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_by_name(conn: &Connection, name: &str) -> Result<Option<Industry>> {
        let mut rows = conn
            .query(
                "SELECT id, name, label, keywords FROM industries WHERE name = ?1 COLLATE NOCASE",
                params![name.trim()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_industry(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn create(conn: &Connection, industry: &Industry) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        conn.execute(
            r#"
            INSERT INTO industries (id, name, label, keywords, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
            params![
                industry.id.clone(),
                industry.name.clone(),
                industry.label.clone(),
                serde_json::to_string(&industry.keywords)?,
                now,
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn update(
        conn: &Connection,
        id: &str,
        update: &UpdateIndustryRequest,
    ) -> Result<Option<Industry>> {
        let Some(mut industry) = Self::get_by_id(conn, id).await? else {
            return Ok(None);
        };

        if let Some(label) = &update.label {
            industry.label = label.clone();
        }
        if let Some(keywords) = &update.keywords {
            industry.keywords = keywords.clone();
        }

        conn.execute(
            "UPDATE industries SET label = ?2, keywords = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                id,
                industry.label.clone(),
                serde_json::to_string(&industry.keywords)?,
                Utc::now().to_rfc3339(),
            ],
        )
        .await?;

        Ok(Some(industry))
    }

    pub async fn delete(conn: &Connection, id: &str) -> Result<bool> {
        let rows_affected = conn
            .execute("DELETE FROM industries WHERE id = ?1", params![id])
            .await?;

        Ok(rows_affected > 0)
    }

    fn row_to_industry(row: &libsql::Row) -> Result<Industry> {
        Ok(Industry {
            id: row.get(0)?,
            name: row.get(1)?,
            label: row.get(2)?,
            keywords: serde_json::from_str(&row.get::<String>(3)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        schema::init_schema(&conn).await.unwrap();
        conn
    }

    #[tokio::test]
    async fn seeded_hvac_is_found_case_insensitively() {
        let conn = setup_test_db().await;

        let hvac = IndustryRepository::get_by_name(&conn, " HVAC ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hvac.name, "hvac");
        assert!(hvac.keywords.contains(&"AC repair".to_string()));
        assert!(IndustryRepository::get_by_name(&conn, "landscaping")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn create_update_delete() {
        let conn = setup_test_db().await;
        let industry = Industry {
            id: "ind_pest".to_string(),
            name: "pest-control".to_string(),
            label: "Pest Control".to_string(),
            keywords: vec!["exterminator".to_string()],
        };
        IndustryRepository::create(&conn, &industry).await.unwrap();

        let updated = IndustryRepository::update(
            &conn,
            "ind_pest",
            &UpdateIndustryRequest {
                label: None,
                keywords: Some(vec!["termite treatment".to_string()]),
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.label, "Pest Control");
        assert_eq!(updated.keywords, vec!["termite treatment"]);

        let reloaded = IndustryRepository::get_by_id(&conn, "ind_pest")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded, updated);

        assert!(IndustryRepository::update(&conn, "nope", &UpdateIndustryRequest::default())
            .await
            .unwrap()
            .is_none());
        assert!(IndustryRepository::delete(&conn, "ind_pest").await.unwrap());
        assert!(!IndustryRepository::delete(&conn, "ind_pest").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let conn = setup_test_db().await;
        let duplicate = Industry {
            id: "ind_other".to_string(),
            name: "Plumbing".to_string(),
            label: "Plumbing".to_string(),
            keywords: vec![],
        };
        assert!(IndustryRepository::create(&conn, &duplicate).await.is_err());
    }

    #[tokio::test]
    async fn corrupt_keywords_column_is_an_error() {
        let conn = setup_test_db().await;
        conn.execute(
            "UPDATE industries SET keywords = 'not json' WHERE name = 'hvac'",
            (),
        )
        .await
        .unwrap();

        let err = IndustryRepository::get_by_name(&conn, "hvac")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::ScoutError::Json(_)));
    }
}
