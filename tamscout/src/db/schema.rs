use chrono::Utc;
use libsql::{params, Connection};

use crate::error::Result;

/// `(name, label, keywords)` available on a fresh database.
const DEFAULT_INDUSTRIES: &[(&str, &str, &[&str])] = &[
    (
        "hvac",
        "HVAC",
        &[
            "HVAC repair",
            "AC repair",
            "furnace repair",
            "heating and cooling",
            "air conditioning installation",
            "heat pump installation",
            "HVAC contractor",
            "emergency HVAC",
        ],
    ),
    (
        "plumbing",
        "Plumbing",
        &[
            "plumber",
            "emergency plumber",
            "drain cleaning",
            "water heater repair",
            "leak detection",
            "sewer line repair",
        ],
    ),
    (
        "roofing",
        "Roofing",
        &[
            "roofing contractor",
            "roof repair",
            "roof replacement",
            "metal roofing",
            "storm damage roof repair",
        ],
    ),
    (
        "electrical",
        "Electrical",
        &[
            "electrician",
            "emergency electrician",
            "panel upgrade",
            "EV charger installation",
            "electrical repair",
        ],
    ),
];

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Completed research runs; cities and results are JSON arrays
        CREATE TABLE IF NOT EXISTS research_records (
            id TEXT PRIMARY KEY,
            title TEXT,
            industry TEXT NOT NULL,
            cities TEXT NOT NULL DEFAULT '[]',
            results TEXT NOT NULL DEFAULT '[]',
            keyword_count INTEGER NOT NULL DEFAULT 0,
            source TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_research_industry ON research_records(industry);
        CREATE INDEX IF NOT EXISTS idx_research_created_at ON research_records(created_at);

        -- Industry catalogue
        CREATE TABLE IF NOT EXISTS industries (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            label TEXT NOT NULL,
            keywords TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Application settings key-value store
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .await?;

    seed_industries(conn).await?;

    Ok(())
}

async fn seed_industries(conn: &Connection) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let mut seeded = 0;

    for (name, label, keywords) in DEFAULT_INDUSTRIES {
        seeded += conn
            .execute(
                r#"
                INSERT OR IGNORE INTO industries (id, name, label, keywords, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                "#,
                params![
                    format!("ind_{name}"),
                    *name,
                    *label,
                    serde_json::to_string(keywords)?,
                    now.clone(),
                ],
            )
            .await?;
    }

    if seeded > 0 {
        tracing::info!(count = seeded, "Seeded default industries");
    }

    Ok(())
}
