use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde_json::Value;

use crate::{models::database::Database, services::normalize::normalize_database};

/// Read the database file and normalize every record.
pub async fn read_database(path: &Path) -> anyhow::Result<Database> {
    let raw = read_raw(path).await?;
    Ok(normalize_database(&raw, Utc::now()))
}

/// Raw file contents, before any normalization.
pub async fn read_raw(path: &Path) -> anyhow::Result<Value> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = serde_json::from_str(&data)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(raw)
}

/// Normalize and write the database, replacing the file in one rename.
pub async fn write_database(path: &Path, db: &Database) -> anyhow::Result<Database> {
    let normalized = normalize_database(&serde_json::to_value(db)?, Utc::now());
    let body = serde_json::to_string_pretty(&normalized)?;

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    tracing::debug!(path = %path.display(), "database written");
    Ok(normalized)
}
