//! Normalize the database file in place: canonical group labels, valid
//! statuses, defaults for missing fields. Unknown fields are preserved.
//!
//! Usage: fix-db [--path FILE] [--dry-run]
//!   --path FILE : Database file (defaults to DATABASE_PATH, then ./database.json)
//!   --dry-run   : Report what would change without writing

use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use barnehage::{config::Config, db, models::database::Database};

#[derive(Parser)]
#[command(name = "fix-db", about = "Normalize group labels and statuses in the database file")]
struct Args {
    #[arg(long)]
    path: Option<PathBuf>,

    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let path = match args.path {
        Some(p) => p,
        None => Config::from_env()?.database_path,
    };

    let raw = db::read_raw(&path).await?;
    let database = db::read_database(&path).await?;

    let relabeled = changed_children(&raw, &database, "group", |i| database.children[i].group.clone());
    let restatused = changed_children(&raw, &database, "status", |i| {
        database.children[i].status.to_string()
    });
    tracing::info!(
        path = %path.display(),
        children = database.children.len(),
        activities = database.activities.len(),
        groups_relabeled = relabeled,
        statuses_reset = restatused,
        "database normalized"
    );

    if args.dry_run {
        tracing::info!("Dry run, nothing written");
        return Ok(());
    }

    db::write_database(&path, &database).await?;
    tracing::info!("{} normalized and saved", path.display());
    Ok(())
}

/// How many stored children had `field` rewritten by normalization.
fn changed_children(
    raw: &Value,
    database: &Database,
    field: &str,
    normalized: impl Fn(usize) -> String,
) -> usize {
    let Some(rows) = raw.get("children").and_then(Value::as_array) else {
        return 0;
    };
    rows.iter()
        .filter(|row| row.is_object())
        .zip(0..database.children.len())
        .filter(|(row, i)| row.get(field).and_then(Value::as_str) != Some(normalized(*i).as_str()))
        .count()
}
