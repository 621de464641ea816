use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use barnehage::{
    config::Config,
    db,
    services::{groups::GroupService, stats::compute_stats, status::StatusService},
};

#[derive(Parser)]
#[command(name = "barnehage", about = "Inspect groups, statuses and attendance")]
struct Args {
    /// Database file (defaults to DATABASE_PATH, then ./database.json)
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the known groups with their themes
    Groups,
    /// Resolve a free-text group label
    Resolve { label: String },
    /// Validate and describe a status value (JSON literal or plain text)
    Status {
        value: String,
        #[arg(long, default_value = "Barnet")]
        name: String,
    },
    /// Attendance totals from the database file
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let output = match args.command {
        Command::Groups => serde_json::to_value(GroupService::list_all())?,
        Command::Resolve { label } => {
            let key = GroupService::resolve_key(&label);
            json!({
                "input": label,
                "slug": GroupService::normalize(&label),
                "key": key,
                "displayName": GroupService::display_name(label.as_str()),
                "theme": GroupService::theme(&label),
            })
        }
        Command::Status { value, name } => {
            let parsed = serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value));
            match StatusService::to_status(&parsed) {
                Some(status) => json!({
                    "valid": true,
                    "status": status,
                    "label": status.label(),
                    "description": status.description(&name),
                    "color": status.color(),
                }),
                None => json!({ "valid": false, "input": parsed }),
            }
        }
        Command::Stats => {
            let path = args.path.unwrap_or(config.database_path);
            let database = db::read_database(&path).await?;
            info!(path = %path.display(), children = database.children.len(), "database loaded");
            serde_json::to_value(compute_stats(&database))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
