use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "database.json".into())
                .into(),
        })
    }
}
