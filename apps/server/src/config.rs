use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server configuration loaded from environment variables.
/// Every field has a default, so an empty environment serves `index.html`
/// and `public/` from the working directory on localhost:8001.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub index_file: PathBuf,
    pub public_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            host: var("HOST", "localhost"),
            port: var("PORT", "8001")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            index_file: PathBuf::from(var("INDEX_FILE", "index.html")),
            public_dir: PathBuf::from(var("PUBLIC_DIR", "public")),
            rust_log: var("RUST_LOG", "info"),
        })
    }
}
