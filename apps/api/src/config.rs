use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults match a local development run.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// JSON array of headline templates replacing the built-in list.
    pub templates_file: Option<PathBuf>,
    /// Fixed seed for reproducible output; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            templates_file: optional_env("HEADLINE_TEMPLATES_FILE").map(PathBuf::from),
            rng_seed: optional_env("RNG_SEED")
                .map(|raw| raw.parse::<u64>())
                .transpose()
                .context("RNG_SEED must be an unsigned 64-bit integer")?,
        })
    }
}

/// Reads a variable, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
