use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde_json::{Map, Value};
use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file with the listings to load into the store
    pub seed_path: PathBuf,
    /// Raw search parameters, as a flat JSON object
    pub search_params: Map<String, Value>,
    /// Where matching listings are written
    pub output_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let raw_params = env::var("SEARCH_CRITERIA").unwrap_or_else(|_| "{}".to_string());
        let search_params = serde_json::from_str(&raw_params)
            .context("SEARCH_CRITERIA must be a JSON object")?;

        Ok(Self {
            seed_path: env::var("LISTINGS_SEED_PATH")
                .unwrap_or_else(|_| "listings.json".to_string())
                .into(),
            search_params,
            output_path: env::var("SEARCH_OUTPUT_PATH")
                .unwrap_or_else(|_| "search_results.json".to_string())
                .into(),
        })
    }
}
