use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::utils::letters::{default_excluded_characters, split_characters};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub guess: GuessConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuessConfig {
    /// Characters excluded from every guess unless disabled per call
    pub excluded_characters: Vec<String>,
    /// How many words `read` and `guess` print by default
    pub result_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://wordle_helper.db".to_string()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
        };

        let guess = GuessConfig {
            excluded_characters: env::var("EXCLUDED_CHARACTERS")
                .map(|raw| split_characters(&raw))
                .unwrap_or_else(|_| default_excluded_characters()),
            result_limit: env::var("RESULT_LIMIT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("RESULT_LIMIT must be a number")?,
        };

        Ok(Config { database, guess })
    }

    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}
