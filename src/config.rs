//! Environment-driven configuration, read once at startup.
//!
//! `DATABASE_URL` is required; everything else has a sensible default so a
//! bare `.env` is enough for local development.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL (e.g. "sqlite:data/verso.db").
    pub database_url: String,
    /// Host address the server binds to.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }
}
