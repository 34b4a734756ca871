//! Server configuration from environment variables

use anyhow::{Context, Result};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS '{}'", value))?,
            None => 10,
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid PORT '{}'", value))?,
            None => 3000,
        };

        Ok(Self {
            database_url,
            max_connections,
            host,
            port,
        })
    }

    /// Address to bind the HTTP listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
