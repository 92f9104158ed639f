use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upstream_url: String,
    pub caller: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            upstream_url: std::env::var("UPSTREAM_URL")
                .context("Cannot load UPSTREAM_URL env variable")?,
            caller: std::env::var("UPSTREAM_CALLER").unwrap_or_else(|_| "admin".to_string()),
        })
    }
}
