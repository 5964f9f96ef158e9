use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client;

const DEFAULT_CHROME_PATH: &str = "chromium";
const DEFAULT_PDF_SETTLE_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base URL that uploaded objects are served from.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub chrome_path: String,
    pub pdf_settle_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let s3_public_url = optional_env("S3_PUBLIC_URL").unwrap_or_else(|| {
            format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket)
        });

        let pdf_settle_secs = match optional_env("PDF_SETTLE_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("PDF_SETTLE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_PDF_SETTLE_SECS,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: optional_env("ANTHROPIC_API_URL")
                .unwrap_or_else(|| llm_client::ANTHROPIC_API_URL.to_string()),
            s3_bucket,
            s3_endpoint,
            s3_public_url,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            chrome_path: optional_env("CHROME_PATH")
                .unwrap_or_else(|| DEFAULT_CHROME_PATH.to_string()),
            pdf_settle_timeout: Duration::from_secs(pdf_settle_secs),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
