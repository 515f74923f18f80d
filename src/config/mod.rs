//! Configuration management for the clubmail backend

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// SMTP account identifier (the association's own inbox)
    pub email_user: Option<String>,
    /// SMTP secret token (app password)
    pub email_pass: Option<String>,
    /// Deployment environment ("production" hides raw error detail)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("HTTP_PORT must be a valid port number")?,
            email_user: env::var("EMAIL_USER").ok().filter(|v| !v.is_empty()),
            email_pass: env::var("EMAIL_PASS").ok().filter(|v| !v.is_empty()),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Address the HTTP server binds to
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether raw provider error detail may appear in responses
    pub fn expose_error_details(&self) -> bool {
        !self.is_production()
    }
}
