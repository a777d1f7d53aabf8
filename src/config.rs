// src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Connection string for the Postgres store. When absent the server runs
  /// against the in-memory store (useful for local runs and tests).
  pub database_url: Option<String>,

  /// HMAC secret for signing bearer tokens.
  pub jwt_secret: String,
  /// Token lifetime in seconds.
  pub jwt_ttl_secs: i64,

  /// Seed the admin account and sample catalogue on startup.
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let database_url = env::var("DATABASE_URL").ok();

    let jwt_secret = get_env("JWT_SECRET")?;
    if jwt_secret.is_empty() {
      return Err(AppError::Config("JWT_SECRET must not be empty".to_string()));
    }
    let jwt_ttl_secs = get_env("JWT_TTL_SECS")
      .unwrap_or_else(|_| "86400".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid JWT_TTL_SECS: {}", e)))?;

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      jwt_secret,
      jwt_ttl_secs,
      seed_db,
    })
  }
}
