// src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

use sweetflow::config::AppConfig;
use sweetflow::state::AppState;
use sweetflow::web::routes;
use sweetflow::seed;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting SweetFlow server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // Select the store: Postgres when configured, in-memory otherwise.
  let app_state = match &app_config.database_url {
    Some(database_url) => {
      let db_pool = match PgPool::connect(database_url).await {
        Ok(pool) => {
          tracing::info!("Successfully connected to the database.");
          pool
        }
        Err(e) => {
          tracing::error!(error = %e, "Failed to connect to the database.");
          panic!("Database connection error: {}", e);
        }
      };

      if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!(error = %e, "Failed to run database migrations.");
        panic!("Migration error: {}", e);
      }

      AppState::postgres(db_pool, app_config.clone())
    }
    None => {
      tracing::warn!("DATABASE_URL not set; using the in-memory store. State is lost on shutdown.");
      AppState::in_memory(app_config.clone())
    }
  };

  // Seed database if configured
  if app_config.seed_db {
    if let Err(e) = seed::run(&app_state).await {
      tracing::error!(error = %e, "Failed to seed database.");
    }
  }

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
