// src/state.rs

use crate::config::AppConfig;
use crate::repo::{
  InMemoryStore, InMemorySweetRepository, InMemoryUserRepository, PgSweetRepository, PgUserRepository,
  SweetRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state. Handlers reach persistence only through the
/// repository trait objects, so the store backing a request is invisible to
/// the rest of the stack.
#[derive(Clone)]
pub struct AppState {
  pub users: Arc<dyn UserRepository>,
  pub sweets: Arc<dyn SweetRepository>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Production wiring over a Postgres pool.
  pub fn postgres(pool: PgPool, config: Arc<AppConfig>) -> Self {
    Self {
      users: Arc::new(PgUserRepository::new(pool.clone())),
      sweets: Arc::new(PgSweetRepository::new(pool)),
      config,
    }
  }

  /// In-process wiring; used when no DATABASE_URL is configured and by the
  /// test suite.
  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    let store = InMemoryStore::new();
    Self {
      users: Arc::new(InMemoryUserRepository::new(store.clone())),
      sweets: Arc::new(InMemorySweetRepository::new(store)),
      config,
    }
  }
}
