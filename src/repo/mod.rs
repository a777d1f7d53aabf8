// src/repo/mod.rs

//! Persistence port. Business logic never touches the store directly: it
//! talks to these traits, which are implemented by the Postgres adapter for
//! production and by the in-memory adapter for tests and database-less runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Role, Sweet, User};

pub use memory::{InMemoryStore, InMemorySweetRepository, InMemoryUserRepository};
pub use postgres::{PgSweetRepository, PgUserRepository};

/// Fields needed to persist a new identity record.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email: String,
  pub password_hash: String,
  pub role: Role,
}

/// Fields needed to persist a new catalogue record.
#[derive(Debug, Clone)]
pub struct NewSweet {
  pub name: String,
  pub category: String,
  pub price: f64,
  pub quantity: i32,
}

/// Partial update. `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default)]
pub struct SweetChanges {
  pub name: Option<String>,
  pub category: Option<String>,
  pub price: Option<f64>,
  pub quantity: Option<i32>,
}

/// Conjunctive catalogue filter. Absent members impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct SweetFilter {
  /// Case-insensitive substring match on the name.
  pub name: Option<String>,
  /// Case-insensitive substring match on the category.
  pub category: Option<String>,
  /// Inclusive lower bound on price.
  pub min_price: Option<f64>,
  /// Inclusive upper bound on price.
  pub max_price: Option<f64>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn insert(&self, new_user: NewUser) -> Result<User>;

  async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

#[async_trait]
pub trait SweetRepository: Send + Sync {
  async fn insert(&self, new_sweet: NewSweet) -> Result<Sweet>;

  /// Returns every record matching `filter`, most recently created first.
  async fn list(&self, filter: &SweetFilter) -> Result<Vec<Sweet>>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Sweet>>;

  /// Applies the supplied fields only. `None` when the id is unknown.
  async fn update(&self, id: Uuid, changes: SweetChanges) -> Result<Option<Sweet>>;

  /// Returns whether a record was deleted.
  async fn delete(&self, id: Uuid) -> Result<bool>;

  /// Atomically subtracts `amount` from the stock, but only when the record
  /// exists and currently holds at least `amount`. Returns the updated
  /// record, or `None` when the guard failed. The guard and the write happen
  /// as one store operation, so the quantity can never go negative even
  /// under concurrent purchases.
  async fn decrement_quantity(&self, id: Uuid, amount: i32) -> Result<Option<Sweet>>;

  /// Adds `amount` to the stock, guarded so the counter never exceeds
  /// `i32::MAX`. Returns the updated record, or `None` when the id is
  /// unknown or the addition would overflow the counter. Like the decrement
  /// guard, the check and the write happen as one store operation.
  async fn increment_quantity(&self, id: Uuid, amount: i32) -> Result<Option<Sweet>>;
}
