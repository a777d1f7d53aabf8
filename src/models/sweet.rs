// src/models/sweet.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A catalogue record. `quantity` is the on-hand stock and must never go
/// negative; `price` is positive at creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sweet {
  pub id: Uuid,
  pub name: String,
  pub category: String,
  pub price: f64,
  pub quantity: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
