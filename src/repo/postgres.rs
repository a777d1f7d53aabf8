// src/repo/postgres.rs

//! Postgres adapters for the repository port, using runtime-checked queries
//! against the pool. Rows carrying a `role` column are read through a local
//! row struct and converted, so the domain `Role` enum never leaks a stringly
//! representation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{Role, Sweet, User};

use super::{NewSweet, NewUser, SweetChanges, SweetFilter, SweetRepository, UserRepository};

const USER_COLUMNS: &str = "id, email, password_hash, role, created_at, updated_at";
const SWEET_COLUMNS: &str = "id, name, category, price, quantity, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  role: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl UserRow {
  fn into_user(self) -> Result<User> {
    let role = Role::from_str(&self.role)
      .ok_or_else(|| AppError::Internal(format!("Unknown role '{}' stored for user {}", self.role, self.id)))?;
    Ok(User {
      id: self.id,
      email: self.email,
      password_hash: self.password_hash,
      role,
      created_at: self.created_at,
      updated_at: self.updated_at,
    })
  }
}

#[derive(Clone)]
pub struct PgUserRepository {
  pool: PgPool,
}

impl PgUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for PgUserRepository {
  async fn insert(&self, new_user: NewUser) -> Result<User> {
    let row: UserRow = sqlx::query_as(&format!(
      "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
    ))
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.role.as_str())
    .fetch_one(&self.pool)
    .await?;
    row.into_user()
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
      .bind(email)
      .fetch_optional(&self.pool)
      .await?;
    row.map(UserRow::into_user).transpose()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    row.map(UserRow::into_user).transpose()
  }
}

#[derive(Clone)]
pub struct PgSweetRepository {
  pool: PgPool,
}

impl PgSweetRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SweetRepository for PgSweetRepository {
  async fn insert(&self, new_sweet: NewSweet) -> Result<Sweet> {
    let sweet: Sweet = sqlx::query_as(&format!(
      "INSERT INTO sweets (name, category, price, quantity) VALUES ($1, $2, $3, $4) RETURNING {SWEET_COLUMNS}"
    ))
    .bind(&new_sweet.name)
    .bind(&new_sweet.category)
    .bind(new_sweet.price)
    .bind(new_sweet.quantity)
    .fetch_one(&self.pool)
    .await?;
    Ok(sweet)
  }

  async fn list(&self, filter: &SweetFilter) -> Result<Vec<Sweet>> {
    // NULL binds disable the corresponding clause, keeping this a single
    // prepared statement for every filter combination.
    let sweets: Vec<Sweet> = sqlx::query_as(&format!(
      "SELECT {SWEET_COLUMNS} FROM sweets \
       WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
         AND ($2::text IS NULL OR category ILIKE '%' || $2 || '%') \
         AND ($3::float8 IS NULL OR price >= $3) \
         AND ($4::float8 IS NULL OR price <= $4) \
       ORDER BY created_at DESC"
    ))
    .bind(filter.name.as_deref())
    .bind(filter.category.as_deref())
    .bind(filter.min_price)
    .bind(filter.max_price)
    .fetch_all(&self.pool)
    .await?;
    Ok(sweets)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Sweet>> {
    let sweet: Option<Sweet> = sqlx::query_as(&format!("SELECT {SWEET_COLUMNS} FROM sweets WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(sweet)
  }

  async fn update(&self, id: Uuid, changes: SweetChanges) -> Result<Option<Sweet>> {
    let sweet: Option<Sweet> = sqlx::query_as(&format!(
      "UPDATE sweets SET \
         name = COALESCE($2, name), \
         category = COALESCE($3, category), \
         price = COALESCE($4, price), \
         quantity = COALESCE($5, quantity), \
         updated_at = now() \
       WHERE id = $1 RETURNING {SWEET_COLUMNS}"
    ))
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.category.as_deref())
    .bind(changes.price)
    .bind(changes.quantity)
    .fetch_optional(&self.pool)
    .await?;
    Ok(sweet)
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM sweets WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn decrement_quantity(&self, id: Uuid, amount: i32) -> Result<Option<Sweet>> {
    // The quantity guard is part of the UPDATE predicate: the check and the
    // write are one atomic statement, so concurrent purchases cannot
    // double-spend the same stock.
    let sweet: Option<Sweet> = sqlx::query_as(&format!(
      "UPDATE sweets SET quantity = quantity - $2, updated_at = now() \
       WHERE id = $1 AND quantity >= $2 RETURNING {SWEET_COLUMNS}"
    ))
    .bind(id)
    .bind(amount)
    .fetch_optional(&self.pool)
    .await?;
    Ok(sweet)
  }

  async fn increment_quantity(&self, id: Uuid, amount: i32) -> Result<Option<Sweet>> {
    // Same shape as the decrement guard: the addition only happens when the
    // result still fits the integer counter.
    let sweet: Option<Sweet> = sqlx::query_as(&format!(
      "UPDATE sweets SET quantity = quantity + $2, updated_at = now() \
       WHERE id = $1 AND quantity <= 2147483647 - $2 RETURNING {SWEET_COLUMNS}"
    ))
    .bind(id)
    .bind(amount)
    .fetch_optional(&self.pool)
    .await?;
    Ok(sweet)
  }
}
