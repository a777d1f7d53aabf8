// src/repo/memory.rs

//! In-memory adapters for the repository port. Backed by `parking_lot`
//! locks; every method takes the lock for the whole read-or-write, so the
//! stock guard in `decrement_quantity` is atomic here just as it is in the
//! Postgres adapter.
//!
//! Used by the test suite and by server runs without a `DATABASE_URL`.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Sweet, User};

use super::{NewSweet, NewUser, SweetChanges, SweetFilter, SweetRepository, UserRepository};

/// Shared backing storage. Records are kept in insertion order, which for
/// `created_at` (assigned at insert) is also creation order.
#[derive(Default)]
pub struct InMemoryStore {
  users: RwLock<Vec<User>>,
  sweets: RwLock<Vec<Sweet>>,
}

impl InMemoryStore {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }
}

#[derive(Clone)]
pub struct InMemoryUserRepository {
  store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
  pub fn new(store: Arc<InMemoryStore>) -> Self {
    Self { store }
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn insert(&self, new_user: NewUser) -> Result<User> {
    let now = Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      email: new_user.email,
      password_hash: new_user.password_hash,
      role: new_user.role,
      created_at: now,
      updated_at: now,
    };
    self.store.users.write().push(user.clone());
    Ok(user)
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.store.users.read().iter().find(|u| u.email == email).cloned())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
    Ok(self.store.users.read().iter().find(|u| u.id == id).cloned())
  }
}

#[derive(Clone)]
pub struct InMemorySweetRepository {
  store: Arc<InMemoryStore>,
}

impl InMemorySweetRepository {
  pub fn new(store: Arc<InMemoryStore>) -> Self {
    Self { store }
  }
}

fn matches(sweet: &Sweet, filter: &SweetFilter) -> bool {
  if let Some(name) = &filter.name {
    if !sweet.name.to_lowercase().contains(&name.to_lowercase()) {
      return false;
    }
  }
  if let Some(category) = &filter.category {
    if !sweet.category.to_lowercase().contains(&category.to_lowercase()) {
      return false;
    }
  }
  if let Some(min) = filter.min_price {
    if sweet.price < min {
      return false;
    }
  }
  if let Some(max) = filter.max_price {
    if sweet.price > max {
      return false;
    }
  }
  true
}

#[async_trait]
impl SweetRepository for InMemorySweetRepository {
  async fn insert(&self, new_sweet: NewSweet) -> Result<Sweet> {
    let now = Utc::now();
    let sweet = Sweet {
      id: Uuid::new_v4(),
      name: new_sweet.name,
      category: new_sweet.category,
      price: new_sweet.price,
      quantity: new_sweet.quantity,
      created_at: now,
      updated_at: now,
    };
    self.store.sweets.write().push(sweet.clone());
    Ok(sweet)
  }

  async fn list(&self, filter: &SweetFilter) -> Result<Vec<Sweet>> {
    // Insertion order is creation order; reversing yields created_at DESC.
    Ok(
      self
        .store
        .sweets
        .read()
        .iter()
        .rev()
        .filter(|s| matches(s, filter))
        .cloned()
        .collect(),
    )
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Sweet>> {
    Ok(self.store.sweets.read().iter().find(|s| s.id == id).cloned())
  }

  async fn update(&self, id: Uuid, changes: SweetChanges) -> Result<Option<Sweet>> {
    let mut sweets = self.store.sweets.write();
    let Some(sweet) = sweets.iter_mut().find(|s| s.id == id) else {
      return Ok(None);
    };
    if let Some(name) = changes.name {
      sweet.name = name;
    }
    if let Some(category) = changes.category {
      sweet.category = category;
    }
    if let Some(price) = changes.price {
      sweet.price = price;
    }
    if let Some(quantity) = changes.quantity {
      sweet.quantity = quantity;
    }
    sweet.updated_at = Utc::now();
    Ok(Some(sweet.clone()))
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let mut sweets = self.store.sweets.write();
    let before = sweets.len();
    sweets.retain(|s| s.id != id);
    Ok(sweets.len() < before)
  }

  async fn decrement_quantity(&self, id: Uuid, amount: i32) -> Result<Option<Sweet>> {
    let mut sweets = self.store.sweets.write();
    let Some(sweet) = sweets.iter_mut().find(|s| s.id == id) else {
      return Ok(None);
    };
    if sweet.quantity < amount {
      return Ok(None);
    }
    sweet.quantity -= amount;
    sweet.updated_at = Utc::now();
    Ok(Some(sweet.clone()))
  }

  async fn increment_quantity(&self, id: Uuid, amount: i32) -> Result<Option<Sweet>> {
    let mut sweets = self.store.sweets.write();
    let Some(sweet) = sweets.iter_mut().find(|s| s.id == id) else {
      return Ok(None);
    };
    let Some(new_quantity) = sweet.quantity.checked_add(amount) else {
      return Ok(None);
    };
    sweet.quantity = new_quantity;
    sweet.updated_at = Utc::now();
    Ok(Some(sweet.clone()))
  }
}
