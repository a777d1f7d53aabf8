// src/services/catalog_service.rs

//! Catalogue operations: CRUD plus the two stock mutations. Every mutating
//! operation starts with a lookup so an unknown id surfaces as the same
//! NotFound everywhere.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::Sweet;
use crate::repo::{NewSweet, SweetChanges, SweetFilter, SweetRepository};

fn not_found(id: Uuid) -> AppError {
  AppError::NotFound(format!("Sweet with ID {} not found", id))
}

#[instrument(name = "catalog_service::create", skip(sweets, new_sweet), fields(name = %new_sweet.name))]
pub async fn create(sweets: &dyn SweetRepository, new_sweet: NewSweet) -> Result<Sweet> {
  let sweet = sweets.insert(new_sweet).await?;
  info!(sweet_id = %sweet.id, "Sweet created.");
  Ok(sweet)
}

/// Lists the catalogue, newest first, restricted by the conjunctive filter.
#[instrument(name = "catalog_service::find_all", skip(sweets, filter))]
pub async fn find_all(sweets: &dyn SweetRepository, filter: &SweetFilter) -> Result<Vec<Sweet>> {
  sweets.list(filter).await
}

#[instrument(name = "catalog_service::find_one", skip(sweets))]
pub async fn find_one(sweets: &dyn SweetRepository, id: Uuid) -> Result<Sweet> {
  sweets.find_by_id(id).await?.ok_or_else(|| not_found(id))
}

/// Applies only the supplied fields; absent fields are left untouched.
#[instrument(name = "catalog_service::update", skip(sweets, changes))]
pub async fn update(sweets: &dyn SweetRepository, id: Uuid, changes: SweetChanges) -> Result<Sweet> {
  find_one(sweets, id).await?;
  sweets.update(id, changes).await?.ok_or_else(|| not_found(id))
}

/// Deletes unconditionally once the record is known to exist.
#[instrument(name = "catalog_service::remove", skip(sweets))]
pub async fn remove(sweets: &dyn SweetRepository, id: Uuid) -> Result<()> {
  find_one(sweets, id).await?;
  if !sweets.delete(id).await? {
    return Err(not_found(id));
  }
  info!(sweet_id = %id, "Sweet deleted.");
  Ok(())
}

/// Decreases stock by `quantity` for any authenticated user.
///
/// The pre-read drives the error messages; the decrement itself is a guarded
/// store operation, so a concurrent purchase can never push the quantity
/// below zero. If the guarded write loses such a race, the state is re-read
/// and reported with the now-current numbers.
#[instrument(name = "catalog_service::purchase", skip(sweets))]
pub async fn purchase(sweets: &dyn SweetRepository, id: Uuid, quantity: i32) -> Result<Sweet> {
  let sweet = find_one(sweets, id).await?;

  if sweet.quantity == 0 {
    warn!(sweet_id = %id, "Purchase rejected: out of stock.");
    return Err(AppError::Stock("Sweet is out of stock".to_string()));
  }
  if quantity > sweet.quantity {
    warn!(sweet_id = %id, available = sweet.quantity, requested = quantity, "Purchase rejected: insufficient quantity.");
    return Err(AppError::Stock(format!(
      "Insufficient quantity. Available: {}, Requested: {}",
      sweet.quantity, quantity
    )));
  }

  match sweets.decrement_quantity(id, quantity).await? {
    Some(updated) => {
      info!(sweet_id = %id, remaining = updated.quantity, "Purchase completed.");
      Ok(updated)
    }
    None => {
      // Stock moved between the read and the guarded write.
      let current = find_one(sweets, id).await?;
      if current.quantity == 0 {
        Err(AppError::Stock("Sweet is out of stock".to_string()))
      } else {
        Err(AppError::Stock(format!(
          "Insufficient quantity. Available: {}, Requested: {}",
          current.quantity, quantity
        )))
      }
    }
  }
}

fn restock_overflow() -> AppError {
  AppError::Validation("Restock exceeds the maximum supported quantity".to_string())
}

/// Increases stock by `quantity`, bounded only by the capacity of the stock
/// counter. The quantity >= 1 floor is guaranteed by boundary validation and
/// not re-checked here.
#[instrument(name = "catalog_service::restock", skip(sweets))]
pub async fn restock(sweets: &dyn SweetRepository, id: Uuid, quantity: i32) -> Result<Sweet> {
  let sweet = find_one(sweets, id).await?;

  if sweet.quantity.checked_add(quantity).is_none() {
    warn!(sweet_id = %id, on_hand = sweet.quantity, requested = quantity, "Restock rejected: counter overflow.");
    return Err(restock_overflow());
  }

  match sweets.increment_quantity(id, quantity).await? {
    Some(updated) => {
      info!(sweet_id = %id, on_hand = updated.quantity, "Restock completed.");
      Ok(updated)
    }
    None => {
      // Stock moved between the read and the guarded write.
      find_one(sweets, id).await?;
      Err(restock_overflow())
    }
  }
}
