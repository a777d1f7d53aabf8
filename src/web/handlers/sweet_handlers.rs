// src/web/handlers/sweet_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::repo::{NewSweet, SweetChanges, SweetFilter};
use crate::services::catalog_service;
use crate::state::AppState;
use crate::web::auth::{AdminUser, AuthenticatedUser};
use crate::web::validation;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct CreateSweetPayload {
  pub name: String,
  pub category: String,
  pub price: f64,
  pub quantity: i32,
}

impl CreateSweetPayload {
  fn validate(&self) -> Result<(), AppError> {
    validation::require_non_empty("name", &self.name)?;
    validation::require_non_empty("category", &self.category)?;
    validation::require_positive_price("price", self.price)?;
    validation::require_non_negative_quantity("quantity", self.quantity)?;
    Ok(())
  }
}

/// Partial update: absent fields are left untouched, not nulled.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateSweetPayload {
  pub name: Option<String>,
  pub category: Option<String>,
  pub price: Option<f64>,
  pub quantity: Option<i32>,
}

impl UpdateSweetPayload {
  fn validate(&self) -> Result<(), AppError> {
    if let Some(name) = &self.name {
      validation::require_non_empty("name", name)?;
    }
    if let Some(category) = &self.category {
      validation::require_non_empty("category", category)?;
    }
    if let Some(price) = self.price {
      validation::require_positive_price("price", price)?;
    }
    if let Some(quantity) = self.quantity {
      validation::require_non_negative_quantity("quantity", quantity)?;
    }
    Ok(())
  }

  fn into_changes(self) -> SweetChanges {
    SweetChanges {
      name: self.name,
      category: self.category,
      price: self.price,
      quantity: self.quantity,
    }
  }
}

/// Body for both stock mutations.
#[derive(Deserialize, Debug)]
pub struct StockAdjustmentPayload {
  pub quantity: i32,
}

impl StockAdjustmentPayload {
  fn validate(&self) -> Result<(), AppError> {
    validation::require_at_least_one("quantity", self.quantity)
  }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListSweetsQuery {
  pub name: Option<String>,
  pub category: Option<String>,
  pub min_price: Option<f64>,
  pub max_price: Option<f64>,
}

impl ListSweetsQuery {
  fn validate(&self) -> Result<(), AppError> {
    if let Some(min) = self.min_price {
      validation::require_non_negative_price("minPrice", min)?;
    }
    if let Some(max) = self.max_price {
      validation::require_non_negative_price("maxPrice", max)?;
    }
    Ok(())
  }

  fn into_filter(self) -> SweetFilter {
    SweetFilter {
      name: self.name,
      category: self.category,
      min_price: self.min_price,
      max_price: self.max_price,
    }
  }
}

// --- Handler Implementations ---

#[instrument(name = "handler::create_sweet", skip(app_state, req_payload, admin), fields(admin_id = %admin.0.id, name = %req_payload.name))]
pub async fn create_sweet_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateSweetPayload>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  req_payload.validate()?;
  let payload = req_payload.into_inner();

  let sweet = catalog_service::create(
    app_state.sweets.as_ref(),
    NewSweet {
      name: payload.name,
      category: payload.category,
      price: payload.price,
      quantity: payload.quantity,
    },
  )
  .await?;

  Ok(HttpResponse::Created().json(sweet))
}

#[instrument(name = "handler::list_sweets", skip(app_state, query))]
pub async fn list_sweets_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListSweetsQuery>,
) -> Result<HttpResponse, AppError> {
  query.validate()?;
  let filter = query.into_inner().into_filter();

  let sweets = catalog_service::find_all(app_state.sweets.as_ref(), &filter).await?;
  info!("Listed {} sweets.", sweets.len());

  Ok(HttpResponse::Ok().json(sweets))
}

#[instrument(name = "handler::get_sweet", skip(app_state, path), fields(sweet_id = %path.as_ref()))]
pub async fn get_sweet_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let sweet = catalog_service::find_one(app_state.sweets.as_ref(), path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(sweet))
}

#[instrument(name = "handler::update_sweet", skip(app_state, path, req_payload, admin), fields(admin_id = %admin.0.id, sweet_id = %path.as_ref()))]
pub async fn update_sweet_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<UpdateSweetPayload>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  req_payload.validate()?;

  let sweet = catalog_service::update(
    app_state.sweets.as_ref(),
    path.into_inner(),
    req_payload.into_inner().into_changes(),
  )
  .await?;

  Ok(HttpResponse::Ok().json(sweet))
}

#[instrument(name = "handler::delete_sweet", skip(app_state, path, admin), fields(admin_id = %admin.0.id, sweet_id = %path.as_ref()))]
pub async fn delete_sweet_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  catalog_service::remove(app_state.sweets.as_ref(), path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::purchase_sweet", skip(app_state, path, req_payload, buyer), fields(user_id = %buyer.id, sweet_id = %path.as_ref(), quantity = req_payload.quantity))]
pub async fn purchase_sweet_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<StockAdjustmentPayload>,
  buyer: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  req_payload.validate()?;

  let sweet = catalog_service::purchase(app_state.sweets.as_ref(), path.into_inner(), req_payload.quantity).await?;

  Ok(HttpResponse::Ok().json(sweet))
}

#[instrument(name = "handler::restock_sweet", skip(app_state, path, req_payload, admin), fields(admin_id = %admin.0.id, sweet_id = %path.as_ref(), quantity = req_payload.quantity))]
pub async fn restock_sweet_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<StockAdjustmentPayload>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  req_payload.validate()?;

  let sweet = catalog_service::restock(app_state.sweets.as_ref(), path.into_inner(), req_payload.quantity).await?;

  Ok(HttpResponse::Ok().json(sweet))
}
