// src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::identity_service;
use crate::state::AppState;
use crate::web::validation;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct RegisterRequestPayload {
  pub email: String,
  pub password: String,
}

impl RegisterRequestPayload {
  fn validate(&self) -> Result<(), AppError> {
    validation::require_valid_email(&self.email)?;
    validation::require_min_length("password", &self.password, 6)?;
    Ok(())
  }
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub email: String,
  pub password: String,
}

impl LoginRequestPayload {
  fn validate(&self) -> Result<(), AppError> {
    validation::require_valid_email(&self.email)?;
    Ok(())
  }
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::register",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RegisterRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Registration attempt.");
  req_payload.validate()?;

  let user = identity_service::register(app_state.users.as_ref(), &req_payload.email, &req_payload.password).await?;

  // The User serializer strips the password hash.
  Ok(HttpResponse::Created().json(user))
}

#[instrument(
    name = "handler::login",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Login attempt.");
  req_payload.validate()?;

  let outcome = identity_service::login(
    app_state.users.as_ref(),
    &app_state.config.jwt_secret,
    app_state.config.jwt_ttl_secs,
    &req_payload.email,
    &req_payload.password,
  )
  .await?;

  Ok(HttpResponse::Ok().json(json!({
      "access_token": outcome.access_token,
      "user": outcome.user,
  })))
}
