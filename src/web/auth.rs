// src/web/auth.rs

//! Request extractors for the bearer-token guard. Token verification is the
//! only source of "who is calling": the claims carry id, email and role, and
//! handlers consume that as an injected fact.
//!
//! Guard ordering: `AuthenticatedUser` rejects with 401 before any role
//! check; `AdminUser` layers the 403 role check on top. Body validation
//! happens later, inside the handler.

use actix_web::{http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Role;
use crate::services::token_service;
use crate::state::AppState;

/// Identity extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub id: Uuid,
  pub email: String,
  pub role: Role,
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured".to_string()))?;

  let header_value = req
    .headers()
    .get(AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or_else(|| AppError::Auth("Missing bearer token".to_string()))?;

  let token = header_value
    .strip_prefix("Bearer ")
    .ok_or_else(|| AppError::Auth("Missing bearer token".to_string()))?;

  let claims = token_service::verify(token, &state.config.jwt_secret)?;
  Ok(AuthenticatedUser {
    id: claims.sub,
    email: claims.email,
    role: claims.role,
  })
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

/// An authenticated caller holding the ADMIN role. Fails with 401 when the
/// token is missing/invalid and with 403 when the role is wrong, in that
/// order.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequest for AdminUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(authenticate(req).and_then(|user| {
      if user.role == Role::Admin {
        Ok(AdminUser(user))
      } else {
        warn!(user_id = %user.id, "Rejected non-admin access to an admin route.");
        Err(AppError::Forbidden("Admin role required".to_string()))
      }
    }))
  }
}
