// src/services/identity_service.rs

//! Registration and login. The store is an injected collaborator so the
//! same logic runs against Postgres in production and the in-memory adapter
//! in tests.

use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{Role, User};
use crate::repo::{NewUser, UserRepository};
use crate::services::{auth_service, token_service};

/// Successful login: a signed bearer token plus the authenticated user.
#[derive(Debug)]
pub struct LoginOutcome {
  pub access_token: String,
  pub user: User,
}

/// Creates a new account with role USER.
///
/// The duplicate check is an existence lookup before the insert, mirroring
/// the caller-visible Conflict behavior; the store's unique index on email
/// remains as a backstop.
#[instrument(name = "identity_service::register", skip(users, password), fields(email = %email))]
pub async fn register(users: &dyn UserRepository, email: &str, password: &str) -> Result<User> {
  if users.find_by_email(email).await?.is_some() {
    warn!("Attempt to register with existing email.");
    return Err(AppError::Conflict("Email already exists".to_string()));
  }

  let password_hash = auth_service::hash_password(password)?;

  let user = users
    .insert(NewUser {
      email: email.to_string(),
      password_hash,
      role: Role::User, // Fixed default; no endpoint creates an admin.
    })
    .await?;

  info!(user_id = %user.id, "User registered successfully.");
  Ok(user)
}

/// Authenticates by email and password and issues a bearer token.
///
/// Unknown email and wrong password produce the identical Unauthorized
/// outcome, so callers cannot probe which accounts exist.
#[instrument(name = "identity_service::login", skip(users, jwt_secret, password), fields(email = %email))]
pub async fn login(
  users: &dyn UserRepository,
  jwt_secret: &str,
  jwt_ttl_secs: i64,
  email: &str,
  password: &str,
) -> Result<LoginOutcome> {
  let invalid_credentials = || AppError::Auth("Invalid credentials".to_string());

  let user = users.find_by_email(email).await?.ok_or_else(invalid_credentials)?;

  if !auth_service::verify_password(&user.password_hash, password)? {
    warn!(user_id = %user.id, "Login failed: password mismatch.");
    return Err(invalid_credentials());
  }

  let access_token = token_service::issue(&user, jwt_secret, jwt_ttl_secs)?;

  info!(user_id = %user.id, "Login successful.");
  Ok(LoginOutcome { access_token, user })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::repo::{InMemoryStore, InMemoryUserRepository};
  use crate::services::token_service;

  fn users() -> InMemoryUserRepository {
    InMemoryUserRepository::new(InMemoryStore::new())
  }

  #[tokio::test]
  async fn register_stores_a_hashed_password_with_role_user() {
    let repo = users();
    let user = register(&repo, "mira@example.com", "sugarplum").await.unwrap();

    assert_eq!(user.email, "mira@example.com");
    assert_eq!(user.role, Role::User);
    assert_ne!(user.password_hash, "sugarplum");

    // Serialized form must never contain password material.
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
  }

  #[tokio::test]
  async fn duplicate_email_is_a_conflict_and_does_not_add_a_record() {
    let repo = users();
    register(&repo, "mira@example.com", "sugarplum").await.unwrap();

    let second = register(&repo, "mira@example.com", "different").await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    // Still exactly one matching account.
    let found = repo.find_by_email("mira@example.com").await.unwrap().unwrap();
    assert!(auth_service::verify_password(&found.password_hash, "sugarplum").unwrap());
  }

  #[tokio::test]
  async fn login_issues_a_token_embedding_the_stored_role() {
    let repo = users();
    register(&repo, "mira@example.com", "sugarplum").await.unwrap();

    let outcome = login(&repo, "s3cret", 3600, "mira@example.com", "sugarplum")
      .await
      .unwrap();
    let claims = token_service::verify(&outcome.access_token, "s3cret").unwrap();
    assert_eq!(claims.sub, outcome.user.id);
    assert_eq!(claims.role, Role::User);
  }

  #[tokio::test]
  async fn unknown_email_and_wrong_password_fail_identically() {
    let repo = users();
    register(&repo, "mira@example.com", "sugarplum").await.unwrap();

    let unknown = login(&repo, "s3cret", 3600, "nobody@example.com", "sugarplum").await;
    let mismatch = login(&repo, "s3cret", 3600, "mira@example.com", "wrong").await;

    let message = |r: Result<LoginOutcome>| match r {
      Err(AppError::Auth(m)) => m,
      other => panic!("expected Auth error, got {:?}", other.map(|o| o.user.email)),
    };
    assert_eq!(message(unknown), message(mismatch));
  }
}
