// src/services/token_service.rs

//! Signs and verifies the bearer tokens issued at login. The token is an
//! HS256 JWT whose claims carry the subject id, email and role; everything
//! downstream treats "authenticated identity + role" as a fact read from
//! these claims.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  /// Subject: the user id.
  pub sub: Uuid,
  pub email: String,
  pub role: Role,
  /// Issued-at, seconds since the epoch.
  pub iat: i64,
  /// Expiry, seconds since the epoch.
  pub exp: i64,
}

/// Issues a signed, time-limited token for `user`.
#[instrument(name = "token_service::issue", skip(user, secret), fields(user_id = %user.id))]
pub fn issue(user: &User, secret: &str, ttl_secs: i64) -> Result<String, AppError> {
  let now = Utc::now().timestamp();
  let claims = Claims {
    sub: user.id,
    email: user.email.clone(),
    role: user.role,
    iat: now,
    exp: now + ttl_secs,
  };

  encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).map_err(|e| {
    warn!(error = %e, "Failed to sign bearer token.");
    AppError::Internal(format!("Token signing failed: {}", e))
  })
}

/// Verifies signature and expiry, returning the embedded claims.
#[instrument(name = "token_service::verify", skip(token, secret))]
pub fn verify(token: &str, secret: &str) -> Result<Claims, AppError> {
  decode::<Claims>(
    token,
    &DecodingKey::from_secret(secret.as_bytes()),
    &Validation::default(),
  )
  .map(|data| {
    debug!(user_id = %data.claims.sub, "Bearer token verified.");
    data.claims
  })
  .map_err(|e| {
    debug!(error = %e, "Bearer token rejected.");
    AppError::Auth("Invalid or expired token".to_string())
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  fn sample_user(role: Role) -> User {
    let now = Utc::now();
    User {
      id: Uuid::new_v4(),
      email: "tester@sweetflow.com".to_string(),
      password_hash: "irrelevant".to_string(),
      role,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn issued_token_verifies_and_carries_identity() {
    let user = sample_user(Role::Admin);
    let token = issue(&user, "test-secret", 3600).unwrap();

    let claims = verify(&token, "test-secret").unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, Role::Admin);
    assert!(claims.exp > claims.iat);
  }

  #[test]
  fn wrong_secret_is_rejected() {
    let user = sample_user(Role::User);
    let token = issue(&user, "test-secret", 3600).unwrap();
    assert!(matches!(verify(&token, "other-secret"), Err(AppError::Auth(_))));
  }

  #[test]
  fn garbage_token_is_rejected() {
    assert!(matches!(verify("not.a.jwt", "test-secret"), Err(AppError::Auth(_))));
  }

  #[test]
  fn expired_token_is_rejected() {
    let user = sample_user(Role::User);
    // Far enough in the past to clear jsonwebtoken's default expiry leeway.
    let token = issue(&user, "test-secret", -120).unwrap();
    assert!(matches!(verify(&token, "test-secret"), Err(AppError::Auth(_))));
  }
}
