// tests/api_auth.rs

//! HTTP-level tests for the identity endpoints.

mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::{get, init_app, post_json, test_state};

#[actix_web::test]
async fn health_endpoint_is_unauthenticated() {
  let app = init_app(test_state()).await;

  let resp = get(&app, "/health").await;
  assert_eq!(resp.status(), 200);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn register_returns_the_user_without_password_material() {
  let app = init_app(test_state()).await;

  let resp = post_json(
    &app,
    "/auth/register",
    None,
    json!({"email": "mira@example.com", "password": "sugarplum"}),
  )
  .await;
  assert_eq!(resp.status(), 201);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["email"], "mira@example.com");
  assert_eq!(body["role"], "USER");
  assert!(body.get("password").is_none());
  assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn register_rejects_invalid_input() {
  let app = init_app(test_state()).await;

  let bad_email = post_json(
    &app,
    "/auth/register",
    None,
    json!({"email": "not-an-email", "password": "sugarplum"}),
  )
  .await;
  assert_eq!(bad_email.status(), 400);

  let short_password = post_json(
    &app,
    "/auth/register",
    None,
    json!({"email": "mira@example.com", "password": "12345"}),
  )
  .await;
  assert_eq!(short_password.status(), 400);
}

#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
  let app = init_app(test_state()).await;

  let first = post_json(
    &app,
    "/auth/register",
    None,
    json!({"email": "mira@example.com", "password": "sugarplum"}),
  )
  .await;
  assert_eq!(first.status(), 201);

  let second = post_json(
    &app,
    "/auth/register",
    None,
    json!({"email": "mira@example.com", "password": "otherpass"}),
  )
  .await;
  assert_eq!(second.status(), 409);

  let body: Value = test::read_body_json(second).await;
  assert_eq!(body["error"], "Email already exists");
}

#[actix_web::test]
async fn login_returns_a_token_and_the_user() {
  let app = init_app(test_state()).await;

  post_json(
    &app,
    "/auth/register",
    None,
    json!({"email": "mira@example.com", "password": "sugarplum"}),
  )
  .await;

  let resp = post_json(
    &app,
    "/auth/login",
    None,
    json!({"email": "mira@example.com", "password": "sugarplum"}),
  )
  .await;
  assert_eq!(resp.status(), 200);

  let body: Value = test::read_body_json(resp).await;
  assert!(!body["access_token"].as_str().unwrap().is_empty());
  assert_eq!(body["user"]["email"], "mira@example.com");
  assert!(body["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn bad_credentials_are_indistinguishable() {
  let app = init_app(test_state()).await;

  post_json(
    &app,
    "/auth/register",
    None,
    json!({"email": "mira@example.com", "password": "sugarplum"}),
  )
  .await;

  let wrong_password = post_json(
    &app,
    "/auth/login",
    None,
    json!({"email": "mira@example.com", "password": "wrong"}),
  )
  .await;
  let unknown_email = post_json(
    &app,
    "/auth/login",
    None,
    json!({"email": "ghost@example.com", "password": "sugarplum"}),
  )
  .await;

  assert_eq!(wrong_password.status(), 401);
  assert_eq!(unknown_email.status(), 401);

  let a: Value = test::read_body_json(wrong_password).await;
  let b: Value = test::read_body_json(unknown_email).await;
  assert_eq!(a, b, "both failures must look identical to the caller");
  assert_eq!(a["error"], "Invalid credentials");
}
