// tests/common/mod.rs

//! Shared helpers for the HTTP-level test suites. Every test drives the full
//! actix `App` against the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use serde_json::Value;

use sweetflow::config::AppConfig;
use sweetflow::state::AppState;
use sweetflow::web::routes;

pub const JWT_SECRET: &str = "integration-test-secret";

/// The service produced by `init_app`, spelled once as a trait so helper
/// signatures stay short.
pub trait TestApp:
  Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
}

impl<S> TestApp for S where
  S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
}

pub fn test_config() -> Arc<AppConfig> {
  Arc::new(AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: None,
    jwt_secret: JWT_SECRET.to_string(),
    jwt_ttl_secs: 3600,
    seed_db: false,
  })
}

pub fn test_state() -> AppState {
  AppState::in_memory(test_config())
}

pub async fn init_app(state: AppState) -> impl TestApp {
  test::init_service(
    App::new()
      .app_data(web::Data::new(state))
      .configure(routes::configure_app_routes),
  )
  .await
}

fn with_bearer(req: test::TestRequest, token: Option<&str>) -> test::TestRequest {
  match token {
    Some(t) => req.insert_header(("Authorization", format!("Bearer {}", t))),
    None => req,
  }
}

pub async fn post_json(
  app: &impl TestApp,
  uri: &str,
  token: Option<&str>,
  body: Value,
) -> ServiceResponse<BoxBody> {
  let req = with_bearer(test::TestRequest::post().uri(uri), token).set_json(&body);
  test::call_service(app, req.to_request()).await
}

pub async fn patch_json(
  app: &impl TestApp,
  uri: &str,
  token: Option<&str>,
  body: Value,
) -> ServiceResponse<BoxBody> {
  let req = with_bearer(test::TestRequest::patch().uri(uri), token).set_json(&body);
  test::call_service(app, req.to_request()).await
}

pub async fn get(
  app: &impl TestApp,
  uri: &str,
) -> ServiceResponse<BoxBody> {
  test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await
}

pub async fn delete(
  app: &impl TestApp,
  uri: &str,
  token: Option<&str>,
) -> ServiceResponse<BoxBody> {
  let req = with_bearer(test::TestRequest::delete().uri(uri), token);
  test::call_service(app, req.to_request()).await
}

/// Registers an account and logs it in, returning the bearer token.
pub async fn register_and_login(
  app: &impl TestApp,
  email: &str,
  password: &str,
) -> String {
  let resp = post_json(
    app,
    "/auth/register",
    None,
    serde_json::json!({"email": email, "password": password}),
  )
  .await;
  assert_eq!(resp.status(), 201, "registration should succeed for {}", email);

  login_token(app, email, password).await
}

pub async fn login_token(
  app: &impl TestApp,
  email: &str,
  password: &str,
) -> String {
  let resp = post_json(
    app,
    "/auth/login",
    None,
    serde_json::json!({"email": email, "password": password}),
  )
  .await;
  assert_eq!(resp.status(), 200, "login should succeed for {}", email);

  let body: Value = test::read_body_json(resp).await;
  body["access_token"].as_str().expect("access_token in login body").to_string()
}

/// Token for the seeded admin account. The state must have been seeded.
pub async fn admin_token(
  app: &impl TestApp,
) -> String {
  login_token(app, "admin@sweetflow.com", "admin123").await
}
