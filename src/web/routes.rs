// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{auth_handlers, sweet_handlers};

// Liveness probe; deliberately does not touch the store.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Route table. Auth and role requirements live in the handler signatures
/// (`AuthenticatedUser` / `AdminUser` extractors), so this stays a plain map
/// of paths to handlers.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/auth")
        .route("/register", web::post().to(auth_handlers::register_handler))
        .route("/login", web::post().to(auth_handlers::login_handler)),
    )
    .service(
      web::scope("/sweets")
        .route("", web::post().to(sweet_handlers::create_sweet_handler))
        .route("", web::get().to(sweet_handlers::list_sweets_handler))
        .route("/{id}", web::get().to(sweet_handlers::get_sweet_handler))
        .route("/{id}", web::patch().to(sweet_handlers::update_sweet_handler))
        .route("/{id}", web::delete().to(sweet_handlers::delete_sweet_handler))
        .route("/{id}/purchase", web::post().to(sweet_handlers::purchase_sweet_handler))
        .route("/{id}/restock", web::post().to(sweet_handlers::restock_sweet_handler)),
    );
}
