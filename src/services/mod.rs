// src/services/mod.rs

//! Business logic. Handlers call into these modules; persistence goes
//! through the repository port, never through the pool directly.

pub mod auth_service;
pub mod catalog_service;
pub mod identity_service;
pub mod token_service;
