// src/models/mod.rs

//! Contains data structures representing database entities.

// Declare child modules for each model
pub mod sweet;
pub mod user;

// Re-export the model structs for convenient access
pub use sweet::Sweet;
pub use user::{Role, User};
