// src/web/mod.rs

//! HTTP boundary: request extractors, input validation, handlers and the
//! route table.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod validation;
