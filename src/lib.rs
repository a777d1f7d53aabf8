// src/lib.rs

//! SweetFlow: a sweets-inventory REST backend.
//!
//! Two components sit behind the HTTP boundary:
//!  - Identity: registration and login, issuing role-carrying bearer tokens.
//!  - Catalog: CRUD over sweets plus the purchase/restock stock mutations.
//!
//! Persistence is a port (`repo`) with Postgres and in-memory adapters;
//! business logic lives in `services` and is store-agnostic.

pub mod config;
pub mod errors;
pub mod models;
pub mod repo;
pub mod seed;
pub mod services;
pub mod state;
pub mod web;
