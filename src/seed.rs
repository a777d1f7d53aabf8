// src/seed.rs

//! Startup seeding: the initial admin account and a small sample catalogue.
//! Runs only when SEED_DB=true, and is skipped entirely once the admin
//! account exists.

use tracing::{info, instrument, warn};

use crate::errors::Result;
use crate::models::Role;
use crate::repo::{NewSweet, NewUser};
use crate::services::auth_service;
use crate::state::AppState;

const ADMIN_EMAIL: &str = "admin@sweetflow.com";
const ADMIN_PASSWORD: &str = "admin123";

fn sample_sweets() -> Vec<NewSweet> {
  [
    ("Gulab Jamun", 50.0, 100),
    ("Rasgulla", 40.0, 80),
    ("Jalebi", 45.0, 60),
    ("Kaju Katli", 80.0, 50),
    ("Barfi", 55.0, 70),
  ]
  .into_iter()
  .map(|(name, price, quantity)| NewSweet {
    name: name.to_string(),
    category: "Indian".to_string(),
    price,
    quantity,
  })
  .collect()
}

#[instrument(name = "seed::run", skip(state))]
pub async fn run(state: &AppState) -> Result<()> {
  if state.users.find_by_email(ADMIN_EMAIL).await?.is_some() {
    info!("Admin user already exists; skipping seed.");
    return Ok(());
  }

  let password_hash = auth_service::hash_password(ADMIN_PASSWORD)?;
  let admin = state
    .users
    .insert(NewUser {
      email: ADMIN_EMAIL.to_string(),
      password_hash,
      role: Role::Admin,
    })
    .await?;
  info!(admin_id = %admin.id, email = ADMIN_EMAIL, "Admin user created.");
  warn!("Seeded admin uses the default password; change it after first login.");

  for sweet in sample_sweets() {
    let created = state.sweets.insert(sweet).await?;
    info!(sweet_id = %created.id, name = %created.name, "Sample sweet created.");
  }

  Ok(())
}
