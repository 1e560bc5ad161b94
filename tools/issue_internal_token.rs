//! Emite un token de usuario interno para el circuito `?internal=true`.
//!
//! Uso: issue_internal_token <usuario>
//! Lee JWT_SECRET y JWT_EXPIRATION del entorno (o de `.env`).

use anyhow::{bail, Result};
use dotenvy::dotenv;
use std::env;

use company_portal::config::EnvironmentConfig;
use company_portal::utils::jwt::{generate_internal_token, JwtConfig};

fn main() -> Result<()> {
    dotenv().ok();

    let Some(username) = env::args().nth(1).filter(|u| !u.trim().is_empty()) else {
        bail!("uso: issue_internal_token <usuario>");
    };

    let config = EnvironmentConfig::from_env()?;
    let token = generate_internal_token(username.trim(), &JwtConfig::from(&config))?;

    eprintln!(
        "🔑 Token interno para '{}' (expira en {}s)",
        username.trim(),
        config.jwt_expiration
    );
    println!("{}", token);
    Ok(())
}
