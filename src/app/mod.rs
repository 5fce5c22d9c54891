//! Application setup and runtime.

use crate::{db, http};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::net::SocketAddr;
use tracing::info;

/// Identity stamped onto every email created through the API.
///
/// Configured rather than hardcoded so a deployment can present a different
/// application user without a code change.
#[derive(Clone, Debug)]
pub struct SenderIdentity {
  pub name: String,
  pub email: String,
  pub avatar: Option<String>,
}

impl SenderIdentity {
  /// Load the application identity from the environment.
  pub fn from_env() -> Self {
    SenderIdentity {
      name: std::env::var("INBOXD_SENDER_NAME").unwrap_or_else(|_| "Richard Brown".to_string()),
      email: std::env::var("INBOXD_SENDER_EMAIL")
        .unwrap_or_else(|_| "richard.brown@business.com".to_string()),
      avatar: std::env::var("INBOXD_SENDER_AVATAR").ok(),
    }
  }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub db: SqlitePool,
  pub sender: SenderIdentity,
}

/// Start the HTTP server with configured environment.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();

  let db_url =
    std::env::var("INBOXD_DATABASE").unwrap_or_else(|_| "sqlite://inboxd.db".to_string());
  let db_url = db::ensure_sqlite_path(&db_url);
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;
  db::upgrade(&pool).await?;

  let state = AppState {
    db: pool,
    sender: SenderIdentity::from_env(),
  };

  let app = http::build_router(state);

  let addr: SocketAddr = std::env::var("INBOXD_ADDR")
    .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
    .parse()?;

  info!("email API: http://{}/emails", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}
