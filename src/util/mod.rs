//! Utility functions: tracing setup and preview derivation.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize pretty CLI logging.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .pretty()
    .init();
}

/// Derive a list preview from a body: the first 80 characters, with an
/// ellipsis marker appended when anything was cut off.
pub fn derive_preview(body: &str) -> String {
  if body.chars().count() > 80 {
    let truncated: String = body.chars().take(80).collect();
    format!("{truncated}...")
  } else {
    body.to_string()
  }
}
