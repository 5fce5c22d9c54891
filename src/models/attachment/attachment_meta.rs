//! Public attachment metadata.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct AttachmentMeta {
  pub id: i64,
  pub filename: String,
  pub size: String,
  pub url: String,
}
