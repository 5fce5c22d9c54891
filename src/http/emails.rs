//! Email CRUD JSON APIs.

use crate::{
  app::AppState,
  models::{
    attachment::attachment_meta::AttachmentMeta,
    email::{api_email::ApiEmail, email_row::EmailRow},
    response::email_list::EmailList,
  },
  util::derive_preview,
};
use axum::{
  Json,
  extract::{Path as AxumPath, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;

const SELECT_EMAIL: &str = "SELECT id, sender_name, sender_email, sender_avatar, recipient_name, recipient_email, subject, preview, body, date, is_read, is_archived FROM emails";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmail {
  pub recipient_name: String,
  pub recipient_email: String,
  pub subject: String,
  pub body: String,
  pub preview: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmail {
  pub is_read: Option<bool>,
  pub is_archived: Option<bool>,
  pub subject: Option<String>,
  pub body: Option<String>,
}

fn store_error(context: &str, e: sqlx::Error) -> Response {
  error!("{context}: {e}");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    format!("database error: {e}"),
  )
    .into_response()
}

fn not_found() -> Response {
  (StatusCode::NOT_FOUND, "email not found").into_response()
}

async fn attachments_for(
  state: &AppState,
  email_id: i64,
) -> Result<Vec<AttachmentMeta>, sqlx::Error> {
  sqlx::query_as("SELECT id, filename, size, url FROM attachments WHERE email_id = ? ORDER BY id")
    .bind(email_id)
    .fetch_all(&state.db)
    .await
}

pub async fn list_emails(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Response {
  // Unknown filter values fall back to the unfiltered listing.
  let sql = match params.filter.as_deref() {
    Some("unread") => format!("{SELECT_EMAIL} WHERE is_read = 0 ORDER BY date DESC"),
    Some("archived") => format!("{SELECT_EMAIL} WHERE is_archived = 1 ORDER BY date DESC"),
    _ => format!("{SELECT_EMAIL} ORDER BY date DESC"),
  };
  let rows: Vec<EmailRow> = match sqlx::query_as(&sql).fetch_all(&state.db).await {
    Ok(rows) => rows,
    Err(e) => return store_error("list_emails error", e),
  };
  let mut emails = Vec::with_capacity(rows.len());
  for row in rows {
    let attachments = match attachments_for(&state, row.id).await {
      Ok(v) => v,
      Err(e) => return store_error("list_emails attachment error", e),
    };
    emails.push(ApiEmail::from_row(row, attachments));
  }
  Json(EmailList { emails }).into_response()
}

pub async fn get_email(State(state): State<AppState>, AxumPath(id): AxumPath<i64>) -> Response {
  let sql = format!("{SELECT_EMAIL} WHERE id = ?");
  let row: Option<EmailRow> = match sqlx::query_as(&sql).bind(id).fetch_optional(&state.db).await {
    Ok(row) => row,
    Err(e) => return store_error("get_email error", e),
  };
  match row {
    Some(row) => {
      let attachments = match attachments_for(&state, id).await {
        Ok(v) => v,
        Err(e) => return store_error("get_email attachment error", e),
      };
      Json(ApiEmail::from_row(row, attachments)).into_response()
    }
    None => not_found(),
  }
}

pub async fn create_email(
  State(state): State<AppState>,
  Json(req): Json<CreateEmail>,
) -> Response {
  let preview = req
    .preview
    .filter(|p| !p.is_empty())
    .unwrap_or_else(|| derive_preview(&req.body));
  let date = Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();

  // New emails represent the user's own outgoing message, so they start read.
  let inserted = sqlx::query(
    "INSERT INTO emails (sender_name, sender_email, sender_avatar, recipient_name, recipient_email, subject, preview, body, date, is_read, is_archived) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, 0)",
  )
  .bind(&state.sender.name)
  .bind(&state.sender.email)
  .bind(&state.sender.avatar)
  .bind(&req.recipient_name)
  .bind(&req.recipient_email)
  .bind(&req.subject)
  .bind(&preview)
  .bind(&req.body)
  .bind(&date)
  .execute(&state.db)
  .await;
  let id = match inserted {
    Ok(r) => r.last_insert_rowid(),
    Err(e) => return store_error("create_email error", e),
  };

  let sql = format!("{SELECT_EMAIL} WHERE id = ?");
  match sqlx::query_as::<_, EmailRow>(&sql)
    .bind(id)
    .fetch_one(&state.db)
    .await
  {
    Ok(row) => (StatusCode::CREATED, Json(ApiEmail::from_row(row, Vec::new()))).into_response(),
    Err(e) => store_error("create_email reselect error", e),
  }
}

pub async fn update_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
  Json(req): Json<UpdateEmail>,
) -> Response {
  match sqlx::query("SELECT id FROM emails WHERE id = ?")
    .bind(id)
    .fetch_optional(&state.db)
    .await
  {
    Ok(Some(_)) => {}
    Ok(None) => return not_found(),
    Err(e) => return store_error("update_email error", e),
  }

  let mut sets: Vec<&str> = Vec::new();
  if req.is_read.is_some() {
    sets.push("is_read = ?");
  }
  if req.is_archived.is_some() {
    sets.push("is_archived = ?");
  }
  if req.subject.is_some() {
    sets.push("subject = ?");
  }
  if req.body.is_some() {
    sets.push("body = ?");
  }

  // An empty payload skips the write and returns the row unchanged.
  if !sets.is_empty() {
    let sql = format!("UPDATE emails SET {} WHERE id = ?", sets.join(", "));
    let mut query = sqlx::query(&sql);
    if let Some(v) = req.is_read {
      query = query.bind(v);
    }
    if let Some(v) = req.is_archived {
      query = query.bind(v);
    }
    if let Some(v) = req.subject.clone() {
      query = query.bind(v);
    }
    if let Some(v) = req.body.clone() {
      query = query.bind(v);
    }
    if let Err(e) = query.bind(id).execute(&state.db).await {
      return store_error("update_email error", e);
    }
  }

  let sql = format!("{SELECT_EMAIL} WHERE id = ?");
  let row: EmailRow = match sqlx::query_as(&sql).bind(id).fetch_one(&state.db).await {
    Ok(row) => row,
    Err(e) => return store_error("update_email reselect error", e),
  };
  let attachments = match attachments_for(&state, id).await {
    Ok(v) => v,
    Err(e) => return store_error("update_email attachment error", e),
  };
  Json(ApiEmail::from_row(row, attachments)).into_response()
}

pub async fn delete_email(State(state): State<AppState>, AxumPath(id): AxumPath<i64>) -> Response {
  match sqlx::query("SELECT id FROM emails WHERE id = ?")
    .bind(id)
    .fetch_optional(&state.db)
    .await
  {
    Ok(Some(_)) => {}
    Ok(None) => return not_found(),
    Err(e) => return store_error("delete_email error", e),
  }

  // The schema cascades attachment deletes; removing them here keeps the
  // invariant on databases opened without foreign_keys enabled.
  if let Err(e) = sqlx::query("DELETE FROM attachments WHERE email_id = ?")
    .bind(id)
    .execute(&state.db)
    .await
  {
    return store_error("delete_email attachment error", e);
  }
  if let Err(e) = sqlx::query("DELETE FROM emails WHERE id = ?")
    .bind(id)
    .execute(&state.db)
    .await
  {
    return store_error("delete_email error", e);
  }
  StatusCode::NO_CONTENT.into_response()
}
