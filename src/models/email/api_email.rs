//! API representation of an email.

use super::email_row::EmailRow;
use crate::models::attachment::attachment_meta::AttachmentMeta;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Sender {
  pub name: String,
  pub email: String,
  pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Recipient {
  pub name: String,
  pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ApiEmail {
  pub id: i64,
  pub sender: Sender,
  pub recipient: Recipient,
  pub subject: String,
  pub preview: String,
  pub body: String,
  pub date: String,
  pub is_read: bool,
  pub is_archived: bool,
  pub attachments: Vec<AttachmentMeta>,
}

impl ApiEmail {
  /// Shape a row plus its attachments into the response object.
  pub fn from_row(row: EmailRow, attachments: Vec<AttachmentMeta>) -> Self {
    ApiEmail {
      id: row.id,
      sender: Sender {
        name: row.sender_name,
        email: row.sender_email,
        avatar: row.sender_avatar,
      },
      recipient: Recipient {
        name: row.recipient_name,
        email: row.recipient_email,
      },
      subject: row.subject,
      preview: row.preview,
      body: row.body,
      date: row.date,
      is_read: row.is_read,
      is_archived: row.is_archived,
      attachments,
    }
  }
}
