//! Database helpers: schema migration and path handling.

use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

const MIGRATION_NAME: &str = "001_create_emails";

/// Seed inbox applied on first migration:
/// (sender_name, sender_email, recipient_name, recipient_email,
///  subject, preview, body, date).
const SEED_EMAILS: &[(&str, &str, &str, &str, &str, &str, &str, &str)] = &[
  (
    "Michael Lee",
    "michael.lee@business.com",
    "John Smith",
    "john.smith@business.com",
    "Follow-Up: Product Demo Feedba...",
    "Hi John, Thank you for attending the product...",
    "Hi John,\n\nThank you for attending the product demo yesterday. I wanted to follow up on the feedback you shared during the session.\n\nYour insights about the user interface were particularly valuable. We've already started discussing potential improvements based on your suggestions.\n\nI'd love to schedule a brief call this week to dive deeper into your thoughts on the integration capabilities. Would Thursday or Friday work for you?\n\nBest regards,\nMichael Lee",
    "2024-12-12T09:00:00",
  ),
  (
    "Jane Doe",
    "jane.doe@business.com",
    "John Smith",
    "john.smith@business.com",
    "Proposal for Partnership\u{1f389}",
    "Hi John, Hope this email finds you well. I'm rea...",
    "Hi John,\n\nhope this message finds you well! I'm reaching out to explore a potential partnership between our companies. At Jane Corp, which could complement your offerings at John Organisation Corp.\n\nI've attached a proposal detailing how we envision our collaboration, including key benefits, timelines, and implementation strategies. I believe this partnership could unlock exciting opportunities for both of us!\n\nLet me know your thoughts or a convenient time to discuss this further. I'm happy to schedule a call or meeting at your earliest convenience.Looking forward to hearing from you!\n\nWarm regards,\nJane Doe",
    "2024-12-10T09:00:00",
  ),
  (
    "Support Team",
    "support@business.com",
    "John Smith",
    "john.smith@business.com",
    "Contract Renewal Due \u{1f4e8}",
    "Dear John,This is a reminder that the contract...",
    "Dear John,\n\nThis is a reminder that the contract for your current subscription is due for renewal on December 31, 2024.\n\nPlease review the terms and conditions attached to this email. If you have any questions or would like to discuss modifications to the contract, please don't hesitate to reach out.\n\nWe value your continued partnership and look forward to serving you in the coming year.\n\nBest regards,\nSupport Team",
    "2024-12-11T10:30:00",
  ),
  (
    "Sarah Connor",
    "sarah.connor@business.com",
    "John Smith",
    "john.smith@business.com",
    "Meeting Recap: Strategies for 2...",
    "Hi John, Thank you for your insights during ye...",
    "Hi John,\n\nThank you for your insights during yesterday's strategy meeting. Here's a quick recap of the key points discussed:\n\n1. Q1 targets and milestones\n2. New market expansion opportunities\n3. Team restructuring proposals\n4. Budget allocation for 2025\n\nPlease review and share any additional thoughts by end of week.\n\nBest regards,\nSarah Connor",
    "2024-12-11T14:00:00",
  ),
  (
    "Downe Johnson",
    "downe.johnson@business.com",
    "John Smith",
    "john.smith@business.com",
    "Invitation: Annual Client Appreci...",
    "Dear John. We are delighted to invite you to o...",
    "Dear John,\n\nWe are delighted to invite you to our Annual Client Appreciation Gala on January 15, 2025. This exclusive event is our way of thanking valued partners like you.\n\nThe evening will feature networking opportunities, a keynote address, and entertainment. Please RSVP by December 20th.\n\nWe look forward to celebrating with you!\n\nWarm regards,\nDowne Johnson",
    "2024-12-11T09:00:00",
  ),
  (
    "Lily Alexa",
    "lily.alexa@business.com",
    "John Smith",
    "john.smith@business.com",
    "Technical Support Update",
    "Dear John, Your issue regarding server conne...",
    "Dear John,\n\nYour issue regarding server connectivity has been resolved. Our engineering team identified the root cause and implemented a permanent fix.\n\nIf you experience any further issues, please don't hesitate to reach out. We're here to help 24/7.\n\nBest regards,\nLily Alexa\nTechnical Support",
    "2024-12-10T16:00:00",
  ),
  (
    "Natasha Brown",
    "natasha.brown@business.com",
    "John Smith",
    "john.smith@business.com",
    "Happy Holidays from Kozuki tea...",
    "Hi John, As the holiday season approaches, w...",
    "Hi John,\n\nAs the holiday season approaches, we wanted to take a moment to express our gratitude for your continued support and partnership throughout 2024.\n\nWishing you and your team a wonderful holiday season and a prosperous New Year!\n\nWarm regards,\nNatasha Brown",
    "2024-12-10T11:00:00",
  ),
  (
    "Downe Johnson",
    "downe.johnson@business.com",
    "John Smith",
    "john.smith@business.com",
    "Invitation: Annual Client Appreci...",
    "Dear John. We are delighted to invite you to o...",
    "Dear John,\n\nWe are delighted to invite you to our Annual Client Appreciation Dinner on February 5, 2025. This intimate gathering celebrates our most valued partners.\n\nThe evening includes a three-course dinner, live music, and exclusive previews of our 2025 product lineup. Please RSVP by January 15th.\n\nLooking forward to your presence!\n\nBest regards,\nDowne Johnson",
    "2024-12-11T08:00:00",
  ),
];

/// Apply the schema migration exactly once.
///
/// Creates the `_migrations` ledger if absent and skips everything when this
/// migration is already recorded. Otherwise the tables, seed rows and ledger
/// entry land in a single transaction, so a failure leaves nothing applied.
pub async fn upgrade(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  sqlx::query(
    r#"CREATE TABLE IF NOT EXISTS _migrations (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL UNIQUE,
      applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )"#,
  )
  .execute(pool)
  .await?;

  let applied = sqlx::query("SELECT 1 FROM _migrations WHERE name = ?")
    .bind(MIGRATION_NAME)
    .fetch_optional(pool)
    .await?;
  if applied.is_some() {
    debug!("migration {MIGRATION_NAME} already applied, skipping");
    return Ok(());
  }

  let mut tx = pool.begin().await?;

  sqlx::query(
    r#"CREATE TABLE IF NOT EXISTS emails (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      sender_name TEXT NOT NULL,
      sender_email TEXT NOT NULL,
      sender_avatar TEXT,
      recipient_name TEXT NOT NULL,
      recipient_email TEXT NOT NULL,
      subject TEXT NOT NULL,
      preview TEXT NOT NULL,
      body TEXT NOT NULL,
      date TEXT NOT NULL,
      is_read INTEGER NOT NULL DEFAULT 0,
      is_archived INTEGER NOT NULL DEFAULT 0
    )"#,
  )
  .execute(&mut *tx)
  .await?;

  sqlx::query(
    r#"CREATE TABLE IF NOT EXISTS attachments (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      email_id INTEGER NOT NULL,
      filename TEXT NOT NULL,
      size TEXT NOT NULL,
      url TEXT NOT NULL,
      FOREIGN KEY (email_id) REFERENCES emails(id) ON DELETE CASCADE
    )"#,
  )
  .execute(&mut *tx)
  .await?;

  for &(sender_name, sender_email, recipient_name, recipient_email, subject, preview, body, date) in
    SEED_EMAILS
  {
    sqlx::query(
      "INSERT INTO emails (sender_name, sender_email, sender_avatar, recipient_name, recipient_email, subject, preview, body, date, is_read, is_archived) VALUES (?, ?, NULL, ?, ?, ?, ?, ?, ?, 0, 0)",
    )
    .bind(sender_name)
    .bind(sender_email)
    .bind(recipient_name)
    .bind(recipient_email)
    .bind(subject)
    .bind(preview)
    .bind(body)
    .bind(date)
    .execute(&mut *tx)
    .await?;
  }

  // Seed attachment on the partnership proposal email (second seed row).
  sqlx::query("INSERT INTO attachments (email_id, filename, size, url) VALUES (?, ?, ?, ?)")
    .bind(2_i64)
    .bind("Proposal Partnership.pdf")
    .bind("1.5 MB")
    .bind("/attachments/proposal-partnership.pdf")
    .execute(&mut *tx)
    .await?;

  sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
    .bind(MIGRATION_NAME)
    .execute(&mut *tx)
    .await?;

  tx.commit().await?;
  info!("migration {MIGRATION_NAME} applied");
  Ok(())
}

/// Revert the migration: drop both tables and clear the ledger entry.
pub async fn downgrade(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  sqlx::query("DROP TABLE IF EXISTS attachments")
    .execute(pool)
    .await?;
  sqlx::query("DROP TABLE IF EXISTS emails")
    .execute(pool)
    .await?;
  sqlx::query("DELETE FROM _migrations WHERE name = ?")
    .bind(MIGRATION_NAME)
    .execute(pool)
    .await?;
  info!("migration {MIGRATION_NAME} reverted");
  Ok(())
}

/// Ensure SQLite file and parent folder exist for a given sqlx URL.
pub fn ensure_sqlite_path(db_url: &str) -> String {
  if !db_url.starts_with("sqlite:") {
    return db_url.to_string();
  }
  let path_part = db_url.trim_start_matches("sqlite://");
  if path_part == ":memory:" {
    return db_url.to_string();
  }
  let path_only = match path_part.split_once('?') {
    Some((p, _)) => p,
    None => path_part,
  };
  if !path_only.is_empty() {
    let p = Path::new(path_only);
    if let Some(parent) = p.parent() {
      if !parent.as_os_str().is_empty() {
        let _ = std::fs::create_dir_all(parent);
      }
    }
    let _ = std::fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(p);
  }
  db_url.to_string()
}
