pub mod api_email;
pub mod email_row;
