pub mod email_list;
