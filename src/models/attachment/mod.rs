pub mod attachment_meta;
