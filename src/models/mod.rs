//! Typed records shared between the db and http layers.

pub mod attachment;
pub mod email;
pub mod response;
