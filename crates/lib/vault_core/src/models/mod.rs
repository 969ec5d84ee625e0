//! Domain models.

pub mod auth;
pub mod record;
pub mod secret;
