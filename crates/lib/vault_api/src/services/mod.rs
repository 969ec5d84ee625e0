//! Business flows that sit between handlers and `vault_core`.

pub mod auth;
