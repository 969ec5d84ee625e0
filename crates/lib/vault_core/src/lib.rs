//! # vault_core
//!
//! Core domain logic for Vault: typed secret records bound to owners, the
//! user credential repository, bearer identity resolution, and presigned
//! object-storage links for file payloads.

pub mod auth;
pub mod files;
pub mod migrate;
pub mod models;
pub mod objects;
pub mod records;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
