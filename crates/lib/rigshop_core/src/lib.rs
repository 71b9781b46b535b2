//! # rigshop_core
//!
//! Core domain logic for Rigshop: catalog and dynamic filters, the PC
//! configurator, carts, reviews, support tickets and authentication.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod configurator;
pub mod db;
pub mod models;
pub mod reviews;
pub mod seed;
pub mod support;
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
