//! Domain models.
//!
//! Internal models shared by the core queries and the API layer. Request
//! and response envelopes specific to HTTP live in `rigshop_api::models`.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod configurator;
pub mod filter;
pub mod review;
pub mod support;
