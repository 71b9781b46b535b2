//! Request handlers.

pub mod auth;
pub mod cart;
pub mod configurator;
pub mod filters;
pub mod health;
pub mod products;
pub mod promos;
pub mod reviews;
pub mod support;
