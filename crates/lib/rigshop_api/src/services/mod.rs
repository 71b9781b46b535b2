//! Multi-step flows shared by handlers.

pub mod auth;
pub mod cart;
