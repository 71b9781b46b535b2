//! Request and response bodies for the HTTP API.
//!
//! Domain objects (`Product`, `Cart`, `Review`, ...) are serialized as-is
//! from `rigshop_core::models`; only envelopes live here.

use rigshop_core::models::configurator::ComponentSelection;
use rigshop_core::models::support::{TicketCategory, TicketPriority, TicketStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub db_connected: bool,
}

// Auth

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

// Catalog

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    pub active: bool,
}

// Cart & promo codes

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPromoRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPromoResponse {
    pub message: String,
    pub discount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromoCodeRequest {
    pub code: String,
    pub discount_percentage: f64,
}

// Configurator

#[derive(Debug, Clone, Deserialize)]
pub struct SaveConfigurationRequest {
    pub name: String,
    pub components: ComponentSelection,
}

// Reviews

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub product_id: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

// Support

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub priority: TicketPriority,
    #[serde(default)]
    pub category: TicketCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketResponse {
    pub message: String,
    pub ticket_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespondTicketRequest {
    pub admin_response: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketStatusRequest {
    pub status: TicketStatus,
}
