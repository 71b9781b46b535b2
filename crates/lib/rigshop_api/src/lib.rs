//! # rigshop_api
//!
//! HTTP API library for Rigshop.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use axum::routing::{delete, get, post, put};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{
    auth, cart, configurator, filters, health, products, promos, reviews, support,
};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_API_REGISTER, post(auth::register_handler))
        .route(routes::POST_API_LOGIN, post(auth::login_handler))
        .route(routes::POST_API_ADMIN_LOGIN, post(auth::admin_login_handler))
        .route(routes::PRODUCTS, get(products::list_products_handler))
        .route(routes::PRODUCTS_ID, get(products::get_product_handler))
        .route(
            routes::PRODUCT_FILTERS,
            get(filters::list_active_filters_handler),
        )
        .route(
            routes::CONFIGURATOR_CATEGORIES,
            get(configurator::categories_handler),
        )
        .route(routes::REVIEWS_ID, get(reviews::list_reviews_handler))
        .route(routes::REVIEWS_ID_STATS, get(reviews::review_stats_handler));

    // Customer routes (require auth)
    let protected = Router::new()
        .route(routes::CART, get(cart::get_cart_handler))
        .route(routes::CART_ADD, post(cart::add_to_cart_handler))
        .route(routes::CART_UPDATE_ID, put(cart::update_cart_handler))
        .route(routes::CART_REMOVE_ID, delete(cart::remove_from_cart_handler))
        .route(routes::CART_APPLY_PROMO, post(cart::apply_promo_handler))
        .route(
            routes::CONFIGURATOR_VALIDATE,
            post(configurator::validate_handler),
        )
        .route(routes::CONFIGURATOR_SAVE, post(configurator::save_handler))
        .route(
            routes::CONFIGURATOR_MY_CONFIGS,
            get(configurator::my_configs_handler),
        )
        .route(routes::REVIEWS, post(reviews::create_review_handler))
        .route(routes::REVIEWS_ID, delete(reviews::delete_review_handler))
        .route(
            routes::SUPPORT_TICKETS,
            get(support::list_my_tickets_handler).post(support::create_ticket_handler),
        )
        .route(
            routes::SUPPORT_TICKETS_ID,
            get(support::get_my_ticket_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // Admin routes (require the admin role)
    let admin = Router::new()
        .route(
            routes::ADMIN_PRODUCTS,
            post(products::create_product_handler),
        )
        .route(
            routes::ADMIN_PRODUCTS_ID,
            put(products::update_product_handler).delete(products::delete_product_handler),
        )
        .route(
            routes::ADMIN_PRODUCT_FILTERS,
            get(filters::list_filters_handler).post(filters::create_filter_handler),
        )
        .route(
            routes::ADMIN_PRODUCT_FILTERS_ID,
            put(filters::update_filter_handler).delete(filters::delete_filter_handler),
        )
        .route(
            routes::ADMIN_PRODUCT_FILTERS_ID_TOGGLE,
            put(filters::toggle_filter_handler),
        )
        .route(
            routes::ADMIN_PROMO_CODES,
            get(promos::list_promo_codes_handler).post(promos::create_promo_code_handler),
        )
        .route(
            routes::ADMIN_PROMO_CODES_ID,
            put(promos::update_promo_code_handler).delete(promos::delete_promo_code_handler),
        )
        .route(
            routes::ADMIN_PROMO_CODES_ID_TOGGLE,
            put(promos::toggle_promo_code_handler),
        )
        .route(
            routes::ADMIN_SUPPORT_TICKETS,
            get(support::list_all_tickets_handler),
        )
        .route(
            routes::ADMIN_SUPPORT_TICKETS_ID_RESPOND,
            put(support::respond_ticket_handler),
        )
        .route(
            routes::ADMIN_SUPPORT_TICKETS_ID_STATUS,
            put(support::ticket_status_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
