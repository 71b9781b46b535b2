//! Authentication service — register and login flows delegating to
//! `rigshop_core::auth`.

use rigshop_core::auth::jwt::generate_access_token;
use rigshop_core::auth::password::{check_password_policy, hash_password, verify_password};
use rigshop_core::auth::queries;
use rigshop_core::models::auth::{ADMIN_ROLE, User};
use sqlx::PgPool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AuthUser, TokenResponse};

/// Email of the account backing admin logins.
pub const ADMIN_EMAIL: &str = "admin@rigshop.local";

const ADMIN_USERNAME: &str = "admin";

fn token_response(user: &User, roles: &[String], jwt_secret: &[u8]) -> AppResult<TokenResponse> {
    let access_token = generate_access_token(user, roles, jwt_secret)?;
    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: AuthUser {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: roles.iter().any(|r| r == ADMIN_ROLE),
        },
    })
}

/// Authenticate with email + password. Unknown email and wrong password
/// produce the same error.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let Some(found) = queries::find_user_by_email(pool, email).await? else {
        return Err(AppError::Validation("Invalid credentials".into()));
    };
    if !verify_password(password, &found.password_hash)? {
        return Err(AppError::Validation("Invalid credentials".into()));
    }

    let roles = queries::get_user_roles(pool, &found.user.id).await?;
    info!(user_id = %found.user.id, "user logged in");
    token_response(&found.user, &roles, jwt_secret)
}

/// Register a new customer account.
pub async fn register(
    pool: &PgPool,
    email: &str,
    username: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let email = email.trim();
    let username = username.trim();
    if email.is_empty() || username.is_empty() {
        return Err(AppError::Validation(
            "Email and username are required".into(),
        ));
    }
    check_password_policy(password)?;

    if queries::email_exists(pool, email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let hash = hash_password(password)?;
    let user = queries::create_user(pool, email, username, &hash).await?;
    info!(user_id = %user.id, "registered user");
    token_response(&user, &[], jwt_secret)
}

/// Exchange the configured admin password for an admin token, creating the
/// admin account on first use.
pub async fn admin_login(
    pool: &PgPool,
    password: &str,
    admin_password: Option<&str>,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let Some(expected) = admin_password else {
        return Err(AppError::Forbidden("Admin login is not configured".into()));
    };
    if password != expected {
        return Err(AppError::Validation("Invalid admin password".into()));
    }

    let user = match queries::find_user_by_email(pool, ADMIN_EMAIL).await? {
        Some(found) => found.user,
        None => {
            let hash = hash_password(expected)?;
            let user = queries::create_user(pool, ADMIN_EMAIL, ADMIN_USERNAME, &hash).await?;
            info!(user_id = %user.id, "created admin account");
            user
        }
    };
    queries::grant_role(pool, &user.id, ADMIN_ROLE).await?;

    let roles = queries::get_user_roles(pool, &user.id).await?;
    token_response(&user, &roles, jwt_secret)
}
