//! Auth-related database queries.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::{User, UserWithPassword};
use crate::uuid::new_id;

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    username: String,
    password_hash: String,
}

impl From<UserRow> for UserWithPassword {
    fn from(row: UserRow) -> Self {
        UserWithPassword {
            user: User {
                id: row.id,
                email: row.email,
                username: row.username,
            },
            password_hash: row.password_hash,
        }
    }
}

/// Fetch a user and password hash by email.
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserWithPassword>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, username, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(UserWithPassword::from))
}

/// Create a user, returning it.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<User, AuthError> {
    let id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (id, email, username, password_hash) VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(new_id())
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AuthError::ValidationError("Email already registered".into())
        }
        other => AuthError::DbError(other),
    })?;
    Ok(User {
        id,
        email: email.to_string(),
        username: username.to_string(),
    })
}

pub async fn get_user_roles(pool: &PgPool, user_id: &str) -> Result<Vec<String>, AuthError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Grant a role. Granting a role the user already has is a no-op.
pub async fn grant_role(pool: &PgPool, user_id: &str, role: &str) -> Result<(), AuthError> {
    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
