//! JWT token generation and verification.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::{TokenClaims, User};

/// Access token lifetime: 30 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 30 * 60;

/// Sign an HS256 access token for `user` carrying `roles`.
pub fn generate_access_token(
    user: &User,
    roles: &[String],
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        username: user.username.clone(),
        roles: roles.to_vec(),
        exp: (now + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS)).timestamp(),
        iat: now.timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify an access token, returning the claims when signature and expiry hold.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Resolve the signing secret: `JWT_SECRET` → `AUTH_SECRET` → persisted file.
///
/// When none is set a random secret is generated and written under the
/// user data directory so tokens survive restarts.
pub fn resolve_jwt_secret() -> String {
    for var in ["JWT_SECRET", "AUTH_SECRET"] {
        if let Ok(secret) = std::env::var(var)
            && !secret.is_empty()
        {
            return secret;
        }
    }

    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    let persisted = secret_path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| std::fs::write(&secret_path, &secret));
    match persisted {
        Ok(()) => info!(path = %secret_path.display(), "generated new JWT secret"),
        Err(e) => warn!(path = %secret_path.display(), "could not persist JWT secret: {e}"),
    }
    secret
}

fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rigshop")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn user() -> User {
        User {
            id: "user-1".into(),
            email: "ada@example.com".into(),
            username: "ada".into(),
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let token = generate_access_token(&user(), &["admin".to_string()], SECRET).unwrap();
        let claims = verify_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "ada");
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(&user(), &[], SECRET).unwrap();
        assert!(verify_access_token(&token, b"other-secret").is_none());
        assert!(verify_access_token("not.a.jwt", SECRET).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "user-1".into(),
            email: "ada@example.com".into(),
            username: "ada".into(),
            roles: vec![],
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
        assert!(verify_access_token(&token, SECRET).is_none());
    }
}
