//! Credentials module.
//!
//! Bearer token issuance/validation and password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// Issues and resolves bearer tokens.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_secs: i64,
}

impl TokenManager {
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        TokenManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        }
    }

    /// Signs a token identifying `user_id`, valid for the configured lifetime.
    pub fn issue_token(&self, user_id: &str) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// User id carried by `token`, or `None` for anything missing,
    /// malformed, forged or expired. Never fails.
    pub fn resolve_token(&self, token: &str) -> Option<String> {
        let token = extract_bearer_token(token).unwrap_or(token).trim();
        if token.is_empty() {
            return None;
        }

        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                debug!(error = %e, "Rejected bearer token");
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Argon2id hasher with `cost` as the time cost.
fn hasher(cost: u32) -> Result<Argon2<'static>, ApiError> {
    let params = Params::new(
        Params::DEFAULT_M_COST,
        cost,
        Params::DEFAULT_P_COST,
        None,
    )
    .map_err(|e| ApiError::internal(format!("Invalid hashing parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into a salted PHC string.
pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher(cost)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC hash. Parameters are read from
/// the hash itself; a malformed hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
