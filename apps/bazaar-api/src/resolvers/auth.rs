//! Registration and login.
//!
//! ## Lock Discipline
//! ```text
//! register:  validate ─► read lock: email taken? ─► hash (blocking pool)
//!                      ─► write lock: insert (re-checks email) ─► token
//!
//! login:     read lock: copy hash ─► verify (blocking pool) ─► token
//! ```
//! Hashing and verification never run while the store is locked.

use tokio::task;
use tracing::{info, warn};

use bazaar_core::validation::{validate_email, validate_name, validate_password};
use bazaar_core::UserRole;
use bazaar_store::NewUser;

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::views::AuthPayload;
use crate::AppState;

pub async fn register(
    state: &AppState,
    email: String,
    password: String,
    name: String,
    role: UserRole,
) -> ApiResult<AuthPayload> {
    validate_email(&email)?;
    validate_password(&password)?;
    validate_name(&name)?;

    if state.store.read().await.find_user_by_email(&email).is_some() {
        return Err(ApiError::bad_input("Email already in use"));
    }

    let cost = state.config.password_hash_cost;
    let password_hash = task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(ApiError::internal)??;

    let user = state.store.write().await.insert_user(NewUser {
        email,
        password_hash,
        name,
        role,
    })?;

    let token = state.tokens.issue_token(&user.id)?;
    info!(id = %user.id, role = ?user.role, "User registered");

    Ok(AuthPayload { token, user })
}

pub async fn login(state: &AppState, email: String, password: String) -> ApiResult<AuthPayload> {
    let user = state.store.read().await.find_user_by_email(&email).cloned();

    let Some(user) = user else {
        warn!("Login for unknown email");
        return Err(ApiError::invalid_credentials());
    };

    let password_hash = user.password_hash.clone();
    let valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(ApiError::internal)?;

    if !valid {
        warn!(id = %user.id, "Login with wrong password");
        return Err(ApiError::invalid_credentials());
    }

    let token = state.tokens.issue_token(&user.id)?;
    info!(id = %user.id, "User logged in");

    Ok(AuthPayload { token, user })
}
