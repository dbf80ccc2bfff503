//! # Bazaar API
//!
//! HTTP server for the marketplace SPA.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bazaar API Layers                               │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  server.rs     │  │  schema.rs     │  │  resolvers/                ││
//! │  │                │  │                │  │                            ││
//! │  │ • POST /graphql│─►│ • Operation    │─►│ • auth     register, login ││
//! │  │ • GET /health  │  │   (typed       │  │ • product  listings, CRUD  ││
//! │  │ • CORS, trace  │  │    routing)    │  │ • order    createOrder ... ││
//! │  │ • Bearer → who │  │                │  │ • review   add, delete     ││
//! │  └────────────────┘  └────────────────┘  │ • user     me, updateUser  ││
//! │                                          └─────────────┬──────────────┘│
//! │                                                        │               │
//! │  ┌─────────────────────────────────────────────────────▼────────────┐  │
//! │  │                      AppState                                     │  │
//! │  │                                                                   │  │
//! │  │  ┌────────────────────────┐  ┌──────────────┐  ┌──────────────┐ │  │
//! │  │  │ Arc<RwLock<MarketStore>│  │ TokenManager │  │  ApiConfig   │ │  │
//! │  │  │ held for a whole op    │  │ HS256 JWT    │  │  env vars    │ │  │
//! │  │  └────────────────────────┘  └──────────────┘  └──────────────┘ │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - HTTP port (default: 4000)
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0)
//! - `JWT_SECRET` - Secret for token signing
//! - `JWT_LIFETIME_SECS` - Token lifetime (default: 604800, 7 days)
//! - `PASSWORD_HASH_COST` - Argon2 time cost (default: 2)
//! - `SEED_DATA` - Load the development data set (default: true)

pub mod auth;
pub mod config;
pub mod error;
pub mod resolvers;
pub mod schema;
pub mod server;
pub mod views;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use bazaar_store::seed::SEED_PASSWORD;
use bazaar_store::MarketStore;

// Re-exports
pub use auth::TokenManager;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use server::router;

/// Shared application state, cloned into every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<RwLock<MarketStore>>,
    pub tokens: TokenManager,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Wraps an existing store.
    pub fn new(config: ApiConfig, store: MarketStore) -> Self {
        AppState {
            store: Arc::new(RwLock::new(store)),
            tokens: TokenManager::new(&config.jwt_secret, config.jwt_lifetime_secs),
            config: Arc::new(config),
        }
    }

    /// Builds the store the config asks for: seeded or empty.
    pub fn from_config(config: ApiConfig) -> ApiResult<Self> {
        let store = if config.seed_data {
            let hash = auth::hash_password(SEED_PASSWORD, config.password_hash_cost)?;
            let store = MarketStore::seeded(&hash);
            info!(
                users = store.user_count(),
                products = store.product_count(),
                "Loaded seed data"
            );
            store
        } else {
            MarketStore::new()
        };

        Ok(AppState::new(config, store))
    }
}
