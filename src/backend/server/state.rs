/**
 * Application State Management
 *
 * `AppState` is the central state container handed to every handler. It is
 * cheap to clone: configuration, token service and both stores sit behind
 * `Arc`, and the password hasher is `Copy`.
 *
 * The `FromRef` implementations allow handlers to extract only the part of
 * the state they need, e.g. `State(users): State<Arc<dyn UserStore>>`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::server::config::AppConfig;
use crate::backend::store::{DreamStore, MemoryStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    /// Read-only configuration loaded at start-up
    pub config: Arc<AppConfig>,

    /// Issues and verifies bearer tokens
    pub tokens: Arc<TokenService>,

    pub passwords: PasswordHasher,

    /// Credential store
    pub users: Arc<dyn UserStore>,

    /// Dream store
    pub dreams: Arc<dyn DreamStore>,
}

impl AppState {
    /// State over explicit stores
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>, dreams: Arc<dyn DreamStore>) -> Self {
        let tokens = TokenService::new(
            config.jwt_secret.as_bytes(),
            config.jwt_issuer.clone(),
            config.token_ttl,
        );
        Self {
            passwords: PasswordHasher::new(config.bcrypt_cost),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
            users,
            dreams,
        }
    }

    /// State over a fresh in-memory store serving both collections
    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(config, store.clone(), store)
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Arc<dyn DreamStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.dreams.clone()
    }
}
