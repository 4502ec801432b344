/**
 * Authentication Handler Types
 *
 * Request and response types shared by the register, login and me handlers.
 * The registration payload itself is `shared::RegistrationDraft`, validated
 * before anything touches a store.
 */

use serde::{Deserialize, Serialize};

use crate::shared::User;

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email: Option<String>,
    /// Verified against the stored hash, never logged
    pub password: Option<String>,
}

/// Auth response
///
/// Returned by register and login. Contains the bearer token and the user
/// profile for immediate authentication; never the password hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
