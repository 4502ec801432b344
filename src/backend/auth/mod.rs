//! Authentication Module
//!
//! Password hashing, session tokens and the HTTP handlers for registration
//! and login.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt hashing and verification
//! ├── sessions.rs     - JWT issue and verify
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user created → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Me**: token → verified by the middleware → profile returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless; logging out is the client dropping its token
//! - Tokens expire after the configured lifetime (30 days by default)
//! - Invalid credentials return 401 (no information leakage)

/// bcrypt password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, register, AuthResponse, LoginRequest};
pub use password::{PasswordError, PasswordHasher};
pub use sessions::{Claims, TokenError, TokenService};
