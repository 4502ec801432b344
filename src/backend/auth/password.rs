/**
 * Password Hashing
 *
 * Passwords are stored only as bcrypt hashes. bcrypt embeds a random salt and
 * the cost factor in the hash string, and `verify` recomputes with that salt
 * and compares in constant time.
 */

use bcrypt::{hash, verify};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Salted one-way hash of `password`
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(hash(password, self.cost)?)
    }

    /// Check `candidate` against a stored hash
    ///
    /// A corrupt stored hash counts as a mismatch.
    pub fn verify(&self, candidate: &str, password_hash: &str) -> bool {
        match verify(candidate, password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password verification error: {:?}", e);
                false
            }
        }
    }
}

impl PasswordHasher {
    /// Spend the same bcrypt work as `verify` for an account that does not
    /// exist, so unknown emails are not answered faster. Never matches.
    pub fn verify_absent(&self, candidate: &str) -> bool {
        if let Err(e) = hash(candidate, self.cost) {
            tracing::error!("Password hashing error: {:?}", e);
        }
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
