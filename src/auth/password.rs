//! Password hashing and verification using bcrypt.

use crate::error::AppError;

/// One-way transform of plaintext passwords. bcrypt embeds a fresh random
/// salt in every hash, so two hashes of the same password differ while both
/// verify, and its comparison is constant-time over the digest.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
    }

    /// A malformed or unknown hash format verifies as false, never as an
    /// error, so callers cannot distinguish it from a wrong password.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}
