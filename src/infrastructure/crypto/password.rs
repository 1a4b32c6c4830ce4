//! Password hashing utilities

use bcrypt::{hash, verify};

/// bcrypt work factor for stored credentials.
pub const PASSWORD_COST: u32 = 10;

/// Hash a password using bcrypt with a random salt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, PASSWORD_COST)
}

/// Verify a password against a stored digest.
///
/// A malformed digest is treated as a mismatch.
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(password, digest).unwrap_or(false)
}
