use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("could not hash password: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("stored credential is not an argon2 hash: {0}")]
    NotAHash(argon2::password_hash::Error),
}

/// Argon2id PHC string for `plain`, salted from the OS RNG.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash failed");
            PasswordError::Hash(e)
        })
}

/// `Ok(false)` on a mismatch. A stored value that is not a PHC string
/// (for example a clear-text password) is an error, never a match.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordError::NotAHash)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Whether `stored` must be replaced so that `plain` verifies against it.
///
/// Used by provisioning to leave a working hash untouched across reruns.
pub fn needs_rehash(plain: &str, stored: Option<&str>) -> bool {
    match stored.map(|s| verify_password(plain, s)) {
        Some(Ok(true)) => false,
        Some(Ok(false)) => true,
        Some(Err(e)) => {
            debug!(error = %e, "stored credential unusable; rehashing");
            true
        }
        None => true,
    }
}
