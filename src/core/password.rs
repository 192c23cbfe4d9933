//! Password hashing using Argon2.

use crate::errors::{Error, Result};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::debug;

/// Hashes a password into a PHC string with a fresh random salt.
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Password {
            message: format!("Failed to hash password: {e}"),
        })?;
    debug!("Password hashed successfully");
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string.
pub fn verify(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| Error::Password {
        message: format!("Invalid password hash format: {e}"),
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Password {
            message: format!("Password verification error: {e}"),
        }),
    }
}
