//! Password hashing at the write path.
//!
//! The `user.password` column stores an opaque string. Callers that go
//! through [`NewUser::with_password`](crate::db::NewUser::with_password) or
//! [`UserChangeset::with_password`](crate::db::UserChangeset::with_password)
//! store an Argon2id PHC string here instead of the plaintext.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{Error, Result};

/// Hash `password` with Argon2id and a random salt.
///
/// The PHC string produced with default parameters is under 100 characters,
/// so it fits the `user.password` column.
///
/// # Errors
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Credential(format!("failed to hash password: {e}")))
}

/// Check `password` against a stored PHC string. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
