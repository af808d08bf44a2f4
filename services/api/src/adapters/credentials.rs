//! services/api/src/adapters/credentials.rs
//!
//! Argon2 password hashing for the account map. Implements the
//! `CredentialHasher` port from the `core` crate.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tongue_balance_core::ports::{CredentialHasher, PortError, PortResult};
use tracing::{error, warn};

/// Stores passwords as PHC-format Argon2 hashes.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> PortResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!("Failed to hash password: {:?}", e);
                PortError::Unexpected("Failed to hash password".to_string())
            })
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored) {
            Ok(hash) => hash,
            Err(e) => {
                // Accounts created before hashing was switched on.
                warn!("Stored credential is not an Argon2 hash: {:?}", e);
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_and_differ_per_call() {
        let hasher = Argon2Hasher::new();
        let first = hasher.hash("hunter2").unwrap();
        let second = hasher.hash("hunter2").unwrap();

        assert_ne!(first, "hunter2");
        assert_ne!(first, second);
        assert!(hasher.verify("hunter2", &first));
        assert!(!hasher.verify("hunter3", &first));
    }

    #[test]
    fn plain_stored_values_never_verify() {
        assert!(!Argon2Hasher::new().verify("hunter2", "hunter2"));
    }
}
