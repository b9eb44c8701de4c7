//! Password hashing

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plain password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a plain password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash_password("Secret123!").unwrap();
        assert_ne!(hashed, "Secret123!");
        assert!(verify_password("Secret123!", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }
}
