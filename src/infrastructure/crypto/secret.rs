//! Admin secret key verification
//!
//! The promotion secret is compared by SHA-256 digest so the configured
//! key never has to be kept around in plain form after startup.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of the configured promotion secret.
///
/// An empty configured secret disables promotion entirely: no presented
/// key will ever match.
#[derive(Debug, Clone)]
pub struct SecretDigest(Option<String>);

impl SecretDigest {
    /// Digest a plain secret from configuration.
    pub fn from_plain(secret: &str) -> Self {
        if secret.is_empty() {
            Self(None)
        } else {
            Self(Some(digest_hex(secret)))
        }
    }

    /// Compare a presented key against the stored digest.
    pub fn matches(&self, presented: &str) -> bool {
        self.0
            .as_deref()
            .map(|digest| digest_hex(presented) == digest)
            .unwrap_or(false)
    }
}

/// SHA-256 digest of a string, hex-encoded.
pub fn digest_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret_is_accepted() {
        let digest = SecretDigest::from_plain("let-me-in");
        assert!(digest.matches("let-me-in"));
        assert!(!digest.matches("let-me-out"));
    }

    #[test]
    fn empty_configured_secret_never_matches() {
        let digest = SecretDigest::from_plain("");
        assert!(!digest.matches(""));
        assert!(!digest.matches("anything"));
    }
}
