//! Session registry — tracks sessions issued to logged-in accounts

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::domain::Session;

/// Thread-safe registry of issued sessions, keyed by account id.
///
/// A signed token stays verifiable after log-out; the registry is the
/// server-side record that lets log-out actually end a session.
pub struct SessionRegistry {
    sessions: DashMap<i64, Vec<Session>>,
}

/// Shared, reference-counted session registry
pub type SharedSessionRegistry = Arc<SessionRegistry>;

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Wrap in `Arc` for shared ownership
    pub fn shared() -> SharedSessionRegistry {
        Arc::new(Self::new())
    }

    /// Record a freshly issued session.
    pub fn record(&self, session: &Session) {
        debug!(account_id = session.account_id, "recording session");
        self.sessions
            .entry(session.account_id)
            .or_default()
            .push(session.clone());
    }

    /// Drop every session of the given account. Revoking an account with
    /// no sessions is a no-op.
    pub fn revoke(&self, account_id: i64) {
        if self.sessions.remove(&account_id).is_some() {
            debug!(account_id, "revoked sessions");
        }
    }

    /// Whether the account currently has at least one recorded session.
    pub fn is_active(&self, account_id: i64) -> bool {
        self.sessions
            .get(&account_id)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    }

    /// Number of accounts with recorded sessions.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn session(account_id: i64) -> Session {
        Session {
            token: format!("token-{account_id}"),
            token_type: "Bearer".to_string(),
            account_id,
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn record_and_revoke() {
        let registry = SessionRegistry::new();
        registry.record(&session(1));
        registry.record(&session(1));
        registry.record(&session(2));
        assert!(registry.is_active(1));
        assert_eq!(registry.count(), 2);

        registry.revoke(1);
        assert!(!registry.is_active(1));
        assert!(registry.is_active(2));
    }

    #[test]
    fn revoking_twice_is_harmless() {
        let registry = SessionRegistry::new();
        registry.record(&session(5));
        registry.revoke(5);
        registry.revoke(5);
        assert!(!registry.is_active(5));
    }
}
