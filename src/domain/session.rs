//! Issued session value

use chrono::{DateTime, Utc};

/// A session issued by a successful log-in.
///
/// Returned explicitly to the caller instead of being stashed in any
/// ambient state; how the token travels onward (cookie, header) is the
/// transport layer's concern.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub token_type: String,
    pub account_id: i64,
    pub expires_at: DateTime<Utc>,
}
