//! Caller identity context

use crate::domain::error::DispatchError;

/// Authenticated caller context.
///
/// Built once from verified token claims by the authorization layer and
/// passed by value into the dispatcher. Handlers never touch raw claims.
#[derive(Debug, Clone)]
pub struct CallerContext {
    subject: String,
    user_name: String,
}

impl CallerContext {
    pub fn new(subject: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            user_name: user_name.into(),
        }
    }

    /// The numeric account id carried by the subject claim.
    ///
    /// Sessions are always issued with a numeric subject, so a parse
    /// failure here is a configuration defect, not user error.
    pub fn account_id(&self) -> Result<i64, DispatchError> {
        self.subject
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 1)
            .ok_or_else(|| {
                DispatchError::Identity(format!(
                    "subject claim '{}' is not a valid account id",
                    self.subject
                ))
            })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}
