//! Inbound ports — the account service contract consumed by the dispatcher
//!
//! The concrete implementation owns credential storage, password hashing,
//! session issuance and role mutation. The dispatcher sees only this
//! trait and the tagged results it returns.

use async_trait::async_trait;

use crate::domain::account::{LoginRequest, PromoteRequest, RegisterRequest};
use crate::domain::context::CallerContext;
use crate::domain::error::ServiceResult;
use crate::domain::session::Session;

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create a new member account.
    async fn register(&self, request: RegisterRequest) -> ServiceResult<()>;

    /// Verify credentials and issue a session.
    async fn log_in(&self, request: LoginRequest) -> ServiceResult<Session>;

    /// End the caller's sessions. Succeeds when none exist.
    async fn log_out(&self, ctx: &CallerContext) -> ServiceResult<()>;

    /// Promote the calling account to admin, guarded by the secret key.
    async fn promote_to_admin(&self, request: PromoteRequest) -> ServiceResult<()>;
}
