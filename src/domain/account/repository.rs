use async_trait::async_trait;

use super::{Account, AccountRole, NewAccountDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepositoryInterface: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    async fn create_account(&self, dto: NewAccountDto) -> DomainResult<Account>;

    async fn get_account_by_id(&self, id: i64) -> DomainResult<Option<Account>>;
    async fn get_account_by_user_name(&self, user_name: &str) -> DomainResult<Option<Account>>;
    async fn get_account_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    /// Replace the account's role.
    async fn update_account_role(&self, id: i64, role: AccountRole) -> DomainResult<()>;

    /// Stamp the time of the last successful login.
    async fn touch_last_login(&self, id: i64) -> DomainResult<()>;
}
