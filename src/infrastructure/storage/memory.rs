//! In-memory account store for tests and ephemeral deployments

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    Account, AccountRepositoryInterface, AccountRole, DomainError, DomainResult, NewAccountDto,
};

/// In-memory account repository with the same semantics as the SQL
/// adapter: ids start at 1 and user name/email are unique.
pub struct MemoryAccountRepository {
    accounts: DashMap<i64, Account>,
    id_counter: AtomicI64,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepositoryInterface for MemoryAccountRepository {
    async fn create_account(&self, dto: NewAccountDto) -> DomainResult<Account> {
        let taken = self
            .accounts
            .iter()
            .any(|a| a.user_name == dto.user_name || a.email == dto.email);
        if taken {
            return Err(DomainError::Conflict(
                "User name or email already exists".to_string(),
            ));
        }

        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let account = Account {
            id,
            full_name: dto.full_name,
            user_name: dto.user_name,
            email: dto.email,
            password_hash: dto.password_hash,
            role: dto.role.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn get_account_by_id(&self, id: i64) -> DomainResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.value().clone()))
    }

    async fn get_account_by_user_name(&self, user_name: &str) -> DomainResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.user_name == user_name)
            .map(|a| a.value().clone()))
    }

    async fn get_account_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.value().clone()))
    }

    async fn update_account_role(&self, id: i64, role: AccountRole) -> DomainResult<()> {
        let Some(mut account) = self.accounts.get_mut(&id) else {
            return Err(DomainError::NotFound {
                entity: "Account",
                field: "id",
                value: id.to_string(),
            });
        };

        account.role = role;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_last_login(&self, id: i64) -> DomainResult<()> {
        let Some(mut account) = self.accounts.get_mut(&id) else {
            return Err(DomainError::NotFound {
                entity: "Account",
                field: "id",
                value: id.to_string(),
            });
        };

        let now = Utc::now();
        account.last_login_at = Some(now);
        account.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(user_name: &str, email: &str) -> NewAccountDto {
        NewAccountDto {
            full_name: "Jane Doe".to_string(),
            user_name: user_name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn ids_start_at_one() {
        let repo = MemoryAccountRepository::new();
        let account = repo
            .create_account(new_account("jane", "jane@x.com"))
            .await
            .unwrap();
        assert_eq!(account.id, 1);
    }

    #[tokio::test]
    async fn uniqueness_matches_the_sql_adapter() {
        let repo = MemoryAccountRepository::new();
        repo.create_account(new_account("jane", "jane@x.com"))
            .await
            .unwrap();

        let err = repo
            .create_account(new_account("jane", "other@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn role_updates_are_visible_to_lookups() {
        let repo = MemoryAccountRepository::new();
        let account = repo
            .create_account(new_account("jane", "jane@x.com"))
            .await
            .unwrap();

        repo.update_account_role(account.id, AccountRole::Admin)
            .await
            .unwrap();
        let reloaded = repo.get_account_by_id(account.id).await.unwrap().unwrap();
        assert!(reloaded.is_admin());
    }
}
