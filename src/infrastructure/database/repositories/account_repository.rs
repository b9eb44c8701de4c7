use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use crate::domain::{
    Account, AccountRepositoryInterface, AccountRole, DomainError, DomainResult, NewAccountDto,
};
use crate::infrastructure::database::entities::account;

pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: account::AccountRole) -> AccountRole {
    match role {
        account::AccountRole::Admin => AccountRole::Admin,
        account::AccountRole::Member => AccountRole::Member,
    }
}

fn domain_role_to_entity(role: &AccountRole) -> account::AccountRole {
    match role {
        AccountRole::Admin => account::AccountRole::Admin,
        AccountRole::Member => account::AccountRole::Member,
    }
}

fn account_model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        full_name: model.full_name,
        user_name: model.user_name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AccountRepositoryInterface for AccountRepository {
    async fn create_account(&self, dto: NewAccountDto) -> DomainResult<Account> {
        let now = Utc::now();
        let role = dto
            .role
            .as_ref()
            .map_or(account::AccountRole::Member, domain_role_to_entity);

        let new_account = account::ActiveModel {
            id: NotSet,
            full_name: Set(dto.full_name),
            user_name: Set(dto.user_name),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            role: Set(role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let inserted = new_account.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("User name or email already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(account_model_to_domain(inserted))
    }

    async fn get_account_by_id(&self, id: i64) -> DomainResult<Option<Account>> {
        let model = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn get_account_by_user_name(&self, user_name: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::UserName.eq(user_name))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn get_account_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn update_account_role(&self, id: i64, role: AccountRole) -> DomainResult<()> {
        let existing = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Account",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: account::ActiveModel = existing.into();
        active.role = Set(domain_role_to_entity(&role));
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn touch_last_login(&self, id: i64) -> DomainResult<()> {
        let existing = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Account",
                field: "id",
                value: id.to_string(),
            });
        };

        let now = Utc::now();
        let mut active: account::ActiveModel = existing.into();
        active.last_login_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn test_repo() -> AccountRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        AccountRepository::new(db)
    }

    fn new_account(user_name: &str, email: &str) -> NewAccountDto {
        NewAccountDto {
            full_name: "Jane Doe".to_string(),
            user_name: user_name.to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$fake-hash".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn created_accounts_get_positive_sequential_ids() {
        let repo = test_repo().await;

        let first = repo
            .create_account(new_account("jane", "jane@x.com"))
            .await
            .unwrap();
        let second = repo
            .create_account(new_account("john", "john@x.com"))
            .await
            .unwrap();

        assert!(first.id >= 1);
        assert_eq!(second.id, first.id + 1);
        assert_eq!(first.role, AccountRole::Member);
        assert!(first.is_active);
    }

    #[tokio::test]
    async fn lookups_by_id_user_name_and_email_agree() {
        let repo = test_repo().await;
        let created = repo
            .create_account(new_account("jane", "jane@x.com"))
            .await
            .unwrap();

        let by_id = repo.get_account_by_id(created.id).await.unwrap().unwrap();
        let by_name = repo
            .get_account_by_user_name("jane")
            .await
            .unwrap()
            .unwrap();
        let by_email = repo
            .get_account_by_email("jane@x.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(by_id.id, created.id);
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_email.id, created.id);
        assert!(repo.get_account_by_user_name("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_user_name_or_email_is_a_conflict() {
        let repo = test_repo().await;
        repo.create_account(new_account("jane", "jane@x.com"))
            .await
            .unwrap();

        let same_name = repo
            .create_account(new_account("jane", "other@x.com"))
            .await
            .unwrap_err();
        let same_email = repo
            .create_account(new_account("other", "jane@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(same_name, DomainError::Conflict(_)));
        assert!(matches!(same_email, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn role_update_and_login_stamp_persist() {
        let repo = test_repo().await;
        let created = repo
            .create_account(new_account("jane", "jane@x.com"))
            .await
            .unwrap();

        repo.update_account_role(created.id, AccountRole::Admin)
            .await
            .unwrap();
        repo.touch_last_login(created.id).await.unwrap();

        let reloaded = repo.get_account_by_id(created.id).await.unwrap().unwrap();
        assert!(reloaded.is_admin());
        assert!(reloaded.last_login_at.is_some());
    }

    #[tokio::test]
    async fn updates_on_missing_accounts_are_not_found() {
        let repo = test_repo().await;
        let err = repo
            .update_account_role(42, AccountRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
