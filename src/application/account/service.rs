//! Identity account service — application-layer orchestration
//!
//! All account business logic lives here: credential checks, password
//! hashing, session issuance and role mutation. The dispatcher stays a
//! thin translator that delegates to this service through the
//! [`AccountService`] port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::application::session::SharedSessionRegistry;
use crate::domain::{
    Account, AccountRepositoryInterface, AccountRole, AccountService, CallerContext, DomainError,
    ErrorEntry, LoginRequest, NewAccountDto, PromoteRequest, RegisterRequest, ServiceError,
    ServiceResult, Session,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::crypto::secret::SecretDigest;

/// Identity service — implements the account service port on top of a
/// repository, the session registry and the crypto adapters.
///
/// Generic over `R: AccountRepositoryInterface` so it stays decoupled
/// from the concrete persistence layer.
pub struct IdentityService<R: AccountRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
    admin_secret: SecretDigest,
    sessions: SharedSessionRegistry,
}

impl<R: AccountRepositoryInterface> IdentityService<R> {
    pub fn new(
        repo: Arc<R>,
        jwt_config: JwtConfig,
        admin_secret: SecretDigest,
        sessions: SharedSessionRegistry,
    ) -> Self {
        Self {
            repo,
            jwt_config,
            admin_secret,
            sessions,
        }
    }

    fn issue_session(&self, account: &Account, remember_me: bool) -> ServiceResult<Session> {
        let hours = if remember_me {
            self.jwt_config.remember_me_hours
        } else {
            self.jwt_config.expiration_hours
        };

        let token = create_token(
            account.id,
            &account.user_name,
            account.role.as_str(),
            hours,
            &self.jwt_config,
        )
        .map_err(|e| ServiceError::Unavailable(format!("failed to issue session token: {}", e)))?;

        Ok(Session {
            token,
            token_type: "Bearer".to_string(),
            account_id: account.id,
            expires_at: Utc::now() + Duration::hours(hours),
        })
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn storage_err(e: DomainError) -> ServiceError {
    ServiceError::Unavailable(e.to_string())
}

/// Login failures collapse to one entry regardless of cause.
fn invalid_credentials() -> ServiceError {
    ServiceError::Rejected(vec![ErrorEntry::new(
        "InvalidCredentials",
        "Invalid email or password",
    )])
}

/// Promotion failures collapse to one entry regardless of cause.
fn invalid_secret() -> ServiceError {
    ServiceError::Rejected(vec![ErrorEntry::new(
        "InvalidSecretKey",
        "Invalid admin secret key",
    )])
}

#[async_trait]
impl<R: AccountRepositoryInterface> AccountService for IdentityService<R> {
    async fn register(&self, request: RegisterRequest) -> ServiceResult<()> {
        let mut rejections = Vec::new();

        if request.full_name.trim().is_empty() {
            rejections.push(ErrorEntry::new("InvalidFullName", "Full name is required"));
        }
        if request.user_name.len() < 3 || request.user_name.len() > 50 {
            rejections.push(ErrorEntry::new(
                "InvalidUserName",
                "User name must be 3-50 characters",
            ));
        }
        if !request.email.contains('@') {
            rejections.push(ErrorEntry::new("InvalidEmail", "Invalid email address"));
        }
        if request.password.len() < 8 {
            rejections.push(ErrorEntry::new(
                "PasswordTooShort",
                "Password must be at least 8 characters",
            ));
        }

        if rejections.is_empty() {
            if self
                .repo
                .get_account_by_user_name(&request.user_name)
                .await
                .map_err(storage_err)?
                .is_some()
            {
                rejections.push(ErrorEntry::new(
                    "DuplicateUserName",
                    format!("User name '{}' is already taken", request.user_name),
                ));
            }
            if self
                .repo
                .get_account_by_email(&request.email)
                .await
                .map_err(storage_err)?
                .is_some()
            {
                rejections.push(ErrorEntry::new(
                    "DuplicateEmail",
                    format!("Email '{}' is already registered", request.email),
                ));
            }
        }

        if !rejections.is_empty() {
            return Err(ServiceError::Rejected(rejections));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| ServiceError::Unavailable(format!("failed to hash password: {}", e)))?;

        let dto = NewAccountDto {
            full_name: request.full_name,
            user_name: request.user_name,
            email: request.email,
            password_hash,
            role: None, // default Member
        };

        let account = match self.repo.create_account(dto).await {
            Ok(account) => account,
            // Lost the uniqueness race between check and insert.
            Err(DomainError::Conflict(msg)) => {
                return Err(ServiceError::Rejected(vec![ErrorEntry::new(
                    "DuplicateUserName",
                    msg,
                )]));
            }
            Err(e) => return Err(storage_err(e)),
        };

        info!(
            account_id = account.id,
            user_name = %account.user_name,
            "new account registered"
        );
        Ok(())
    }

    async fn log_in(&self, request: LoginRequest) -> ServiceResult<Session> {
        let account = self
            .repo
            .get_account_by_email(&request.email)
            .await
            .map_err(storage_err)?;

        let Some(account) = account else {
            return Err(invalid_credentials());
        };

        if !account.is_active {
            // Reported identically to a bad password on purpose.
            return Err(invalid_credentials());
        }

        let valid = verify_password(&request.password, &account.password_hash).unwrap_or(false);
        if !valid {
            return Err(invalid_credentials());
        }

        // Best-effort stamp; a failure here must not fail the login.
        if let Err(e) = self.repo.touch_last_login(account.id).await {
            warn!(account_id = account.id, error = %e, "failed to stamp last login");
        }

        let session = self.issue_session(&account, request.remember_me)?;
        self.sessions.record(&session);

        info!(account_id = account.id, "account logged in");
        Ok(session)
    }

    async fn log_out(&self, ctx: &CallerContext) -> ServiceResult<()> {
        let Ok(account_id) = ctx.account_id() else {
            return Err(ServiceError::Rejected(vec![ErrorEntry::new(
                "InvalidCaller",
                "Caller context carries no account id",
            )]));
        };

        self.sessions.revoke(account_id);
        info!(account_id, "account logged out");
        Ok(())
    }

    async fn promote_to_admin(&self, request: PromoteRequest) -> ServiceResult<()> {
        if !self.admin_secret.matches(&request.admin_secret_key) {
            warn!(
                account_id = request.caller_account_id,
                "promotion refused: wrong admin secret"
            );
            return Err(invalid_secret());
        }

        let account = self
            .repo
            .get_account_by_id(request.caller_account_id)
            .await
            .map_err(storage_err)?;

        let Some(account) = account else {
            // An authenticated caller without a stored account. Refused
            // with the same entry as a wrong key.
            warn!(
                account_id = request.caller_account_id,
                "promotion refused: unknown account"
            );
            return Err(invalid_secret());
        };

        if account.is_admin() {
            return Ok(());
        }

        self.repo
            .update_account_role(account.id, AccountRole::Admin)
            .await
            .map_err(storage_err)?;

        info!(account_id = account.id, "account promoted to admin");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::SessionRegistry;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::storage::MemoryAccountRepository;

    const ADMIN_SECRET: &str = "let-me-in";

    fn service() -> (
        Arc<MemoryAccountRepository>,
        SharedSessionRegistry,
        IdentityService<MemoryAccountRepository>,
    ) {
        let repo = Arc::new(MemoryAccountRepository::new());
        let sessions = SessionRegistry::shared();
        let service = IdentityService::new(
            repo.clone(),
            JwtConfig::default(),
            SecretDigest::from_plain(ADMIN_SECRET),
            sessions.clone(),
        );
        (repo, sessions, service)
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            full_name: "Jane Doe".to_string(),
            user_name: "jane".to_string(),
            email: "jane@x.com".to_string(),
            password: "Secret123!".to_string(),
        }
    }

    fn login_request(password: &str) -> LoginRequest {
        LoginRequest {
            email: "jane@x.com".to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    #[tokio::test]
    async fn register_then_log_in_issues_a_verifiable_session() {
        let (_, sessions, service) = service();

        service.register(register_request()).await.unwrap();
        let session = service.log_in(login_request("Secret123!")).await.unwrap();

        let claims = verify_token(&session.token, &JwtConfig::default()).unwrap();
        assert_eq!(claims.sub, session.account_id.to_string());
        assert_eq!(claims.username, "jane");
        assert!(sessions.is_active(session.account_id));
    }

    #[tokio::test]
    async fn duplicate_registration_reports_coded_rejections_in_order() {
        let (_, _, service) = service();
        service.register(register_request()).await.unwrap();

        let err = service.register(register_request()).await.unwrap_err();
        let ServiceError::Rejected(entries) = err else {
            panic!("expected rejection");
        };
        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["DuplicateUserName", "DuplicateEmail"]);
    }

    #[tokio::test]
    async fn weak_registration_is_rejected_before_any_write() {
        let (repo, _, service) = service();
        let request = RegisterRequest {
            password: "short".to_string(),
            ..register_request()
        };

        let err = service.register(request).await.unwrap_err();
        let ServiceError::Rejected(entries) = err else {
            panic!("expected rejection");
        };
        assert_eq!(entries[0].code, "PasswordTooShort");
        assert!(repo
            .get_account_by_user_name("jane")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn log_in_failures_are_indistinguishable() {
        let (_, _, service) = service();
        service.register(register_request()).await.unwrap();

        let wrong_password = service.log_in(login_request("wrong")).await.unwrap_err();
        let unknown_email = service
            .log_in(LoginRequest {
                email: "nobody@x.com".to_string(),
                password: "Secret123!".to_string(),
                remember_me: false,
            })
            .await
            .unwrap_err();

        let (ServiceError::Rejected(a), ServiceError::Rejected(b)) =
            (wrong_password, unknown_email)
        else {
            panic!("expected rejections");
        };
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn log_out_revokes_sessions_and_is_idempotent() {
        let (_, sessions, service) = service();
        service.register(register_request()).await.unwrap();
        let session = service.log_in(login_request("Secret123!")).await.unwrap();
        let ctx = CallerContext::new(session.account_id.to_string(), "jane");

        service.log_out(&ctx).await.unwrap();
        assert!(!sessions.is_active(session.account_id));

        // Already logged out: still fine.
        service.log_out(&ctx).await.unwrap();
    }

    #[tokio::test]
    async fn promotion_with_the_right_secret_flips_the_role() {
        let (repo, _, service) = service();
        service.register(register_request()).await.unwrap();
        let account = repo
            .get_account_by_user_name("jane")
            .await
            .unwrap()
            .unwrap();

        service
            .promote_to_admin(PromoteRequest {
                caller_account_id: account.id,
                admin_secret_key: ADMIN_SECRET.to_string(),
            })
            .await
            .unwrap();

        let account = repo.get_account_by_id(account.id).await.unwrap().unwrap();
        assert!(account.is_admin());
    }

    #[tokio::test]
    async fn promotion_with_the_wrong_secret_leaves_the_role_unchanged() {
        let (repo, _, service) = service();
        service.register(register_request()).await.unwrap();
        let account = repo
            .get_account_by_user_name("jane")
            .await
            .unwrap()
            .unwrap();

        let err = service
            .promote_to_admin(PromoteRequest {
                caller_account_id: account.id,
                admin_secret_key: "bad".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(_)));

        let account = repo.get_account_by_id(account.id).await.unwrap().unwrap();
        assert!(!account.is_admin());
    }

    #[tokio::test]
    async fn dispatcher_round_trip_against_the_real_service() {
        use crate::application::account::dispatcher::{
            AccountActionDispatcher, FormError, Outcome,
        };
        use crate::application::account::forms::{LogInForm, SignUpForm};

        let (_, _, identity) = service();
        let dispatcher = AccountActionDispatcher::new(Arc::new(identity));

        let outcome = dispatcher
            .handle_sign_up(SignUpForm {
                full_name: "Jane Doe".to_string(),
                user_name: "jane".to_string(),
                email: "jane@x.com".to_string(),
                password: "Secret123!".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::RedirectTo("home".to_string()));

        let outcome = dispatcher
            .handle_log_in(LogInForm {
                email: "jane@x.com".to_string(),
                password: "wrong".to_string(),
                remember_me: false,
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::ShowErrors(vec![FormError::form_level("Invalid login attempt.")])
        );

        let outcome = dispatcher
            .handle_log_in(LogInForm {
                email: "jane@x.com".to_string(),
                password: "Secret123!".to_string(),
                remember_me: false,
            })
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::RedirectTo("notes-home".to_string()));
    }

    #[tokio::test]
    async fn promotion_is_idempotent_for_admins() {
        let (repo, _, service) = service();
        service.register(register_request()).await.unwrap();
        let account = repo
            .get_account_by_user_name("jane")
            .await
            .unwrap()
            .unwrap();

        let request = PromoteRequest {
            caller_account_id: account.id,
            admin_secret_key: ADMIN_SECRET.to_string(),
        };
        service.promote_to_admin(request.clone()).await.unwrap();
        service.promote_to_admin(request).await.unwrap();
    }
}
