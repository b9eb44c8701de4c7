//! Account action dispatcher
//!
//! Adapts submitted account forms into calls on the injected
//! [`AccountService`] and translates each result into an [`Outcome`].
//! The dispatcher owns no state of its own: every handler validates,
//! issues exactly one service call, and maps the single result.

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use crate::domain::{
    AccountService, CallerContext, DispatchError, LoginRequest, PromoteRequest, RegisterRequest,
    ServiceError,
};

use super::forms::{LogInForm, PromoteForm, SignUpForm};

/// Redirect target after most successful account actions.
pub const HOME: &str = "home";
/// Redirect target after a successful log-in.
pub const NOTES_HOME: &str = "notes-home";

/// Fixed message for failed log-in attempts. Deliberately does not say
/// whether the email or the password was wrong.
const INVALID_LOGIN_MESSAGE: &str = "Invalid login attempt.";
/// Fixed message for refused promotions, same rationale.
const INVALID_SECRET_MESSAGE: &str = "Invalid secret key";

/// A single user-visible error attached to a form field.
///
/// An empty `field` means the error applies to the form as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub field: String,
    pub message: String,
}

impl FormError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn form_level(message: impl Into<String>) -> Self {
        Self::new("", message)
    }
}

/// Dispatcher result for one user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action succeeded; the caller should redirect to this target.
    RedirectTo(String),
    /// The action was refused; re-render the form with these errors.
    ShowErrors(Vec<FormError>),
}

impl Outcome {
    fn redirect(target: &str) -> Self {
        Self::RedirectTo(target.to_string())
    }
}

/// Account action dispatcher — one handler per user action.
///
/// Generic over `S: AccountService` so it stays decoupled from the
/// concrete identity implementation.
pub struct AccountActionDispatcher<S: AccountService> {
    service: Arc<S>,
}

impl<S: AccountService> AccountActionDispatcher<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Handle a sign-up form submission.
    pub async fn handle_sign_up(&self, form: SignUpForm) -> Result<Outcome, DispatchError> {
        if let Err(errors) = form.validate() {
            return Ok(Outcome::ShowErrors(field_errors(&errors)));
        }

        let request = RegisterRequest {
            full_name: form.full_name,
            user_name: form.user_name,
            email: form.email,
            password: form.password,
        };

        match self.service.register(request).await {
            Ok(()) => Ok(Outcome::redirect(HOME)),
            Err(ServiceError::Rejected(entries)) => Ok(Outcome::ShowErrors(
                entries
                    .into_iter()
                    .map(|e| FormError::new(e.code, e.description))
                    .collect(),
            )),
            Err(ServiceError::Unavailable(reason)) => {
                error!(%reason, "account service unavailable during sign-up");
                Err(DispatchError::ServiceUnavailable(reason))
            }
        }
    }

    /// Handle a log-in form submission.
    pub async fn handle_log_in(&self, form: LogInForm) -> Result<Outcome, DispatchError> {
        if let Err(errors) = form.validate() {
            return Ok(Outcome::ShowErrors(field_errors(&errors)));
        }

        let request = LoginRequest {
            email: form.email,
            password: form.password,
            remember_me: form.remember_me,
        };

        match self.service.log_in(request).await {
            // The issued session travels back through the transport layer
            // (cookie, header); the redirect itself carries no session data.
            Ok(_session) => Ok(Outcome::redirect(NOTES_HOME)),
            Err(ServiceError::Rejected(_)) => Ok(Outcome::ShowErrors(vec![
                FormError::form_level(INVALID_LOGIN_MESSAGE),
            ])),
            Err(ServiceError::Unavailable(reason)) => {
                error!(%reason, "account service unavailable during log-in");
                Err(DispatchError::ServiceUnavailable(reason))
            }
        }
    }

    /// Handle a log-out. Authentication is a precondition enforced by the
    /// outer authorization gate.
    pub async fn handle_log_out(&self, ctx: &CallerContext) -> Result<Outcome, DispatchError> {
        match self.service.log_out(ctx).await {
            Ok(()) => {}
            // Logout is best-effort: a rejection still sends the caller home.
            Err(ServiceError::Rejected(entries)) => {
                warn!(?entries, "log-out rejected by account service");
            }
            Err(ServiceError::Unavailable(reason)) => {
                error!(%reason, "account service unavailable during log-out");
                return Err(DispatchError::ServiceUnavailable(reason));
            }
        }

        Ok(Outcome::redirect(HOME))
    }

    /// Handle a promote-to-admin form submission.
    pub async fn handle_promote(
        &self,
        ctx: &CallerContext,
        form: PromoteForm,
    ) -> Result<Outcome, DispatchError> {
        if let Err(errors) = form.validate() {
            return Ok(Outcome::ShowErrors(field_errors(&errors)));
        }

        // The caller id comes from the verified context, never the form.
        let caller_account_id = ctx.account_id()?;

        let request = PromoteRequest {
            caller_account_id,
            admin_secret_key: form.secret_key,
        };

        match self.service.promote_to_admin(request).await {
            Ok(()) => {
                info!(account_id = caller_account_id, "account promoted to admin");
                Ok(Outcome::redirect(HOME))
            }
            Err(ServiceError::Rejected(_)) => Ok(Outcome::ShowErrors(vec![
                FormError::form_level(INVALID_SECRET_MESSAGE),
            ])),
            Err(ServiceError::Unavailable(reason)) => {
                error!(%reason, "account service unavailable during promotion");
                Err(DispatchError::ServiceUnavailable(reason))
            }
        }
    }
}

/// Flatten `validator` errors into field-attributed form errors.
fn field_errors(errors: &validator::ValidationErrors) -> Vec<FormError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{:?}", e.code));
                FormError::new(field.to_string(), message)
            })
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────
