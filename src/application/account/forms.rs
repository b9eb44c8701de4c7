//! Submitted account forms
//!
//! Mirrors what the web tier binds from POST bodies. Validation runs in
//! the dispatcher before any service call is made.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpForm {
    #[validate(length(min = 1, max = 100, message = "full name is required"))]
    pub full_name: String,
    #[validate(length(min = 3, max = 50, message = "user name must be 3-50 characters"))]
    pub user_name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogInForm {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PromoteForm {
    #[validate(length(min = 1, message = "secret key is required"))]
    pub secret_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_in_form_defaults_remember_me() {
        let form: LogInForm =
            serde_json::from_str(r#"{"email": "jane@x.com", "password": "pw"}"#).unwrap();
        assert!(!form.remember_me);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn sign_up_form_rejects_bad_email() {
        let form: SignUpForm = serde_json::from_str(
            r#"{"full_name": "Jane Doe", "user_name": "jane", "email": "nope", "password": "Secret123!"}"#,
        )
        .unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
