//! Session token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::CallerContext;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Plain session lifetime in hours
    pub expiration_hours: i64,
    /// "Remember me" session lifetime in hours
    pub remember_me_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            expiration_hours: 24,
            remember_me_hours: 24 * 30,
            issuer: "quillnotes-accounts".to_string(),
        }
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (account id, decimal)
    pub sub: String,
    /// User name
    pub username: String,
    /// Account role
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    /// Create new TokenClaims for an account
    pub fn new(
        account_id: i64,
        user_name: &str,
        role: &str,
        valid_for_hours: i64,
        config: &JwtConfig,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(valid_for_hours);

        Self {
            sub: account_id.to_string(),
            username: user_name.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Check if the account has the admin role
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Build the typed caller context the dispatcher works with.
    pub fn to_caller_context(&self) -> CallerContext {
        CallerContext::new(self.sub.clone(), self.username.clone())
    }
}

/// Create a session token for an account
pub fn create_token(
    account_id: i64,
    user_name: &str,
    role: &str,
    valid_for_hours: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let token_claims = TokenClaims::new(account_id, user_name, role, valid_for_hours, config);

    encode(
        &Header::default(),
        &token_claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a session token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_token() {
        let config = JwtConfig::default();
        let token = create_token(7, "jane", "member", 1, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "jane");
        assert!(!claims.is_expired());
        assert!(!claims.is_admin());
        assert_eq!(claims.to_caller_context().account_id().unwrap(), 7);
    }

    #[test]
    fn invalid_token_is_rejected() {
        let config = JwtConfig::default();
        assert!(verify_token("invalid-token", &config).is_err());
    }
}
