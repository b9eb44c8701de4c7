//! Configuration module
//!
//! Reads TOML configuration from `~/.config/quillnotes/accounts.toml`
//! by default; override the path with `ACCOUNTS_CONFIG`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub security: SecuritySection,
    pub logging: LoggingSection,
    pub bootstrap: BootstrapSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite database file path
    pub path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./accounts.db".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    /// Secret for signing session tokens
    pub jwt_secret: String,
    /// Plain session lifetime in hours
    pub jwt_expiration_hours: i64,
    /// "Remember me" session lifetime in hours
    pub remember_me_expiration_hours: i64,
    /// Promotion secret. Empty disables promotion.
    pub admin_secret_key: String,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            jwt_expiration_hours: 24,
            remember_me_expiration_hours: 24 * 30,
            admin_secret_key: std::env::var("ADMIN_SECRET_KEY").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level filter (e.g. "info", "quillnotes_accounts=debug")
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BootstrapSection {
    /// Admin account seeded at startup when absent from the store
    pub admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapAdmin {
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Default configuration file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quillnotes")
        .join("accounts.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            path = "/var/lib/quillnotes/accounts.db"

            [security]
            admin_secret_key = "let-me-in"

            [bootstrap.admin]
            full_name = "Site Admin"
            user_name = "admin"
            email = "admin@quillnotes.test"
            password = "ChangeMe123!"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.database.path, "/var/lib/quillnotes/accounts.db");
        assert_eq!(
            cfg.database.connection_url(),
            "sqlite:///var/lib/quillnotes/accounts.db?mode=rwc"
        );
        assert_eq!(cfg.security.admin_secret_key, "let-me-in");
        assert_eq!(cfg.security.jwt_expiration_hours, 24);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.bootstrap.admin.unwrap().user_name, "admin");
    }

    #[test]
    fn empty_config_is_valid() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.database.path, "./accounts.db");
        assert!(cfg.bootstrap.admin.is_none());
    }
}
