//! Quillnotes account store entry point
//!
//! Prepares the account store for the web tier: loads TOML configuration
//! (~/.config/quillnotes/accounts.toml), runs database migrations, and
//! seeds the bootstrap admin account when configured.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use quillnotes_accounts::config::BootstrapAdmin;
use quillnotes_accounts::domain::{AccountRepositoryInterface, AccountRole, NewAccountDto};
use quillnotes_accounts::infrastructure::crypto::password::hash_password;
use quillnotes_accounts::infrastructure::database::migrator::Migrator;
use quillnotes_accounts::infrastructure::database::repositories::AccountRepository;
use quillnotes_accounts::{default_config_path, init_database, AppConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ACCOUNTS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Preparing Quillnotes account store...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Bootstrap admin ────────────────────────────────────────
    let repo = Arc::new(AccountRepository::new(db));
    if let Some(admin) = &app_cfg.bootstrap.admin {
        seed_bootstrap_admin(repo.as_ref(), admin).await;
    }

    info!("Account store ready");
    Ok(())
}

/// Create the configured admin account unless it already exists.
async fn seed_bootstrap_admin(repo: &AccountRepository, admin: &BootstrapAdmin) {
    match repo.get_account_by_user_name(&admin.user_name).await {
        Ok(Some(_)) => {
            info!(user_name = %admin.user_name, "Bootstrap admin already exists");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to look up bootstrap admin: {}", e);
            return;
        }
    }

    let password_hash = match hash_password(&admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash bootstrap admin password: {}", e);
            return;
        }
    };

    let dto = NewAccountDto {
        full_name: admin.full_name.clone(),
        user_name: admin.user_name.clone(),
        email: admin.email.clone(),
        password_hash,
        role: Some(AccountRole::Admin),
    };

    match repo.create_account(dto).await {
        Ok(account) => info!(
            account_id = account.id,
            user_name = %account.user_name,
            "Bootstrap admin created"
        ),
        Err(e) => warn!("Failed to create bootstrap admin: {}", e),
    }
}
