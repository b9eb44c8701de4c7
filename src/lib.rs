//! # Quillnotes Accounts
//!
//! Account workflow core for the Quillnotes product: a typed account
//! action dispatcher in front of an injected account service.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **domain**: account entities, request types, ports and errors
//! - **application**: the action dispatcher, the identity service and
//!   session state
//! - **infrastructure**: persistence (SeaORM/SQLite, in-memory) and
//!   crypto adapters (bcrypt, JWT, secret digests)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export the dispatcher surface
pub use application::account::{AccountActionDispatcher, FormError, Outcome};
pub use domain::{AccountService, CallerContext, DispatchError};
