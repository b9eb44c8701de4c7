use chrono::{DateTime, Utc};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Admin,
    Member,
}

impl Default for AccountRole {
    fn default() -> Self {
        Self::Member
    }
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

/// Account model
#[derive(Clone, Debug)]
pub struct Account {
    pub id: i64,
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, AccountRole::Admin)
    }
}
