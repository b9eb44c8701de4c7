use super::AccountRole;

/// Repository-facing account creation data. The password is already
/// hashed by the time it reaches a repository.
#[derive(Debug, Clone)]
pub struct NewAccountDto {
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<AccountRole>,
}
