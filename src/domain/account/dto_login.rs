/// Login request passed to the account service.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Extends the issued session lifetime when set.
    pub remember_me: bool,
}
