/// Registration request passed to the account service.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}
