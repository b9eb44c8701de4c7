/// Promotion request passed to the account service.
#[derive(Debug, Clone)]
pub struct PromoteRequest {
    /// Id of the account to promote. Always derived from the verified
    /// caller identity, never taken from the request body.
    pub caller_account_id: i64,
    pub admin_secret_key: String,
}
