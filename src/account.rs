//! The `/account` endpoint.
//!
//! See: <https://docs.api.video/5.1/account>

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;

/// Read-only access to the authenticated account. Obtained from
/// [`Client::account`].
#[derive(Clone, Copy)]
pub struct AccountService<'a> {
    pub(crate) client: &'a Client,
}

/// The authenticated account, its quota, and its enabled features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<Quota>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Encoding quota, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    #[serde(default)]
    pub quota_used: u64,
    #[serde(default)]
    pub quota_remaining: u64,
    #[serde(default)]
    pub quota_total: u64,
}

impl AccountService<'_> {
    /// Fetches the account behind the API key.
    pub async fn get(&self) -> Result<Account, Error> {
        self.client.get("account").await
    }
}
