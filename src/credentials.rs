//! Bearer-credential bookkeeping.
//!
//! The api.video API authenticates every call with a short-lived access
//! token obtained by exchanging the account's long-lived API key. This
//! module tracks one such token together with its computed expiry instant;
//! the exchange itself lives on [`Client`](crate::Client), which owns the
//! HTTP stack.

use std::time::{Duration, SystemTime};

use serde::Deserialize;

/// Wire shape of a successful `POST /auth/api-key` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    #[allow(dead_code)]
    pub(crate) token_type: String,
    pub(crate) refresh_token: String,
    pub(crate) expires_in: u64,
}

/// A bearer credential with a known expiry instant.
///
/// A credential is fresh iff the current time is strictly before
/// `expires_at`. Credentials are replaced wholesale on refresh and never
/// partially mutated; the refresh token is stored for completeness but the
/// client renews by re-exchanging the API key.
#[derive(Debug, Clone)]
pub(crate) struct Credential {
    access_token: String,
    #[allow(dead_code)]
    refresh_token: String,
    expires_at: SystemTime,
}

impl Credential {
    /// Builds a credential from the auth endpoint's response, computing
    /// `expires_at = now + expires_in`.
    pub(crate) fn from_response(response: TokenResponse) -> Self {
        Self {
            expires_at: SystemTime::now() + Duration::from_secs(response.expires_in),
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        }
    }

    /// Whether the access token can still be presented to the API.
    pub(crate) fn is_fresh(&self) -> bool {
        SystemTime::now() < self.expires_at
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }
}
