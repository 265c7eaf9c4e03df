//! The `/upload-tokens` endpoint: delegated uploads without an API key.
//!
//! See: <https://docs.api.video/5.1/videos-delegated-upload>

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;

/// Operations on delegated upload tokens. Obtained from
/// [`Client::upload_tokens`].
#[derive(Clone, Copy)]
pub struct UploadTokensService<'a> {
    pub(crate) client: &'a Client,
}

/// A token that lets an untrusted party upload a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UploadTokensService<'_> {
    /// Mints a new delegated upload token.
    pub async fn generate(&self) -> Result<UploadToken, Error> {
        self.client.post_empty("upload-tokens").await
    }
}
