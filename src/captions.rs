//! The `/videos/{id}/captions` endpoints.
//!
//! See: <https://docs.api.video/5.1/captions>

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::{Pagination, check_video_id};

/// Operations on video captions. Obtained from [`Client::captions`].
#[derive(Clone, Copy)]
pub struct CaptionsService<'a> {
    pub(crate) client: &'a Client,
}

/// A caption track attached to a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srclang: Option<String>,
    #[serde(default)]
    pub default: bool,
}

/// All caption tracks for a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionList {
    #[serde(default)]
    pub data: Vec<Caption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Payload for updating a caption track.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CaptionRequest {
    /// Whether this track is selected by default in the player.
    pub default: bool,
}

impl CaptionsService<'_> {
    /// Fetches the caption track for one language.
    pub async fn get(&self, video_id: &str, language: &str) -> Result<Caption, Error> {
        check_video_id(video_id)?;
        self.client
            .get(&format!("videos/{video_id}/captions/{language}"))
            .await
    }

    /// Lists all caption tracks of a video.
    pub async fn list(&self, video_id: &str) -> Result<CaptionList, Error> {
        check_video_id(video_id)?;
        self.client.get(&format!("videos/{video_id}/captions")).await
    }

    /// Uploads a VTT file as the caption track for one language.
    pub async fn upload(
        &self,
        video_id: &str,
        language: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Caption, Error> {
        check_video_id(video_id)?;
        self.client
            .upload_multipart(
                &format!("videos/{video_id}/captions/{language}"),
                file_path.as_ref(),
                &[],
            )
            .await
    }

    /// Updates a caption track, e.g. to make it the default.
    pub async fn update(
        &self,
        video_id: &str,
        language: &str,
        request: &CaptionRequest,
    ) -> Result<Caption, Error> {
        check_video_id(video_id)?;
        self.client
            .patch_json(&format!("videos/{video_id}/captions/{language}"), request)
            .await
    }

    /// Deletes the caption track for one language.
    pub async fn delete(&self, video_id: &str, language: &str) -> Result<(), Error> {
        check_video_id(video_id)?;
        self.client
            .delete(&format!("videos/{video_id}/captions/{language}"))
            .await
    }
}
