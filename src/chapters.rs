//! The `/videos/{id}/chapters` endpoints.
//!
//! See: <https://docs.api.video/5.1/chapters>

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::{Pagination, check_video_id};

/// Operations on video chapters. Obtained from [`Client::chapters`].
#[derive(Clone, Copy)]
pub struct ChaptersService<'a> {
    pub(crate) client: &'a Client,
}

/// A chapter track attached to a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// All chapter tracks for a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterList {
    #[serde(default)]
    pub data: Vec<Chapter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ChaptersService<'_> {
    /// Fetches the chapter track for one language.
    pub async fn get(&self, video_id: &str, language: &str) -> Result<Chapter, Error> {
        check_video_id(video_id)?;
        self.client
            .get(&format!("videos/{video_id}/chapters/{language}"))
            .await
    }

    /// Lists all chapter tracks of a video.
    pub async fn list(&self, video_id: &str) -> Result<ChapterList, Error> {
        check_video_id(video_id)?;
        self.client.get(&format!("videos/{video_id}/chapters")).await
    }

    /// Uploads a VTT file as the chapter track for one language.
    pub async fn upload(
        &self,
        video_id: &str,
        language: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Chapter, Error> {
        check_video_id(video_id)?;
        self.client
            .upload_multipart(
                &format!("videos/{video_id}/chapters/{language}"),
                file_path.as_ref(),
                &[],
            )
            .await
    }

    /// Deletes the chapter track for one language.
    pub async fn delete(&self, video_id: &str, language: &str) -> Result<(), Error> {
        check_video_id(video_id)?;
        self.client
            .delete(&format!("videos/{video_id}/chapters/{language}"))
            .await
    }
}
