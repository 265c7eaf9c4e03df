//! The `/videos` endpoints: video containers, their sources, and thumbnails.
//!
//! See: <https://docs.api.video/5.1/videos>

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::{Link, Pagination, SortBy, SortOrder, check_timecode, check_video_id};

const VIDEOS_BASE_PATH: &str = "videos";

/// Operations on videos. Obtained from [`Client::videos`].
#[derive(Clone, Copy)]
pub struct VideosService<'a> {
    pub(crate) client: &'a Client,
}

/// A video container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub panoramic: bool,
    #[serde(default)]
    pub mp4_support: bool,
}

/// Payload for creating or updating a video container.
///
/// Optional fields are omitted from the wire when unset, never sent as
/// `null`; the booleans are always sent so an update can flip them off.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<Metadata>,
    /// URL or video ID to copy the source from, for server-side imports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    pub panoramic: bool,
    pub mp4_support: bool,
}

/// A user-defined key/value tag on a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub key: String,
    pub value: String,
}

/// Where a video's content came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livestream: Option<SourceLivestream>,
}

/// The livestream a video was recorded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLivestream {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livestream_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Playback and embed URLs for a video or livestream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Ingest and encoding progress for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest: Option<Ingest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
}

/// How much of the source the server has received.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub received_bytes: Vec<ReceivedBytes>,
}

/// One byte range the server has acknowledged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedBytes {
    #[serde(default)]
    pub from: u64,
    #[serde(default)]
    pub to: u64,
    #[serde(default)]
    pub total: u64,
}

/// Encoding progress across quality renditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoding {
    #[serde(default)]
    pub playable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualities: Vec<Quality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EncodingMetadata>,
}

/// Encoding state of one rendition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Technical properties of the encoded video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framerate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samplerate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

/// One page of videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub data: Vec<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Filters and paging for [`VideosService::list`].
#[derive(Debug, Clone, Default)]
pub struct VideoListOptions {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub livestream_id: Option<String>,
    /// Matches videos carrying all of these tags (`tags[]` parameters).
    pub tags: Vec<String>,
    /// Matches videos carrying these metadata entries (`metadata[key]`
    /// parameters).
    pub metadata: BTreeMap<String, String>,
}

impl VideoListOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.current_page {
            pairs.push(("currentPage".into(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize".into(), size.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy".into(), sort_by.as_str().into()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sortOrder".into(), sort_order.as_str().into()));
        }
        if let Some(title) = &self.title {
            pairs.push(("title".into(), title.clone()));
        }
        if let Some(description) = &self.description {
            pairs.push(("description".into(), description.clone()));
        }
        if let Some(livestream_id) = &self.livestream_id {
            pairs.push(("livestreamId".into(), livestream_id.clone()));
        }
        for tag in &self.tags {
            pairs.push(("tags[]".into(), tag.clone()));
        }
        for (key, value) in &self.metadata {
            pairs.push((format!("metadata[{key}]"), value.clone()));
        }
        pairs
    }
}

impl VideosService<'_> {
    /// Fetches one video by ID.
    pub async fn get(&self, video_id: &str) -> Result<Video, Error> {
        check_video_id(video_id)?;
        self.client.get(&format!("{VIDEOS_BASE_PATH}/{video_id}")).await
    }

    /// Lists videos matching `options`.
    pub async fn list(&self, options: &VideoListOptions) -> Result<VideoList, Error> {
        self.client
            .get_with_query(VIDEOS_BASE_PATH, &options.query_pairs())
            .await
    }

    /// Creates an empty video container; upload the source separately with
    /// [`Self::upload`].
    pub async fn create(&self, request: &VideoRequest) -> Result<Video, Error> {
        self.client.post_json(VIDEOS_BASE_PATH, request).await
    }

    /// Updates a video container's metadata.
    pub async fn update(&self, video_id: &str, request: &VideoRequest) -> Result<Video, Error> {
        check_video_id(video_id)?;
        self.client
            .patch_json(&format!("{VIDEOS_BASE_PATH}/{video_id}"), request)
            .await
    }

    /// Deletes a video container and all its assets.
    pub async fn delete(&self, video_id: &str) -> Result<(), Error> {
        check_video_id(video_id)?;
        self.client.delete(&format!("{VIDEOS_BASE_PATH}/{video_id}")).await
    }

    /// Uploads a video source file into an existing container.
    ///
    /// Files larger than the client's configured chunk size are uploaded as
    /// sequential `Content-Range` requests; the returned [`Video`] is the
    /// state reported by the final chunk response.
    pub async fn upload(
        &self,
        video_id: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Video, Error> {
        check_video_id(video_id)?;
        self.client
            .upload_chunked(&format!("{VIDEOS_BASE_PATH}/{video_id}/source"), file_path.as_ref())
            .await
    }

    /// Polls ingest and encoding status for a video.
    pub async fn status(&self, video_id: &str) -> Result<VideoStatus, Error> {
        check_video_id(video_id)?;
        self.client
            .get(&format!("{VIDEOS_BASE_PATH}/{video_id}/status"))
            .await
    }

    /// Selects a frame of the video as its thumbnail, by `00:00:00:00`
    /// timecode.
    pub async fn pick_thumbnail(&self, video_id: &str, timecode: &str) -> Result<Video, Error> {
        check_video_id(video_id)?;
        check_timecode(timecode)?;
        self.client
            .patch_json(
                &format!("{VIDEOS_BASE_PATH}/{video_id}/thumbnail"),
                &serde_json::json!({ "timecode": timecode }),
            )
            .await
    }

    /// Uploads an image file as the video's thumbnail.
    pub async fn upload_thumbnail(
        &self,
        video_id: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Video, Error> {
        check_video_id(video_id)?;
        self.client
            .upload_multipart(
                &format!("{VIDEOS_BASE_PATH}/{video_id}/thumbnail"),
                file_path.as_ref(),
                &[],
            )
            .await
    }
}
