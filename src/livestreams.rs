//! The `/live-streams` endpoints.
//!
//! See: <https://docs.api.video/5.1/live>

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::{Pagination, check_livestream_id};
use crate::videos::Assets;

const LIVESTREAMS_BASE_PATH: &str = "live-streams";

/// Operations on livestreams. Obtained from [`Client::livestreams`].
#[derive(Clone, Copy)]
pub struct LivestreamsService<'a> {
    pub(crate) client: &'a Client,
}

/// A livestream container and its RTMP ingest key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Livestream {
    #[serde(rename = "liveStreamId")]
    pub livestream_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_key: Option<String>,
    #[serde(default)]
    pub record: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default)]
    pub broadcasting: bool,
}

/// Payload for creating or updating a livestream.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivestreamRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether broadcasts are recorded into videos. Always sent, so an
    /// update can turn recording off.
    pub record: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

/// One page of livestreams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivestreamList {
    #[serde(default)]
    pub data: Vec<Livestream>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Filters and paging for [`LivestreamsService::list`].
#[derive(Debug, Clone, Default)]
pub struct LivestreamListOptions {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub stream_key: Option<String>,
}

impl LivestreamListOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.current_page {
            pairs.push(("currentPage".into(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize".into(), size.to_string()));
        }
        if let Some(stream_key) = &self.stream_key {
            pairs.push(("streamKey".into(), stream_key.clone()));
        }
        pairs
    }
}

impl LivestreamsService<'_> {
    /// Fetches one livestream by ID.
    pub async fn get(&self, livestream_id: &str) -> Result<Livestream, Error> {
        check_livestream_id(livestream_id)?;
        self.client
            .get(&format!("{LIVESTREAMS_BASE_PATH}/{livestream_id}"))
            .await
    }

    /// Lists livestreams matching `options`.
    pub async fn list(&self, options: &LivestreamListOptions) -> Result<LivestreamList, Error> {
        self.client
            .get_with_query(LIVESTREAMS_BASE_PATH, &options.query_pairs())
            .await
    }

    /// Creates a livestream and returns it with its stream key.
    pub async fn create(&self, request: &LivestreamRequest) -> Result<Livestream, Error> {
        self.client.post_json(LIVESTREAMS_BASE_PATH, request).await
    }

    /// Updates a livestream.
    pub async fn update(
        &self,
        livestream_id: &str,
        request: &LivestreamRequest,
    ) -> Result<Livestream, Error> {
        check_livestream_id(livestream_id)?;
        self.client
            .patch_json(&format!("{LIVESTREAMS_BASE_PATH}/{livestream_id}"), request)
            .await
    }

    /// Deletes a livestream.
    pub async fn delete(&self, livestream_id: &str) -> Result<(), Error> {
        check_livestream_id(livestream_id)?;
        self.client
            .delete(&format!("{LIVESTREAMS_BASE_PATH}/{livestream_id}"))
            .await
    }

    /// Uploads an image shown while the stream is offline.
    pub async fn upload_thumbnail(
        &self,
        livestream_id: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Livestream, Error> {
        check_livestream_id(livestream_id)?;
        self.client
            .upload_multipart(
                &format!("{LIVESTREAMS_BASE_PATH}/{livestream_id}/thumbnail"),
                file_path.as_ref(),
                &[],
            )
            .await
    }

    /// Removes the offline thumbnail.
    pub async fn delete_thumbnail(&self, livestream_id: &str) -> Result<Livestream, Error> {
        check_livestream_id(livestream_id)?;
        let request = self
            .client
            .request(reqwest::Method::DELETE, &format!("{LIVESTREAMS_BASE_PATH}/{livestream_id}/thumbnail"))
            .await?;
        self.client.execute(request).await
    }
}
