//! The `/analytics` endpoints: playback sessions and session events.
//!
//! See: <https://docs.api.video/5.1/analytics>

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::{Pagination, check_livestream_id, check_session_id, check_video_id};

const STATISTICS_BASE_PATH: &str = "analytics";

/// Read-only access to playback analytics. Obtained from
/// [`Client::statistics`].
#[derive(Clone, Copy)]
pub struct StatisticsService<'a> {
    pub(crate) client: &'a Client,
}

/// One playback session and everything known about the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<Referrer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Os>,
    #[serde(rename = "client", default, skip_serializing_if = "Option::is_none")]
    pub client_info: Option<ClientInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referrer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Os {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The player or browser that ran the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One event within a playback session, e.g. a pause or a seek.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitted_at: Option<String>,
    /// Playback position in seconds, for point events.
    #[serde(default)]
    pub at: u64,
    /// Seek origin in seconds, for seek events.
    #[serde(default)]
    pub from: u64,
    /// Seek target in seconds, for seek events.
    #[serde(default)]
    pub to: u64,
}

/// One page of playback sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticList {
    #[serde(default)]
    pub data: Vec<Statistic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// One page of session events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEventList {
    #[serde(default)]
    pub data: Vec<SessionEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Filters and paging for [`StatisticsService::video_sessions`].
#[derive(Debug, Clone, Default)]
pub struct VideoSessionOptions {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    /// A day (`2019-08-24`), month (`2019-08`), or year (`2019`) to
    /// restrict sessions to.
    pub period: Option<String>,
    /// Only sessions whose dynamic metadata matches every entry.
    pub metadata: BTreeMap<String, String>,
}

impl VideoSessionOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.current_page {
            pairs.push(("currentPage".into(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize".into(), size.to_string()));
        }
        if let Some(period) = &self.period {
            pairs.push(("period".into(), period.clone()));
        }
        for (key, value) in &self.metadata {
            pairs.push((format!("metadata[{key}]"), value.clone()));
        }
        pairs
    }
}

/// Filters and paging for [`StatisticsService::livestream_sessions`].
#[derive(Debug, Clone, Default)]
pub struct LivestreamSessionOptions {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub period: Option<String>,
}

impl LivestreamSessionOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.current_page {
            pairs.push(("currentPage".into(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize".into(), size.to_string()));
        }
        if let Some(period) = &self.period {
            pairs.push(("period".into(), period.clone()));
        }
        pairs
    }
}

/// Paging for [`StatisticsService::session_events`].
#[derive(Debug, Clone, Default)]
pub struct SessionEventOptions {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SessionEventOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.current_page {
            pairs.push(("currentPage".into(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize".into(), size.to_string()));
        }
        pairs
    }
}

impl StatisticsService<'_> {
    /// Lists playback sessions of a video.
    pub async fn video_sessions(
        &self,
        video_id: &str,
        options: &VideoSessionOptions,
    ) -> Result<StatisticList, Error> {
        check_video_id(video_id)?;
        self.client
            .get_with_query(
                &format!("{STATISTICS_BASE_PATH}/videos/{video_id}"),
                &options.query_pairs(),
            )
            .await
    }

    /// Lists playback sessions of a livestream.
    pub async fn livestream_sessions(
        &self,
        livestream_id: &str,
        options: &LivestreamSessionOptions,
    ) -> Result<StatisticList, Error> {
        check_livestream_id(livestream_id)?;
        self.client
            .get_with_query(
                &format!("{STATISTICS_BASE_PATH}/live-streams/{livestream_id}"),
                &options.query_pairs(),
            )
            .await
    }

    /// Lists the events recorded during one playback session.
    pub async fn session_events(
        &self,
        session_id: &str,
        options: &SessionEventOptions,
    ) -> Result<SessionEventList, Error> {
        check_session_id(session_id)?;
        self.client
            .get_with_query(
                &format!("{STATISTICS_BASE_PATH}/sessions/{session_id}/events"),
                &options.query_pairs(),
            )
            .await
    }
}
