//! Types shared across resource services, plus the local validity checks
//! that run before any network call.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Paging details attached to every list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub pages_total: u32,
    #[serde(default)]
    pub items_total: u32,
    #[serde(default)]
    pub current_page_items: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// A hypermedia link inside [`Pagination`] or a livestream source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Field a list call is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    PublishedAt,
    UpdatedAt,
    Title,
}

impl SortBy {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SortBy::PublishedAt => "publishedAt",
            SortBy::UpdatedAt => "updatedAt",
            SortBy::Title => "title",
        }
    }
}

/// Direction a list call is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

pub(crate) fn check_video_id(video_id: &str) -> Result<(), Error> {
    if video_id.starts_with("vi") {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "video id {video_id:?} is invalid, it must start with 'vi'"
        )))
    }
}

pub(crate) fn check_livestream_id(livestream_id: &str) -> Result<(), Error> {
    if livestream_id.starts_with("li") {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "livestream id {livestream_id:?} is invalid, it must start with 'li'"
        )))
    }
}

pub(crate) fn check_player_id(player_id: &str) -> Result<(), Error> {
    if player_id.starts_with("pl") || player_id.starts_with("pt") {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "player id {player_id:?} is invalid, it must start with 'pl' or 'pt'"
        )))
    }
}

pub(crate) fn check_session_id(session_id: &str) -> Result<(), Error> {
    if session_id.starts_with("ps") {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "session id {session_id:?} is invalid, it must start with 'ps'"
        )))
    }
}

/// Thumbnail timecodes must look like `00:00:00:00`.
pub(crate) fn check_timecode(timecode: &str) -> Result<(), Error> {
    let bytes = timecode.as_bytes();
    let well_formed = bytes.len() == 11
        && bytes.iter().enumerate().all(|(i, byte)| match i % 3 {
            2 => *byte == b':',
            _ => byte.is_ascii_digit(),
        });

    if well_formed {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "timecode {timecode:?} is invalid, it must be of the form '00:00:00:00'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_id_prefix() {
        assert!(check_video_id("vi4k0jvEUuaTdRAEjQ4Jfrgz").is_ok());
        assert!(matches!(
            check_video_id("li4k0jvEUuaTdRAEjQ4Jfrgz"),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn player_id_accepts_both_prefixes() {
        assert!(check_player_id("pl45KFKdlddgk8fYXkfvu5DR1hk3").is_ok());
        assert!(check_player_id("pt45KFKdlddgk8fYXkfvu5DR1hk3").is_ok());
        assert!(check_player_id("vi45KFKdlddgk8fYXkfvu5DR1hk3").is_err());
    }

    #[test]
    fn livestream_and_session_id_prefixes() {
        assert!(check_livestream_id("li400mYKSgQ6xs7taUeSaEKr").is_ok());
        assert!(check_livestream_id("vi400mYKSgQ6xs7taUeSaEKr").is_err());
        assert!(check_session_id("psEmFwGQUAXR2lFHj5nDOpy").is_ok());
        assert!(check_session_id("viEmFwGQUAXR2lFHj5nDOpy").is_err());
    }

    #[test]
    fn timecode_shape() {
        assert!(check_timecode("00:00:12:04").is_ok());
        assert!(check_timecode("98:72:01:44").is_ok());
        assert!(check_timecode("00:00:12").is_err());
        assert!(check_timecode("00:00:12:045").is_err());
        assert!(check_timecode("0a:00:12:04").is_err());
        assert!(check_timecode("00-00-12-04").is_err());
    }

    #[test]
    fn sort_options_render_wire_values() {
        assert_eq!(SortBy::PublishedAt.as_str(), "publishedAt");
        assert_eq!(SortBy::UpdatedAt.as_str(), "updatedAt");
        assert_eq!(SortBy::Title.as_str(), "title");
        assert_eq!(SortOrder::Ascending.as_str(), "asc");
        assert_eq!(SortOrder::Descending.as_str(), "desc");
    }

    #[test]
    fn pagination_decodes_full_body() {
        let body = r#"{
            "currentPage": 1,
            "pageSize": 25,
            "pagesTotal": 1,
            "itemsTotal": 11,
            "currentPageItems": 11,
            "links": [
                {"rel": "self", "uri": "https://ws.api.video"},
                {"rel": "first", "uri": "https://ws.api.video"},
                {"rel": "last", "uri": "https://ws.api.video"}
            ]
        }"#;
        let pagination: Pagination = serde_json::from_str(body).unwrap();
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.items_total, 11);
        assert_eq!(pagination.links.len(), 3);
        assert_eq!(pagination.links[0].rel.as_deref(), Some("self"));
    }
}
