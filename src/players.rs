//! The `/players` endpoints: custom player themes.
//!
//! See: <https://docs.api.video/5.1/players>

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;
use crate::types::{Pagination, check_player_id};

const PLAYERS_BASE_PATH: &str = "players";

/// Operations on players. Obtained from [`Client::players`].
#[derive(Clone, Copy)]
pub struct PlayersService<'a> {
    pub(crate) client: &'a Client,
}

/// A custom player theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_margin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_aspect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_background_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_background_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_hover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_played: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_unplayed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "enableApi", default)]
    pub enable_api: bool,
    #[serde(default)]
    pub enable_controls: bool,
    #[serde(default)]
    pub force_autoplay: bool,
    #[serde(default)]
    pub hide_title: bool,
    #[serde(default)]
    pub force_loop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<PlayerAssets>,
}

/// Logo assets attached to a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Payload for creating or updating a player theme.
///
/// The boolean toggles are always sent; the styling fields are omitted when
/// unset so the server keeps its defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_margin: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_aspect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_background_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_background_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_hover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_played: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_unplayed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "enableApi")]
    pub enable_api: bool,
    pub enable_controls: bool,
    pub force_autoplay: bool,
    pub hide_title: bool,
    pub force_loop: bool,
}

/// One page of players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerList {
    #[serde(default)]
    pub data: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Paging for [`PlayersService::list`].
#[derive(Debug, Clone, Default)]
pub struct PlayerListOptions {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PlayerListOptions {
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

impl PlayersService<'_> {
    /// Fetches one player by ID.
    pub async fn get(&self, player_id: &str) -> Result<Player, Error> {
        check_player_id(player_id)?;
        self.client.get(&format!("{PLAYERS_BASE_PATH}/{player_id}")).await
    }

    /// Lists players.
    pub async fn list(&self, options: &PlayerListOptions) -> Result<PlayerList, Error> {
        self.client
            .get_with_query(PLAYERS_BASE_PATH, &options.query_pairs())
            .await
    }

    /// Creates a player theme.
    pub async fn create(&self, request: &PlayerRequest) -> Result<Player, Error> {
        self.client.post_json(PLAYERS_BASE_PATH, request).await
    }

    /// Updates a player theme.
    pub async fn update(&self, player_id: &str, request: &PlayerRequest) -> Result<Player, Error> {
        check_player_id(player_id)?;
        self.client
            .patch_json(&format!("{PLAYERS_BASE_PATH}/{player_id}"), request)
            .await
    }

    /// Deletes a player theme.
    pub async fn delete(&self, player_id: &str) -> Result<(), Error> {
        check_player_id(player_id)?;
        self.client.delete(&format!("{PLAYERS_BASE_PATH}/{player_id}")).await
    }

    /// Uploads a logo image for the player; `link` is where clicking the
    /// logo takes the viewer.
    pub async fn upload_logo(
        &self,
        player_id: &str,
        link: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Player, Error> {
        check_player_id(player_id)?;
        self.client
            .upload_multipart(
                &format!("{PLAYERS_BASE_PATH}/{player_id}/logo"),
                file_path.as_ref(),
                &[("link", link.to_owned())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_styling_but_sends_toggles() {
        let request = PlayerRequest {
            text: Some("#ffffff".into()),
            enable_controls: true,
            ..Default::default()
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "text": "#ffffff",
                "enableApi": false,
                "enableControls": true,
                "forceAutoplay": false,
                "hideTitle": false,
                "forceLoop": false,
            })
        );
    }

    #[test]
    fn player_decodes_enable_api_rename() {
        let body = r#"{"playerId": "pl45KFKdlddgk8fYXkfvu5DR1hk3", "enableApi": true}"#;
        let player: Player = serde_json::from_str(body).unwrap();
        assert_eq!(player.player_id, "pl45KFKdlddgk8fYXkfvu5DR1hk3");
        assert!(player.enable_api);
        assert!(!player.enable_controls);
    }
}
