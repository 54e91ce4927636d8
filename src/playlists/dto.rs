use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub song_list: Option<Vec<String>>,
    #[serde(default, rename = "isPublic")]
    pub is_public: Option<bool>,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub song_list: Option<Vec<String>>,
    #[serde(default, rename = "isPublic")]
    pub is_public: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistListItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub occasion: String,
    pub song_list: Vec<String>,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    pub created_at: OffsetDateTime,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    pub message: String,
    pub playlist: super::repo::Playlist,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_defaults_every_field_to_none() {
        let req: UpdatePlaylistRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.description.is_none());
        assert!(req.occasion.is_none());
        assert!(req.song_list.is_none());
        assert!(req.is_public.is_none());
    }
}
