use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub genre: String,
    pub level: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, rename = "isPublic")]
    pub is_public: Option<bool>,
}

/// Optional filters; the client sends "All" for no filter.
#[derive(Debug, Deserialize)]
pub struct VideoFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VideoListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub genre: String,
    pub level: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub views: i32,
    pub created_at: OffsetDateTime,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedVideoResponse {
    pub message: String,
    pub video: super::repo::Video,
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
    fn filter_deserializes_missing_fields_as_none() {
        let f: VideoFilter = serde_json::from_str("{}").unwrap();
        assert!(f.category.is_none());
        assert!(f.genre.is_none());
        assert!(f.level.is_none());
    }

    #[test]
    fn create_request_accepts_is_public_alias() {
        let req: CreateVideoRequest = serde_json::from_str(
            r#"{"title":"T","category":"dance","genre":"hip-hop","level":"beginner",
                "video_url":"https://v.example/x","isPublic":false}"#,
        )
        .unwrap();
        assert_eq!(req.is_public, Some(false));
    }
}
