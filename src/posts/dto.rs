use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub genre: String,
    pub level: String,
    pub video_url: String,
}

#[derive(Debug, Serialize)]
pub struct PostListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub genre: String,
    pub level: String,
    pub video_url: String,
    pub created_at: OffsetDateTime,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    pub message: String,
    pub post: super::repo::Post,
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
