use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub genre: String,
    pub level: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub views: i32,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    pub created_at: OffsetDateTime,
}

/// Listing row with the uploader's name joined in.
#[derive(Debug, Clone, FromRow)]
pub struct VideoWithAuthor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub genre: String,
    pub level: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub views: i32,
    pub is_public: bool,
    pub created_at: OffsetDateTime,
    pub author: String,
}

const VIDEO_COLUMNS: &str = "id, user_id, title, description, category, genre, level, \
     video_url, thumbnail_url, views, is_public, created_at";

const JOINED_COLUMNS: &str = "v.id, v.user_id, v.title, v.description, v.category, v.genre, \
     v.level, v.video_url, v.thumbnail_url, v.views, v.is_public, v.created_at, u.name AS author";

impl Video {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        description: &str,
        category: &str,
        genre: &str,
        level: &str,
        video_url: &str,
        thumbnail_url: &str,
        is_public: bool,
    ) -> anyhow::Result<Video> {
        let video = sqlx::query_as::<_, Video>(&format!(
            r#"
            INSERT INTO videos
                (user_id, title, description, category, genre, level,
                 video_url, thumbnail_url, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(genre)
        .bind(level)
        .bind(video_url)
        .bind(thumbnail_url)
        .bind(is_public)
        .fetch_one(db)
        .await?;
        Ok(video)
    }

    /// Public listing, newest first, with optional category/genre/level
    /// filters (None = unfiltered).
    pub async fn list_public(
        db: &PgPool,
        category: Option<&str>,
        genre: Option<&str>,
        level: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<VideoWithAuthor>> {
        let rows = sqlx::query_as::<_, VideoWithAuthor>(&format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM videos v
            JOIN users u ON u.id = v.user_id
            WHERE v.is_public
              AND ($1::text IS NULL OR v.category = $1)
              AND ($2::text IS NULL OR v.genre = $2)
              AND ($3::text IS NULL OR v.level = $3)
            ORDER BY v.created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(category)
        .bind(genre)
        .bind(level)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Random sample of a category, for the browse pages.
    pub async fn sample_by_category(
        db: &PgPool,
        category: &str,
        limit: i64,
    ) -> anyhow::Result<Vec<VideoWithAuthor>> {
        let rows = sqlx::query_as::<_, VideoWithAuthor>(&format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM videos v
            JOIN users u ON u.id = v.user_id
            WHERE v.is_public AND v.category = $1
            ORDER BY random()
            LIMIT $2
            "#
        ))
        .bind(category)
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Video>> {
        let rows = sqlx::query_as::<_, Video>(&format!(
            r#"
            SELECT {VIDEO_COLUMNS}
            FROM videos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(video)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
