use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Playlist {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub occasion: String,
    pub song_list: Vec<String>,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct PlaylistWithAuthor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub occasion: String,
    pub song_list: Vec<String>,
    pub is_public: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author: String,
}

const PLAYLIST_COLUMNS: &str =
    "id, user_id, name, description, occasion, song_list, is_public, created_at, updated_at";

impl Playlist {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        description: &str,
        occasion: &str,
        song_list: &[String],
        is_public: bool,
    ) -> anyhow::Result<Playlist> {
        let playlist = sqlx::query_as::<_, Playlist>(&format!(
            r#"
            INSERT INTO playlists (user_id, name, description, occasion, song_list, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PLAYLIST_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(occasion)
        .bind(song_list)
        .bind(is_public)
        .fetch_one(db)
        .await?;
        Ok(playlist)
    }

    pub async fn list_public(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<PlaylistWithAuthor>> {
        let rows = sqlx::query_as::<_, PlaylistWithAuthor>(
            r#"
            SELECT p.id, p.user_id, p.name, p.description, p.occasion, p.song_list,
                   p.is_public, p.created_at, p.updated_at, u.name AS author
            FROM playlists p
            JOIN users u ON u.id = p.user_id
            WHERE p.is_public
            ORDER BY p.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Playlist>> {
        let playlist = sqlx::query_as::<_, Playlist>(&format!(
            "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(playlist)
    }

    /// Partial update; None keeps the stored value.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        occasion: Option<&str>,
        song_list: Option<&[String]>,
        is_public: Option<bool>,
    ) -> anyhow::Result<Playlist> {
        let playlist = sqlx::query_as::<_, Playlist>(&format!(
            r#"
            UPDATE playlists
            SET name        = COALESCE($2, name),
                description = COALESCE($3, description),
                occasion    = COALESCE($4, occasion),
                song_list   = COALESCE($5::text[], song_list),
                is_public   = COALESCE($6, is_public),
                updated_at  = now()
            WHERE id = $1
            RETURNING {PLAYLIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(occasion)
        .bind(song_list)
        .bind(is_public)
        .fetch_one(db)
        .await?;
        Ok(playlist)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
