use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::dto::MessageResponse;
use crate::auth::guard::{assert_owner, require_role};
use crate::auth::jwt::AuthUser;
use crate::auth::repo::Role;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreateVideoRequest, CreatedVideoResponse, Pagination, VideoFilter, VideoListItem};
use super::repo::{Video, VideoWithAuthor};

fn normalize_filter(value: Option<String>) -> Option<String> {
    value
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(|v| v.to_lowercase())
}

fn to_list_item(row: VideoWithAuthor) -> VideoListItem {
    VideoListItem {
        id: row.id,
        title: row.title,
        description: row.description,
        category: row.category,
        genre: row.genre,
        level: row.level,
        video_url: row.video_url,
        thumbnail_url: row.thumbnail_url,
        views: row.views,
        created_at: row.created_at,
        author: row.author,
    }
}

#[instrument(skip(state, payload))]
pub async fn create_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<CreatedVideoResponse>), ApiError> {
    require_role(&user, &[Role::Artist])?;

    if payload.title.trim().is_empty()
        || payload.video_url.trim().is_empty()
        || payload.category.trim().is_empty()
        || payload.genre.trim().is_empty()
        || payload.level.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "Title, category, genre, level and video are required".into(),
        ));
    }

    let video = Video::create(
        &state.db,
        user.id,
        payload.title.trim(),
        payload.description.as_deref().map(str::trim).unwrap_or(""),
        &payload.category.to_lowercase(),
        &payload.genre.to_lowercase(),
        &payload.level.to_lowercase(),
        payload.video_url.trim(),
        payload.thumbnail_url.as_deref().unwrap_or(""),
        payload.is_public.unwrap_or(true),
    )
    .await?;

    info!(video_id = %video.id, user_id = %user.id, "video created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedVideoResponse {
            message: "Video uploaded successfully".into(),
            video,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_videos(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<VideoListItem>>, ApiError> {
    let rows = Video::list_public(&state.db, None, None, None, p.limit, p.offset).await?;
    Ok(Json(rows.into_iter().map(to_list_item).collect()))
}

#[instrument(skip(state))]
pub async fn filter_videos(
    State(state): State<AppState>,
    Query(filter): Query<VideoFilter>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<VideoListItem>>, ApiError> {
    let category = normalize_filter(filter.category);
    let genre = normalize_filter(filter.genre);
    let level = normalize_filter(filter.level);
    let rows = Video::list_public(
        &state.db,
        category.as_deref(),
        genre.as_deref(),
        level.as_deref(),
        p.limit,
        p.offset,
    )
    .await?;
    Ok(Json(rows.into_iter().map(to_list_item).collect()))
}

#[instrument(skip(state))]
pub async fn videos_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<VideoListItem>>, ApiError> {
    let rows = Video::sample_by_category(&state.db, &category.to_lowercase(), 100).await?;
    Ok(Json(rows.into_iter().map(to_list_item).collect()))
}

#[instrument(skip(state))]
pub async fn my_videos(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Video>>, ApiError> {
    let videos = Video::list_by_user(&state.db, user.id).await?;
    Ok(Json(videos))
}

#[instrument(skip(state))]
pub async fn delete_video(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let video = Video::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Video not found".into()))?;

    assert_owner(video.user_id, user.id)?;
    Video::delete(&state.db, id).await?;

    info!(video_id = %id, user_id = %user.id, "video deleted");
    Ok(Json(MessageResponse {
        message: "Video deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_clears_the_filter() {
        assert_eq!(normalize_filter(Some("All".into())), None);
        assert_eq!(normalize_filter(Some("all".into())), None);
        assert_eq!(normalize_filter(Some("".into())), None);
        assert_eq!(normalize_filter(None), None);
    }

    #[test]
    fn filter_values_are_lowercased() {
        assert_eq!(
            normalize_filter(Some("Hip-Hop".into())),
            Some("hip-hop".into())
        );
    }
}
