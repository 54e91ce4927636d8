use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::dto::MessageResponse;
use crate::auth::guard::assert_owner;
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    CreatePlaylistRequest, Pagination, PlaylistListItem, PlaylistResponse, UpdatePlaylistRequest,
};
use super::repo::Playlist;

#[instrument(skip(state, payload))]
pub async fn create_playlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<PlaylistResponse>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Playlist name is required".into()));
    }

    let playlist = Playlist::create(
        &state.db,
        user.id,
        payload.name.trim(),
        payload.description.as_deref().map(str::trim).unwrap_or(""),
        payload.occasion.as_deref().map(str::trim).unwrap_or(""),
        payload.song_list.as_deref().unwrap_or(&[]),
        payload.is_public.unwrap_or(true),
    )
    .await?;

    info!(playlist_id = %playlist.id, user_id = %user.id, "playlist created");
    Ok((
        StatusCode::CREATED,
        Json(PlaylistResponse {
            message: "Playlist created successfully".into(),
            playlist,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_playlists(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PlaylistListItem>>, ApiError> {
    let rows = Playlist::list_public(&state.db, p.limit, p.offset).await?;
    let items = rows
        .into_iter()
        .map(|r| PlaylistListItem {
            id: r.id,
            name: r.name,
            description: r.description,
            occasion: r.occasion,
            song_list: r.song_list,
            is_public: r.is_public,
            created_at: r.created_at,
            author: r.author,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Playlist>, ApiError> {
    let playlist = Playlist::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Playlist not found".into()))?;
    Ok(Json(playlist))
}

#[instrument(skip(state, payload))]
pub async fn update_playlist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePlaylistRequest>,
) -> Result<Json<PlaylistResponse>, ApiError> {
    let playlist = Playlist::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Playlist not found".into()))?;

    assert_owner(playlist.user_id, user.id)?;

    let updated = Playlist::update(
        &state.db,
        id,
        payload.name.as_deref().map(str::trim),
        payload.description.as_deref().map(str::trim),
        payload.occasion.as_deref().map(str::trim),
        payload.song_list.as_deref(),
        payload.is_public,
    )
    .await?;

    info!(playlist_id = %id, user_id = %user.id, "playlist updated");
    Ok(Json(PlaylistResponse {
        message: "Playlist updated successfully".into(),
        playlist: updated,
    }))
}

#[instrument(skip(state))]
pub async fn delete_playlist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let playlist = Playlist::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Playlist not found".into()))?;

    assert_owner(playlist.user_id, user.id)?;
    Playlist::delete(&state.db, id).await?;

    info!(playlist_id = %id, user_id = %user.id, "playlist deleted");
    Ok(Json(MessageResponse {
        message: "Playlist deleted successfully".into(),
    }))
}
