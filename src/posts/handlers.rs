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

use super::dto::{CreatePostRequest, CreatedPostResponse, Pagination, PostListItem};
use super::repo::Post;

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), ApiError> {
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

    let post = Post::create(
        &state.db,
        user.id,
        payload.title.trim(),
        payload.description.as_deref().map(str::trim).unwrap_or(""),
        &payload.category.to_lowercase(),
        &payload.genre.to_lowercase(),
        &payload.level.to_lowercase(),
        payload.video_url.trim(),
    )
    .await?;

    info!(post_id = %post.id, user_id = %user.id, "post created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse {
            message: "Video uploaded successfully".into(),
            post,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn my_posts(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = Post::list_by_user(&state.db, user.id).await?;
    Ok(Json(posts))
}

#[instrument(skip(state))]
pub async fn all_posts(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PostListItem>>, ApiError> {
    let rows = Post::list_all(&state.db, p.limit, p.offset).await?;
    let items = rows
        .into_iter()
        .map(|r| PostListItem {
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            genre: r.genre,
            level: r.level,
            video_url: r.video_url,
            created_at: r.created_at,
            author: r.author,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    assert_owner(post.user_id, user.id)?;
    Post::delete(&state.db, id).await?;

    info!(post_id = %id, user_id = %user.id, "post deleted");
    Ok(Json(MessageResponse {
        message: "Post deleted successfully".into(),
    }))
}
