use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_video).get(handlers::list_videos))
        .route("/filter", get(handlers::filter_videos))
        .route("/category/:category", get(handlers::videos_by_category))
        .route("/my", get(handlers::my_videos))
        .route("/:id", delete(handlers::delete_video))
}
