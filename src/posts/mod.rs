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
        .route("/", post(handlers::create_post).get(handlers::my_posts))
        .route("/videos", get(handlers::all_posts))
        .route("/:id", delete(handlers::delete_post))
}
