use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::create_playlist).get(handlers::list_playlists),
        )
        .route(
            "/:id",
            get(handlers::get_playlist)
                .put(handlers::update_playlist)
                .delete(handlers::delete_playlist),
        )
}
