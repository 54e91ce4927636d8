use axum::{routing::get, Router};

use crate::state::AppState;

pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::get_me))
        .route("/artists", get(handlers::list_artists))
        .route("/:id", get(handlers::get_user))
}
