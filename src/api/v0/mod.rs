//! Version 0 of the public API

pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Routes mounted under `/v0`
pub fn create_v0_router() -> Router<AppState> {
    Router::new()
        .route("/user", post(users::create_user))
        .route(
            "/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
