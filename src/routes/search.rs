//! Search routes.

use crate::handlers::{search, search_by_tags, search_paginated, suggest};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn search_routes(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/search/paginated", get(search_paginated))
        .route("/search/by-tags", get(search_by_tags))
        .route("/suggest", get(suggest))
        .with_state(state)
}
