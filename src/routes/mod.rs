//! Route tables.

pub mod common;
pub mod search;

pub use common::{common_routes, common_routes_with_ready};
pub use search::search_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Search and common routes behind request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(search_routes(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
