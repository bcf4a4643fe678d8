//! PGroonga search service: full-text search endpoints over a PostgreSQL table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, TableName};
pub use error::{AppError, ConfigError};
pub use model::{Page, SearchHit, TaggedHit};
pub use routes::{app, common_routes, common_routes_with_ready, search_routes};
pub use service::SearchService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_search_schema};
