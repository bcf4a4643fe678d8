//! Shared application state for all routes.

use crate::config::TableName;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Table the search statements run against.
    pub table: Arc<TableName>,
}

impl AppState {
    pub fn new(pool: PgPool, table: TableName) -> Self {
        AppState {
            pool,
            table: Arc::new(table),
        }
    }
}
