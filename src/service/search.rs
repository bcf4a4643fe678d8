//! Search execution against PostgreSQL.

use crate::config::TableName;
use crate::error::AppError;
use crate::model::{Page, SearchHit, TaggedHit};
use crate::service::validation::{PageRequest, SearchRequest, SuggestRequest, TagRequest};
use crate::sql::{self, bind_all, QueryBuf};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

pub struct SearchService;

impl SearchService {
    /// Keyword search ordered by view count, highest first.
    pub async fn search(
        pool: &PgPool,
        table: &TableName,
        req: &SearchRequest,
    ) -> Result<Vec<SearchHit>, AppError> {
        let q = sql::search(table, &req.keyword, req.min_views, req.limit);
        Self::query_many(pool, &q).await
    }

    /// Seek-paginated keyword search. Fetches one row past `limit` to decide `has_next`.
    pub async fn search_paginated(
        pool: &PgPool,
        table: &TableName,
        req: &PageRequest,
    ) -> Result<Page, AppError> {
        let q = sql::search_page(table, &req.keyword, req.cursor, req.limit + 1);
        let rows: Vec<SearchHit> = Self::query_many(pool, &q).await?;
        Ok(Page::from_overfetch(rows, req.limit as usize))
    }

    pub async fn search_by_tag(
        pool: &PgPool,
        table: &TableName,
        req: &TagRequest,
    ) -> Result<Vec<TaggedHit>, AppError> {
        let q = sql::search_by_tag(table, &req.tag, req.keyword.as_deref(), req.limit);
        Self::query_many(pool, &q).await
    }

    /// Distinct titles for autocomplete.
    pub async fn suggest(
        pool: &PgPool,
        table: &TableName,
        req: &SuggestRequest,
    ) -> Result<Vec<String>, AppError> {
        let q = sql::suggest(table, &req.prefix, req.limit);
        let rows: Vec<(String,)> = Self::query_many(pool, &q).await?;
        Ok(rows.into_iter().map(|(title,)| title).collect())
    }

    async fn query_many<T>(pool: &PgPool, q: &QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query_as::<_, T>(&q.sql), &q.params)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
