//! Search handlers: keyword, paginated, by-tag, suggest.

use crate::error::AppError;
use crate::extractors::QueryParams;
use crate::model::{Page, SearchHit, TaggedHit};
use crate::service::{PageRequest, SearchRequest, SearchService, SuggestRequest, TagRequest};
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /search?keyword=&min_views=&limit=
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Vec<SearchHit>>, AppError> {
    let req = SearchRequest::from_params(&params)?;
    let rows = SearchService::search(&state.pool, &state.table, &req).await?;
    tracing::debug!(keyword = %req.keyword, hits = rows.len(), "search");
    Ok(Json(rows))
}

/// GET /search/paginated?keyword=&last_published_at=&last_id=&limit=
pub async fn search_paginated(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Page>, AppError> {
    let req = PageRequest::from_params(&params)?;
    let page = SearchService::search_paginated(&state.pool, &state.table, &req).await?;
    tracing::debug!(
        keyword = %req.keyword,
        hits = page.results.len(),
        has_next = page.has_next,
        "search page"
    );
    Ok(Json(page))
}

/// GET /search/by-tags?tag=&keyword=&limit=
pub async fn search_by_tags(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Vec<TaggedHit>>, AppError> {
    let req = TagRequest::from_params(&params)?;
    let rows = SearchService::search_by_tag(&state.pool, &state.table, &req).await?;
    Ok(Json(rows))
}

/// GET /suggest?prefix=&limit=
pub async fn suggest(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Vec<String>>, AppError> {
    let req = SuggestRequest::from_params(&params)?;
    let titles = SearchService::suggest(&state.pool, &state.table, &req).await?;
    Ok(Json(titles))
}
