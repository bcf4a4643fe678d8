//! Query-string extractor that rejects with the JSON error body instead of axum's plain text.

use crate::error::AppError;
use crate::service::RawParams;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

/// All query parameters as a flat map; repeated keys keep the last value.
#[derive(Clone, Debug, Default)]
pub struct QueryParams(pub RawParams);

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<RawParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(QueryParams(params))
    }
}
