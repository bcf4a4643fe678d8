//! Query-parameter validation. Each endpoint turns the raw query map into a typed request.

use crate::error::AppError;
use crate::sql::SeekCursor;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashMap;

pub type RawParams = HashMap<String, String>;

/// Default and upper bound for a `limit` parameter.
#[derive(Clone, Copy, Debug)]
pub struct LimitRule {
    pub default: i64,
    pub max: i64,
}

pub const SEARCH_LIMIT: LimitRule = LimitRule { default: 10, max: 100 };
pub const SUGGEST_LIMIT: LimitRule = LimitRule { default: 5, max: 20 };

/// Non-empty value or None. Empty strings count as absent.
fn optional_text<'a>(params: &'a RawParams, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

fn required_text(params: &RawParams, name: &str) -> Result<String, AppError> {
    optional_text(params, name)
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))
}

fn optional_int(params: &RawParams, name: &str) -> Result<Option<i64>, AppError> {
    optional_text(params, name)
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("{} must be an integer", name)))
        })
        .transpose()
}

fn limit(params: &RawParams, rule: LimitRule) -> Result<i64, AppError> {
    let n = optional_int(params, "limit")?.unwrap_or(rule.default);
    if n < 1 || n > rule.max {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            rule.max
        )));
    }
    Ok(n)
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` / `YYYY-MM-DD HH:MM:SS[.f]` read as UTC.
fn parse_timestamp(v: &str) -> Option<DateTime<Utc>> {
    let v = v.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(v) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(v, fmt).ok())
        .map(|t| t.and_utc())
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    pub keyword: String,
    pub min_views: Option<i64>,
    pub limit: i64,
}

impl SearchRequest {
    pub fn from_params(params: &RawParams) -> Result<Self, AppError> {
        let keyword = required_text(params, "keyword")?;
        let min_views = optional_int(params, "min_views")?;
        if matches!(min_views, Some(n) if n < 0) {
            return Err(AppError::BadRequest("min_views must be >= 0".into()));
        }
        Ok(SearchRequest {
            keyword,
            min_views,
            limit: limit(params, SEARCH_LIMIT)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest {
    pub keyword: String,
    /// Set only when both `last_published_at` and `last_id` were given.
    pub cursor: Option<SeekCursor>,
    pub limit: i64,
}

impl PageRequest {
    pub fn from_params(params: &RawParams) -> Result<Self, AppError> {
        let keyword = required_text(params, "keyword")?;
        let last_id = optional_int(params, "last_id")?;
        let last_published_at = optional_text(params, "last_published_at")
            .map(|v| {
                parse_timestamp(v).ok_or_else(|| {
                    AppError::BadRequest("last_published_at must be an RFC 3339 timestamp".into())
                })
            })
            .transpose()?;
        let cursor = match (last_published_at, last_id) {
            (Some(published_at), Some(id)) => Some(SeekCursor { published_at, id }),
            (None, None) => None,
            _ => {
                tracing::debug!("incomplete seek cursor, serving first page");
                None
            }
        };
        Ok(PageRequest {
            keyword,
            cursor,
            limit: limit(params, SEARCH_LIMIT)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TagRequest {
    pub tag: String,
    pub keyword: Option<String>,
    pub limit: i64,
}

impl TagRequest {
    pub fn from_params(params: &RawParams) -> Result<Self, AppError> {
        Ok(TagRequest {
            tag: required_text(params, "tag")?,
            keyword: optional_text(params, "keyword").map(str::to_string),
            limit: limit(params, SEARCH_LIMIT)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SuggestRequest {
    pub prefix: String,
    pub limit: i64,
}

impl SuggestRequest {
    pub fn from_params(params: &RawParams) -> Result<Self, AppError> {
        Ok(SuggestRequest {
            prefix: required_text(params, "prefix")?,
            limit: limit(params, SUGGEST_LIMIT)?,
        })
    }
}
