//! Rows returned by the search endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub view_count: i64,
    pub published_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaggedHit {
    pub id: i64,
    pub title: String,
    pub tags: Vec<String>,
    pub view_count: i64,
}

/// One page of a seek scan. `last_id` / `last_published_at` are the cursor for the next request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub results: Vec<SearchHit>,
    pub has_next: bool,
    pub last_id: Option<i64>,
    pub last_published_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Split rows fetched with `limit + 1` into a page: the extra row only signals `has_next`.
    pub fn from_overfetch(mut rows: Vec<SearchHit>, limit: usize) -> Self {
        let has_next = rows.len() > limit;
        rows.truncate(limit);
        let (last_id, last_published_at) = match rows.last() {
            Some(last) => (Some(last.id), Some(last.published_at)),
            None => (None, None),
        };
        Page {
            results: rows,
            has_next,
            last_id,
            last_published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hits(n: i64) -> Vec<SearchHit> {
        (0..n)
            .map(|i| SearchHit {
                id: 100 - i,
                title: format!("post {}", i),
                author: None,
                view_count: i,
                published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() - chrono::Duration::hours(i),
            })
            .collect()
    }

    #[test]
    fn overfetched_row_sets_has_next_and_is_dropped() {
        let page = Page::from_overfetch(hits(4), 3);
        assert!(page.has_next);
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.last_id, Some(98));
        assert_eq!(page.last_published_at, Some(page.results[2].published_at));
    }

    #[test]
    fn exact_fit_has_no_next_page() {
        let page = Page::from_overfetch(hits(3), 3);
        assert!(!page.has_next);
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.last_id, Some(98));
    }

    #[test]
    fn empty_page_has_null_cursor() {
        let page = Page::from_overfetch(Vec::new(), 10);
        assert!(!page.has_next);
        assert!(page.results.is_empty());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["last_id"], serde_json::Value::Null);
        assert_eq!(json["last_published_at"], serde_json::Value::Null);
    }

    #[test]
    fn cursor_timestamp_serializes_as_rfc3339() {
        let page = Page::from_overfetch(hits(1), 10);
        let json = serde_json::to_value(&page).unwrap();
        let ts = json["last_published_at"].as_str().unwrap();
        let parsed: DateTime<Utc> = ts.parse().unwrap();
        assert_eq!(Some(parsed), page.last_published_at);
    }
}
