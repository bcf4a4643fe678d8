//! Builds the parameterized search statements. The table name comes from settings only; every request value is a parameter.

use crate::config::TableName;
use crate::sql::BindValue;
use chrono::{DateTime, Utc};

/// Row alias used in every statement.
const ALIAS: &str = "p";

/// Full-text predicate over title and content, using the PGroonga query operator.
fn match_clause(param: u32) -> String {
    format!("({a}.title &@~ ${n} OR {a}.content &@~ ${n})", a = ALIAS, n = param)
}

/// Columns of a search hit, cast so integer width and timestamp flavour of the table do not matter.
fn hit_columns() -> String {
    format!(
        "{a}.id::bigint AS id, {a}.title::text AS title, {a}.author::text AS author, \
         {a}.view_count::bigint AS view_count, {a}.published_at::timestamptz AS published_at",
        a = ALIAS
    )
}

fn tagged_columns() -> String {
    format!(
        "{a}.id::bigint AS id, {a}.title::text AS title, {a}.tags::text[] AS tags, \
         {a}.view_count::bigint AS view_count",
        a = ALIAS
    )
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        Self::default()
    }

    fn push_param(&mut self, v: impl Into<BindValue>) -> u32 {
        self.params.push(v.into());
        self.params.len() as u32
    }
}

/// Position in a `(published_at, id)` descending scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeekCursor {
    pub published_at: DateTime<Utc>,
    pub id: i64,
}

/// Keyword search, optionally restricted to `view_count >= min_views`, most viewed first.
pub fn search(table: &TableName, keyword: &str, min_views: Option<i64>, limit: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let kw = q.push_param(keyword);
    let mut sql = format!(
        "SELECT {} FROM {} AS {} WHERE {}",
        hit_columns(),
        table.qualified(),
        ALIAS,
        match_clause(kw)
    );
    if let Some(min) = min_views {
        let n = q.push_param(min);
        sql.push_str(&format!(" AND {}.view_count >= ${}", ALIAS, n));
    }
    let n = q.push_param(limit);
    sql.push_str(&format!(" ORDER BY {}.view_count DESC LIMIT ${}", ALIAS, n));
    q.sql = sql;
    q
}

/// One page of a seek scan ordered by `(published_at, id)` descending.
/// `fetch_limit` is passed through as-is; callers ask for one extra row to detect a next page.
pub fn search_page(
    table: &TableName,
    keyword: &str,
    cursor: Option<SeekCursor>,
    fetch_limit: i64,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let kw = q.push_param(keyword);
    let mut sql = format!(
        "SELECT {} FROM {} AS {} WHERE {}",
        hit_columns(),
        table.qualified(),
        ALIAS,
        match_clause(kw)
    );
    if let Some(c) = cursor {
        let ts = q.push_param(c.published_at);
        let id = q.push_param(c.id);
        sql.push_str(&format!(
            " AND ({a}.published_at, {a}.id) < (${}, ${})",
            ts,
            id,
            a = ALIAS
        ));
    }
    let n = q.push_param(fetch_limit);
    sql.push_str(&format!(
        " ORDER BY {a}.published_at DESC, {a}.id DESC LIMIT ${}",
        n,
        a = ALIAS
    ));
    q.sql = sql;
    q
}

/// Posts carrying `tag`, optionally also matching `keyword`, most viewed first.
pub fn search_by_tag(table: &TableName, tag: &str, keyword: Option<&str>, limit: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let t = q.push_param(tag);
    let mut sql = format!(
        "SELECT {} FROM {} AS {a} WHERE ${} = ANY({a}.tags)",
        tagged_columns(),
        table.qualified(),
        t,
        a = ALIAS
    );
    if let Some(kw) = keyword {
        let n = q.push_param(kw);
        sql.push_str(&format!(" AND {}", match_clause(n)));
    }
    let n = q.push_param(limit);
    sql.push_str(&format!(" ORDER BY {}.view_count DESC LIMIT ${}", ALIAS, n));
    q.sql = sql;
    q
}

/// Distinct titles starting with `prefix` (PGroonga prefix operator).
pub fn suggest(table: &TableName, prefix: &str, limit: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let p = q.push_param(prefix);
    let n = q.push_param(limit);
    q.sql = format!(
        "SELECT DISTINCT {a}.title::text AS title FROM {} AS {a} WHERE {a}.title &^ ${} LIMIT ${}",
        table.qualified(),
        p,
        n,
        a = ALIAS
    );
    q
}
