//! Bind values for search statements, bound with their native PostgreSQL types.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Text(String),
    I64(i64),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::I64(n)
    }
}

impl From<DateTime<Utc>> for BindValue {
    fn from(t: DateTime<Utc>) -> Self {
        BindValue::Timestamp(t)
    }
}

/// Bind every value in order onto a typed query.
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            BindValue::Text(s) => query.bind(s.as_str()),
            BindValue::I64(n) => query.bind(*n),
            BindValue::Timestamp(t) => query.bind(*t),
        };
    }
    query
}
