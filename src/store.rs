//! Database bootstrap: create the target database, the PGroonga extension, the search table and its indexes.

use crate::config::table::quoted;
use crate::config::TableName;
use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Create the database named in `database_url` if it does not exist (connects to `postgres` on the same server).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "DATABASE_URL",
            message: "no database path".into(),
        })?;
    let path_and_query = &url[path_start..];
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((db, q)) => (db.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let base = &url[..path_start];
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

/// Statements that create the extension, the search table and its indexes. All idempotent.
pub fn search_schema_ddl(table: &TableName) -> Vec<String> {
    let qualified = table.qualified();
    let prefix = table.index_prefix();
    let mut ddl = vec!["CREATE EXTENSION IF NOT EXISTS pgroonga".to_string()];
    if let Some(schema) = &table.schema {
        ddl.push(format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)));
    }
    ddl.push(format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT,
            content TEXT NOT NULL DEFAULT '',
            tags TEXT[] NOT NULL DEFAULT '{{}}',
            view_count BIGINT NOT NULL DEFAULT 0,
            published_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        qualified
    ));
    ddl.push(format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} USING pgroonga (title, content)",
        quoted(&format!("{}_fulltext_idx", prefix)),
        qualified
    ));
    ddl.push(format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} USING gin (tags)",
        quoted(&format!("{}_tags_idx", prefix)),
        qualified
    ));
    ddl.push(format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} (published_at DESC, id DESC)",
        quoted(&format!("{}_published_seek_idx", prefix)),
        qualified
    ));
    ddl
}

/// Advisory lock key held while bootstrapping; concurrent `CREATE EXTENSION IF NOT EXISTS` races otherwise.
pub const BOOTSTRAP_LOCK_KEY: i64 = 0x7067_726f_6f6e_6761;

/// Apply [`search_schema_ddl`] in one transaction, serialized across sessions by an advisory lock.
pub async fn ensure_search_schema(pool: &PgPool, table: &TableName) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(BOOTSTRAP_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for stmt in search_schema_ddl(table) {
        tracing::debug!(sql = %stmt.trim(), "bootstrap");
        sqlx::query(&stmt).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(table = %table, "search schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_swaps_database_name() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/blog").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "blog");
    }

    #[test]
    fn admin_url_keeps_query_options() {
        let (admin, db) = parse_db_name_from_url("postgres://localhost/blog?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(db, "blog");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }

    #[test]
    fn ddl_covers_extension_table_and_indexes() {
        let ddl = search_schema_ddl(&TableName::default());
        assert_eq!(ddl[0], "CREATE EXTENSION IF NOT EXISTS pgroonga");
        assert!(ddl[1].contains("CREATE TABLE IF NOT EXISTS \"blog_posts\""));
        assert!(ddl[1].contains("tags TEXT[] NOT NULL DEFAULT '{}'"));
        assert!(ddl.iter().any(|s| s.contains("USING pgroonga (title, content)")));
        assert!(ddl.iter().any(|s| s.contains("USING gin (tags)")));
        assert!(ddl.iter().any(|s| s.contains("(published_at DESC, id DESC)")));
    }

    #[test]
    fn ddl_creates_schema_for_qualified_tables() {
        let ddl = search_schema_ddl(&TableName::parse("cms.posts").unwrap());
        assert_eq!(ddl[1], "CREATE SCHEMA IF NOT EXISTS \"cms\"");
        assert!(ddl.iter().any(|s| s.contains("\"cms_posts_fulltext_idx\"")));
    }
}
