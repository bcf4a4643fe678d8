//! Search table identifier. Only plain identifiers are accepted so the name can be spliced into SQL.

use crate::error::ConfigError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const DEFAULT_TABLE: &str = "blog_posts";

fn ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("static identifier pattern"))
}

/// Optionally schema-qualified table name, e.g. `blog_posts` or `content.blog_posts`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableName {
    pub schema: Option<String>,
    pub table: String,
}

impl TableName {
    /// Names are folded to lowercase, as PostgreSQL does for unquoted identifiers.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let (schema, table) = match raw.split_once('.') {
            Some((s, t)) => (Some(s), t),
            None => (None, raw),
        };
        let valid = |s: &str| ident_re().is_match(s);
        if !valid(table) || schema.map(|s| !valid(s)).unwrap_or(false) {
            return Err(ConfigError::InvalidIdentifier(raw.to_string()));
        }
        Ok(TableName {
            schema: schema.map(|s| s.to_ascii_lowercase()),
            table: table.to_ascii_lowercase(),
        })
    }

    /// Quoted, qualified form for use in statements.
    pub fn qualified(&self) -> String {
        match &self.schema {
            Some(s) => format!("{}.{}", quoted(s), quoted(&self.table)),
            None => quoted(&self.table),
        }
    }

    /// Plain name used to derive index names.
    pub fn index_prefix(&self) -> String {
        match &self.schema {
            Some(s) => format!("{}_{}", s, self.table),
            None => self.table.clone(),
        }
    }
}

impl Default for TableName {
    fn default() -> Self {
        TableName {
            schema: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(s) => write!(f, "{}.{}", s, self.table),
            None => f.write_str(&self.table),
        }
    }
}

/// Quote identifier for PostgreSQL.
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
