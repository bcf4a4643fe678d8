//! HTTP handlers for the search endpoints.

pub mod search;
pub use search::*;
