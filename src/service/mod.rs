//! SearchService and request validation.

mod search;
pub mod validation;
pub use search::SearchService;
pub use validation::{PageRequest, RawParams, SearchRequest, SuggestRequest, TagRequest};
