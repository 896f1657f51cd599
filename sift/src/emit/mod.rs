//! Predicate emitters.
//!
//! - `sql`: where-fragment with `?` placeholders plus ordered bound values
//! - `document`: nested filter document keyed by field and `$` operators

mod document;
mod sql;

pub(crate) use document::merge;
pub use document::{Document, DocumentEmitter};
pub use sql::{escape_like_pattern, BoundValue, SqlEmitter, SqlPredicate};
