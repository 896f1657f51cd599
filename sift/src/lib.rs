//! SIFT: Structured Input Filter Translator
//!
//! Compiles short query-string filter tokens (`>=10`, `-null`, `*foo*`,
//! `=>=<lo`/`hi`) into SQL where-fragments or document-store filters.

pub mod config;
pub mod emit;
pub mod error;
pub mod filter;
pub mod intent;
pub mod request;
pub mod token;
pub mod translate;

pub use config::{Config, TimestampPolicy};
pub use emit::{BoundValue, Document, SqlPredicate};
pub use error::{Error, Result};
pub use filter::{translate, Backend, CompositePredicate, FilterSet, Predicate, Translator};
pub use intent::{Operand, PatternKind, PredicateIntent, SetMode};
pub use request::{DeclaredType, FilterRequest};
pub use token::{
    classify, parse_operand, split, Classification, Operator, ParsedOperand, RangeRequest,
    SetRequest, Shape, RANGE_MARKER,
};
