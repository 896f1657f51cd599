//! Backend-neutral predicate intents.
//!
//! Translators produce these; emitters consume them. Every emitter matches
//! exhaustively, so a new variant has to be handled by both backends.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::token::Operator;

/// A typed operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Operand {
    /// Literal text (string fields, or a date that failed to parse)
    Text(String),
    /// Numeric literal, forwarded unvalidated
    Number(String),
    /// RFC 3339 instant
    Timestamp(DateTime<FixedOffset>),
}

impl Operand {
    pub fn text(value: impl Into<String>) -> Self {
        Operand::Text(value.into())
    }

    pub fn number(value: impl Into<String>) -> Self {
        Operand::Number(value.into())
    }
}

/// Which part of a string a pattern anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    Contains,
    StartsWith,
    EndsWith,
    Exact,
}

/// How a set of values is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SetMode {
    /// Field equals any one of the values
    AnyOf,
    /// Array field equals the values as a whole
    ArrayEquals,
}

/// What a filter means, independent of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum PredicateIntent {
    Comparison {
        field: String,
        operator: Operator,
        operand: Operand,
    },
    Range {
        field: String,
        lower: Operand,
        upper: Operand,
    },
    Set {
        field: String,
        values: Vec<Operand>,
        mode: SetMode,
    },
    Null {
        field: String,
        negated: bool,
    },
    Pattern {
        field: String,
        kind: PatternKind,
        text: String,
        negated: bool,
    },
    Exists {
        /// Dotted `field.subfield` path
        path: String,
        exists: bool,
    },
}

impl PredicateIntent {
    /// Field or dotted path the intent constrains.
    pub fn field(&self) -> &str {
        match self {
            PredicateIntent::Comparison { field, .. }
            | PredicateIntent::Range { field, .. }
            | PredicateIntent::Set { field, .. }
            | PredicateIntent::Null { field, .. }
            | PredicateIntent::Pattern { field, .. } => field,
            PredicateIntent::Exists { path, .. } => path,
        }
    }

    /// Variant name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PredicateIntent::Comparison { .. } => "comparison",
            PredicateIntent::Range { .. } => "range",
            PredicateIntent::Set { .. } => "set",
            PredicateIntent::Null { .. } => "null",
            PredicateIntent::Pattern { .. } => "pattern",
            PredicateIntent::Exists { .. } => "exists",
        }
    }
}
