//! SQL predicate emitter.
//!
//! Renders intents as where-fragments with `?` placeholders. Values are always
//! bound; only the `NULL` keyword is written into the fragment.

use serde::Serialize;

use crate::intent::{Operand, PatternKind, PredicateIntent, SetMode};
use crate::token::Operator;
use crate::{Error, Result};

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Scalar(Operand),
    /// Expanded by the execution layer (`IN ?`)
    List(Vec<Operand>),
}

/// Where-fragment plus its bound parameters, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SqlPredicate {
    pub fragment: String,
    pub params: Vec<BoundValue>,
}

impl SqlPredicate {
    fn new(fragment: String, params: Vec<BoundValue>) -> Self {
        Self { fragment, params }
    }

    /// True when the predicate constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    /// Conjoin another predicate onto this one.
    pub fn and(mut self, other: SqlPredicate) -> SqlPredicate {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        self.fragment = format!("{} AND {}", self.fragment, other.fragment);
        self.params.extend(other.params);
        self
    }
}

/// Escape SQL LIKE metacharacters (%, _, \) in user input.
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// SQL emitter, optionally qualifying fields with a table alias.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlEmitter<'a> {
    alias: Option<&'a str>,
}

impl<'a> SqlEmitter<'a> {
    pub fn new() -> Self {
        Self { alias: None }
    }

    /// Prepend `alias.` to every field (e.g. "sp" -> "sp.field").
    pub fn with_alias(alias: &'a str) -> Self {
        Self { alias: Some(alias) }
    }

    fn column(&self, field: &str) -> String {
        match self.alias {
            Some(alias) if !alias.is_empty() => format!("{}.{}", alias, field),
            _ => field.to_string(),
        }
    }

    /// Render every intent, joined with `AND`.
    pub fn emit_all(&self, intents: &[PredicateIntent]) -> Result<SqlPredicate> {
        intents
            .iter()
            .try_fold(SqlPredicate::default(), |acc, intent| Ok(acc.and(self.emit(intent)?)))
    }

    /// Render one intent.
    pub fn emit(&self, intent: &PredicateIntent) -> Result<SqlPredicate> {
        let predicate = match intent {
            PredicateIntent::Comparison {
                field,
                operator,
                operand,
            } => {
                let col = self.column(field);
                if operator.is_null_check() {
                    SqlPredicate::new(format!("{} {}", col, operator.sql()), Vec::new())
                } else {
                    SqlPredicate::new(
                        format!("{} {} ?", col, operator.sql()),
                        vec![BoundValue::Scalar(operand.clone())],
                    )
                }
            }
            PredicateIntent::Range { field, lower, upper } => {
                let col = self.column(field);
                SqlPredicate::new(
                    format!("{} >= ? AND {} <= ?", col, col),
                    vec![
                        BoundValue::Scalar(lower.clone()),
                        BoundValue::Scalar(upper.clone()),
                    ],
                )
            }
            PredicateIntent::Set {
                field,
                values,
                mode,
            } => {
                let col = self.column(field);
                let fragment = match mode {
                    SetMode::AnyOf => format!("{} IN ?", col),
                    SetMode::ArrayEquals => format!("{} = ?", col),
                };
                SqlPredicate::new(fragment, vec![BoundValue::List(values.clone())])
            }
            PredicateIntent::Null { field, negated } => {
                let op = if *negated {
                    Operator::NotNull
                } else {
                    Operator::IsNull
                };
                SqlPredicate::new(format!("{} {}", self.column(field), op.sql()), Vec::new())
            }
            PredicateIntent::Pattern {
                field,
                kind,
                text,
                negated,
            } => {
                let col = self.column(field);
                let escaped = escape_like_pattern(text);
                let (fragment, value) = match (kind, negated) {
                    (PatternKind::Exact, false) => (format!("{} = ?", col), text.clone()),
                    (PatternKind::Exact, true) => (format!("{} <> ?", col), text.clone()),
                    (kind, negated) => {
                        let like = if *negated { "NOT ILIKE" } else { "ILIKE" };
                        let value = match kind {
                            PatternKind::StartsWith => format!("{}%", escaped),
                            PatternKind::EndsWith => format!("%{}", escaped),
                            _ => format!("%{}%", escaped),
                        };
                        (format!("{} {} ? ESCAPE '\\'", col, like), value)
                    }
                };
                SqlPredicate::new(fragment, vec![BoundValue::Scalar(Operand::Text(value))])
            }
            PredicateIntent::Exists { .. } => {
                return Err(Error::Unsupported {
                    backend: "sql",
                    intent: intent.kind_name(),
                })
            }
        };
        Ok(predicate)
    }
}
