//! Document-store predicate emitter.

use serde_json::{json, Map, Value};

use crate::intent::{Operand, PatternKind, PredicateIntent, SetMode};
use crate::token::Operator;

/// A filter document: field (or dotted path) to value or operator object.
pub type Document = Map<String, Value>;

/// Document emitter.
#[derive(Debug, Clone, Copy)]
pub struct DocumentEmitter {
    escape_patterns: bool,
}

impl Default for DocumentEmitter {
    fn default() -> Self {
        Self {
            escape_patterns: true,
        }
    }
}

impl DocumentEmitter {
    /// `escape_patterns` escapes regex metacharacters in pattern text.
    pub fn new(escape_patterns: bool) -> Self {
        Self { escape_patterns }
    }

    /// Render every intent into one document.
    pub fn emit_all(&self, intents: &[PredicateIntent]) -> Document {
        let mut doc = Document::new();
        for intent in intents {
            merge(&mut doc, self.emit(intent));
        }
        doc
    }

    /// Render one intent as a single-key document.
    pub fn emit(&self, intent: &PredicateIntent) -> Document {
        let (key, value) = match intent {
            PredicateIntent::Comparison {
                field,
                operator,
                operand,
            } => (field.clone(), comparison(*operator, operand)),
            PredicateIntent::Range { field, lower, upper } => (
                field.clone(),
                json!({ "$gte": operand_value(lower), "$lte": operand_value(upper) }),
            ),
            PredicateIntent::Set {
                field,
                values,
                mode,
            } => {
                let list = Value::Array(values.iter().map(operand_value).collect());
                let value = match mode {
                    SetMode::AnyOf => json!({ "$in": list }),
                    SetMode::ArrayEquals => list,
                };
                (field.clone(), value)
            }
            PredicateIntent::Null { field, negated } => {
                let value = if *negated {
                    json!({ "$ne": Value::Null })
                } else {
                    Value::Null
                };
                (field.clone(), value)
            }
            PredicateIntent::Pattern {
                field,
                kind,
                text,
                negated,
            } => {
                let regex = self.pattern(*kind, text);
                (field.clone(), if *negated { json!({ "$not": regex }) } else { regex })
            }
            PredicateIntent::Exists { path, exists } => {
                (path.clone(), json!({ "$exists": exists }))
            }
        };

        let mut doc = Document::new();
        doc.insert(key, value);
        doc
    }

    fn pattern(&self, kind: PatternKind, text: &str) -> Value {
        let text = if self.escape_patterns {
            regex::escape(text)
        } else {
            text.to_string()
        };
        match kind {
            PatternKind::Contains => json!({ "$regex": text, "$options": "i" }),
            PatternKind::StartsWith => json!({ "$regex": format!("^{}", text), "$options": "i" }),
            PatternKind::EndsWith => json!({ "$regex": format!("{}$", text), "$options": "i" }),
            PatternKind::Exact => json!({ "$regex": format!("^{}$", text) }),
        }
    }
}

fn comparison(operator: Operator, operand: &Operand) -> Value {
    let value = operand_value(operand);
    match operator {
        Operator::Eq => value,
        Operator::Ne => json!({ "$ne": value }),
        Operator::Lt => json!({ "$lt": value }),
        Operator::Lte => json!({ "$lte": value }),
        Operator::Gt => json!({ "$gt": value }),
        Operator::Gte => json!({ "$gte": value }),
        Operator::IsNull => Value::Null,
        Operator::NotNull => json!({ "$ne": Value::Null }),
    }
}

fn operand_value(operand: &Operand) -> Value {
    match operand {
        Operand::Text(s) => Value::String(s.clone()),
        Operand::Number(s) => s
            .parse::<serde_json::Number>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(s.clone())),
        Operand::Timestamp(ts) => Value::String(ts.to_rfc3339()),
    }
}

const AND: &str = "$and";

/// Merge `other` into `doc`, conjoining every constraint.
///
/// Operator objects on the same key are combined when their operators are
/// disjoint. Any other collision moves both values into a top-level `$and`.
pub(crate) fn merge(doc: &mut Document, other: Document) {
    for (key, value) in other {
        match doc.get_mut(&key) {
            None => {
                doc.insert(key, value);
            }
            Some(Value::Array(clauses)) if key == AND => match value {
                Value::Array(incoming) => clauses.extend(incoming),
                incoming => clauses.push(incoming),
            },
            Some(Value::Object(existing)) if disjoint(&*existing, &value) => {
                if let Value::Object(incoming) = value {
                    existing.extend(incoming);
                }
            }
            Some(_) => {
                if let Some(earlier) = doc.shift_remove(&key) {
                    let clauses = vec![clause(&key, earlier), clause(&key, value)];
                    let mut conjunction = Document::new();
                    conjunction.insert(AND.to_string(), Value::Array(clauses));
                    merge(doc, conjunction);
                }
            }
        }
    }
}

fn disjoint(existing: &Document, value: &Value) -> bool {
    match value {
        Value::Object(incoming) => incoming.keys().all(|k| !existing.contains_key(k)),
        _ => false,
    }
}

fn clause(key: &str, value: Value) -> Value {
    let mut doc = Document::new();
    doc.insert(key.to_string(), value);
    Value::Object(doc)
}
