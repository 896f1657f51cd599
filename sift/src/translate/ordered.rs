//! Numeric and date translation.
//!
//! Both types share one algorithm over the classifier's decision and differ
//! only in how a bare operand is parsed.

use chrono::DateTime;

use crate::config::TimestampPolicy;
use crate::intent::{Operand, PredicateIntent, SetMode};
use crate::token::{classify, Classification, Operator};
use crate::{Error, Result};

/// Parses a bare operand for an ordered field.
pub trait OperandParser {
    fn parse(&self, field: &str, raw: &str) -> Result<Operand>;
}

/// Numeric literals are forwarded as-is; the backend rejects invalid ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericOperand;

impl OperandParser for NumericOperand {
    fn parse(&self, _field: &str, raw: &str) -> Result<Operand> {
        Ok(Operand::number(raw))
    }
}

/// RFC 3339 timestamps, with a policy for values that do not parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateOperand {
    policy: TimestampPolicy,
}

impl DateOperand {
    pub fn new(policy: TimestampPolicy) -> Self {
        Self { policy }
    }
}

impl OperandParser for DateOperand {
    fn parse(&self, field: &str, raw: &str) -> Result<Operand> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => Ok(Operand::Timestamp(ts)),
            Err(source) => match self.policy {
                TimestampPolicy::Lenient => {
                    tracing::warn!(
                        field,
                        value = raw,
                        error = %source,
                        "passing unparseable timestamp through"
                    );
                    Ok(Operand::text(raw))
                }
                TimestampPolicy::Strict => Err(Error::UnparseableTimestamp {
                    field: field.to_string(),
                    value: raw.to_string(),
                    source,
                }),
            },
        }
    }
}

/// Translate an ordered field's tokens. An empty token list yields `None`.
pub fn translate_ordered<P: OperandParser>(
    field: &str,
    raw_values: &[String],
    parser: &P,
) -> Result<Option<PredicateIntent>> {
    let Some(classification) = classify(raw_values) else {
        return Ok(None);
    };
    let intent = match classification {
        Classification::Range(range) => PredicateIntent::Range {
            field: field.to_string(),
            lower: parser.parse(field, &range.lower_bound)?,
            upper: parser.parse(field, &range.upper_bound)?,
        },
        Classification::Set(set) => PredicateIntent::Set {
            field: field.to_string(),
            values: set
                .values
                .iter()
                .map(|v| parser.parse(field, v))
                .collect::<Result<Vec<_>>>()?,
            mode: SetMode::AnyOf,
        },
        Classification::Single(operand) if operand.operator.is_null_check() => {
            PredicateIntent::Null {
                field: field.to_string(),
                negated: operand.operator == Operator::NotNull,
            }
        }
        Classification::Single(operand) => {
            if operand.bare_value.is_empty() {
                return Err(Error::MalformedToken {
                    field: field.to_string(),
                    token: raw_values.first().cloned().unwrap_or_default(),
                    reason: "a comparison needs a value",
                });
            }
            PredicateIntent::Comparison {
                field: field.to_string(),
                operator: operand.operator,
                operand: parser.parse(field, &operand.bare_value)?,
            }
        }
    };
    Ok(Some(intent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn numeric(field: &str, tokens: &[&str]) -> Result<PredicateIntent> {
        translate_ordered(field, &raw(tokens), &NumericOperand).map(|i| i.unwrap())
    }

    fn date(field: &str, tokens: &[&str], policy: TimestampPolicy) -> Result<PredicateIntent> {
        translate_ordered(field, &raw(tokens), &DateOperand::new(policy)).map(|i| i.unwrap())
    }

    fn ts(s: &str) -> Operand {
        Operand::Timestamp(DateTime::parse_from_rfc3339(s).unwrap())
    }

    #[test]
    fn test_numeric_comparison() {
        assert_eq!(
            numeric("age", &[">=18"]).unwrap(),
            PredicateIntent::Comparison {
                field: "age".to_string(),
                operator: Operator::Gte,
                operand: Operand::number("18"),
            }
        );
    }

    #[test]
    fn test_numeric_invalid_literal_is_forwarded() {
        let intent = numeric("age", &["<abc"]).unwrap();
        assert!(matches!(
            intent,
            PredicateIntent::Comparison {
                operator: Operator::Lt,
                operand: Operand::Number(ref n),
                ..
            } if n == "abc"
        ));
    }

    #[test]
    fn test_numeric_unit_suffix_is_not_interpreted() {
        let intent = numeric("size", &["10kib"]).unwrap();
        assert!(matches!(
            intent,
            PredicateIntent::Comparison { operand: Operand::Number(ref n), .. } if n == "10kib"
        ));
    }

    #[test]
    fn test_numeric_range() {
        assert_eq!(
            numeric("age", &["=>=<18", "65"]).unwrap(),
            PredicateIntent::Range {
                field: "age".to_string(),
                lower: Operand::number("18"),
                upper: Operand::number("65"),
            }
        );
    }

    #[test]
    fn test_numeric_set() {
        assert_eq!(
            numeric("age", &["1", "2", "3"]).unwrap(),
            PredicateIntent::Set {
                field: "age".to_string(),
                values: vec![Operand::number("1"), Operand::number("2"), Operand::number("3")],
                mode: SetMode::AnyOf,
            }
        );
    }

    #[test]
    fn test_null_checks() {
        assert_eq!(
            date("deletedAt", &["null"], TimestampPolicy::Lenient).unwrap(),
            PredicateIntent::Null { field: "deletedAt".to_string(), negated: false }
        );
        assert_eq!(
            date("deletedAt", &["!=null"], TimestampPolicy::Lenient).unwrap(),
            PredicateIntent::Null { field: "deletedAt".to_string(), negated: true }
        );
        assert_eq!(
            numeric("score", &["-null"]).unwrap(),
            PredicateIntent::Null { field: "score".to_string(), negated: true }
        );
    }

    #[test]
    fn test_empty_token_is_malformed() {
        assert!(matches!(
            numeric("age", &[""]),
            Err(Error::MalformedToken { ref field, ref token, .. })
                if field == "age" && token.is_empty()
        ));
    }

    #[test]
    fn test_no_tokens_yield_nothing() {
        assert_eq!(translate_ordered("age", &[], &NumericOperand).unwrap(), None);
    }

    #[test]
    fn test_date_range_parses_bounds() {
        assert_eq!(
            date(
                "createdAt",
                &["=>=<2024-01-01T00:00:00Z", "2024-12-31T00:00:00Z"],
                TimestampPolicy::Lenient
            )
            .unwrap(),
            PredicateIntent::Range {
                field: "createdAt".to_string(),
                lower: ts("2024-01-01T00:00:00Z"),
                upper: ts("2024-12-31T00:00:00Z"),
            }
        );
    }

    #[test]
    fn test_date_comparison_keeps_offset() {
        let intent =
            date("createdAt", &["<2024-06-01T12:00:00+02:00"], TimestampPolicy::Lenient).unwrap();
        assert_eq!(
            intent,
            PredicateIntent::Comparison {
                field: "createdAt".to_string(),
                operator: Operator::Lt,
                operand: ts("2024-06-01T12:00:00+02:00"),
            }
        );
    }

    #[test]
    fn test_date_dash_negation() {
        let intent =
            date("createdAt", &["-2024-01-01T00:00:00Z"], TimestampPolicy::Lenient).unwrap();
        assert!(matches!(
            intent,
            PredicateIntent::Comparison { operator: Operator::Ne, .. }
        ));
    }

    #[test]
    fn test_lenient_date_passes_raw_text() {
        assert_eq!(
            date("createdAt", &[">=yesterday"], TimestampPolicy::Lenient).unwrap(),
            PredicateIntent::Comparison {
                field: "createdAt".to_string(),
                operator: Operator::Gte,
                operand: Operand::text("yesterday"),
            }
        );
    }

    #[test]
    fn test_lenient_date_set_mixes_parsed_and_raw() {
        let intent =
            date("createdAt", &["2024-01-01T00:00:00Z", "soon"], TimestampPolicy::Lenient).unwrap();
        assert_eq!(
            intent,
            PredicateIntent::Set {
                field: "createdAt".to_string(),
                values: vec![ts("2024-01-01T00:00:00Z"), Operand::text("soon")],
                mode: SetMode::AnyOf,
            }
        );
    }

    #[test]
    fn test_strict_date_rejects() {
        let err = date(
            "createdAt",
            &["=>=<2024-01-01", "2024-02-01T00:00:00Z"],
            TimestampPolicy::Strict,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::UnparseableTimestamp { ref field, ref value, .. }
                if field == "createdAt" && value == "2024-01-01"
        ));
    }
}
