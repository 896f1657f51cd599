//! Classifier for the filter-token micro-language.

use serde::Serialize;

/// Prefix on the first of exactly two values that marks an inclusive range.
pub const RANGE_MARKER: &str = "=>=<";

/// Two-character prefixes, checked before single-character ones.
const TWO_CHAR_PREFIXES: [(&str, Operator); 3] = [
    ("<=", Operator::Lte),
    (">=", Operator::Gte),
    ("!=", Operator::Ne),
];

/// Single-character prefixes (`-` is shorthand negation).
const ONE_CHAR_PREFIXES: [(char, Operator); 3] = [
    ('<', Operator::Lt),
    ('>', Operator::Gt),
    ('-', Operator::Ne),
];

const NULL_KEYWORD: &str = "null";

/// Operator recovered from a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// no prefix
    Eq,
    /// `!=` or `-`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// bare `null`
    IsNull,
    /// negated `null`
    NotNull,
}

impl Operator {
    /// SQL comparison symbol.
    pub fn sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::IsNull => "IS NULL",
            Operator::NotNull => "IS NOT NULL",
        }
    }

    /// Whether this is one of the two null checks.
    pub fn is_null_check(self) -> bool {
        matches!(self, Operator::IsNull | Operator::NotNull)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql())
    }
}

/// A single token split into operator and bare operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOperand {
    pub operator: Operator,
    /// Operand with the prefix removed (empty for null checks)
    pub bare_value: String,
}

/// Inclusive lower/upper bound pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRequest {
    pub lower_bound: String,
    pub upper_bound: String,
}

/// Literal membership values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRequest {
    pub values: Vec<String>,
}

/// Classifier decision for an ordered (numeric/date) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Range(RangeRequest),
    Set(SetRequest),
    Single(ParsedOperand),
}

/// Shape of a raw value list before any single-token parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    /// Two values, range marker stripped from the first
    Range { lower: &'a str, upper: &'a str },
    /// More than one value, no range marker
    Set(&'a [String]),
    /// Exactly one value
    Single(&'a str),
}

/// Decide the shape of a raw value list. Returns `None` for an empty list.
pub fn split(raw_values: &[String]) -> Option<Shape<'_>> {
    match raw_values {
        [] => None,
        [single] => Some(Shape::Single(single.as_str())),
        [first, second] => match range_lower_bound(first) {
            Some(lower) => Some(Shape::Range {
                lower,
                upper: second.as_str(),
            }),
            None => Some(Shape::Set(raw_values)),
        },
        _ => Some(Shape::Set(raw_values)),
    }
}

/// Classify a raw value list for an ordered field.
pub fn classify(raw_values: &[String]) -> Option<Classification> {
    let classification = match split(raw_values)? {
        Shape::Range { lower, upper } => Classification::Range(RangeRequest {
            lower_bound: lower.to_string(),
            upper_bound: upper.to_string(),
        }),
        Shape::Set(values) => Classification::Set(SetRequest {
            values: values.to_vec(),
        }),
        Shape::Single(token) => Classification::Single(parse_operand(token)),
    };
    Some(classification)
}

/// Strip at most one operator prefix from a token.
///
/// Two-character prefixes need at least three characters, single-character
/// prefixes at least two. A remaining `null` (any case) becomes a null check.
pub fn parse_operand(token: &str) -> ParsedOperand {
    let (operator, bare) = strip_two_char(token)
        .or_else(|| strip_one_char(token))
        .unwrap_or((Operator::Eq, token));

    if bare.eq_ignore_ascii_case(NULL_KEYWORD) {
        let operator = if operator == Operator::Ne {
            Operator::NotNull
        } else {
            Operator::IsNull
        };
        return ParsedOperand {
            operator,
            bare_value: String::new(),
        };
    }

    ParsedOperand {
        operator,
        bare_value: bare.to_string(),
    }
}

fn strip_two_char(token: &str) -> Option<(Operator, &str)> {
    if token.len() < 3 {
        return None;
    }
    TWO_CHAR_PREFIXES
        .iter()
        .find_map(|(prefix, op)| token.strip_prefix(*prefix).map(|rest| (*op, rest)))
}

fn strip_one_char(token: &str) -> Option<(Operator, &str)> {
    if token.len() < 2 {
        return None;
    }
    ONE_CHAR_PREFIXES
        .iter()
        .find_map(|(prefix, op)| token.strip_prefix(*prefix).map(|rest| (*op, rest)))
}

/// Lower bound of a range, if the token carries the marker plus a value.
fn range_lower_bound(token: &str) -> Option<&str> {
    token.strip_prefix(RANGE_MARKER).filter(|rest| !rest.is_empty())
}
