//! String, object and array translation.
//!
//! Single string tokens run through a fixed, ordered rule table in two
//! passes. The wildcard pass runs on tokens longer than one character; the
//! qualifier pass on tokens still longer than two and not yet negated.

use crate::intent::{Operand, PatternKind, PredicateIntent, SetMode};
use crate::request::DeclaredType;
use crate::token::{split, Operator, Shape};
use crate::{Error, Result};

const NULL_KEYWORD: &str = "null";

/// Flags collected while scanning a single token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TokenFlags {
    /// trailing `*`
    starts_with: bool,
    /// leading `*`
    ends_with: bool,
    /// both `*`
    contains: bool,
    /// leading `-` or `!=`
    negated: bool,
    /// wrapped in `"`
    exact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TextToken<'a> {
    value: &'a str,
    flags: TokenFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Wildcards,
    Qualifiers,
}

impl Pass {
    /// Evaluated once, before any rule of the pass runs.
    fn admits(self, token: &TextToken<'_>) -> bool {
        match self {
            Pass::Wildcards => token.value.len() > 1,
            Pass::Qualifiers => token.value.len() > 2 && !token.flags.negated,
        }
    }
}

struct Rule {
    name: &'static str,
    pass: Pass,
    applies: fn(&TextToken<'_>) -> bool,
    apply: fn(&mut TextToken<'_>),
}

const RULES: [Rule; 6] = [
    Rule {
        name: "trailing-star",
        pass: Pass::Wildcards,
        applies: has_trailing_star,
        apply: strip_trailing_star,
    },
    Rule {
        name: "leading-dash",
        pass: Pass::Wildcards,
        applies: has_leading_dash,
        apply: strip_leading_dash,
    },
    Rule {
        name: "leading-star",
        pass: Pass::Wildcards,
        applies: has_leading_star,
        apply: strip_leading_star,
    },
    Rule {
        name: "both-stars",
        pass: Pass::Wildcards,
        applies: has_both_stars,
        apply: collapse_to_contains,
    },
    Rule {
        name: "bang-equals",
        pass: Pass::Qualifiers,
        applies: has_bang_equals,
        apply: strip_bang_equals,
    },
    Rule {
        name: "double-quotes",
        pass: Pass::Qualifiers,
        applies: is_quoted,
        apply: strip_quotes,
    },
];

fn has_trailing_star(t: &TextToken<'_>) -> bool {
    t.value.ends_with('*')
}

fn strip_trailing_star(t: &mut TextToken<'_>) {
    let v = t.value;
    t.value = &v[..v.len() - 1];
    t.flags.starts_with = true;
}

fn has_leading_dash(t: &TextToken<'_>) -> bool {
    t.value.starts_with('-')
}

fn strip_leading_dash(t: &mut TextToken<'_>) {
    let v = t.value;
    t.value = &v[1..];
    t.flags.negated = true;
}

// Shares the first character with the dash rule, which wins.
fn has_leading_star(t: &TextToken<'_>) -> bool {
    !t.flags.negated && t.value.starts_with('*')
}

fn strip_leading_star(t: &mut TextToken<'_>) {
    let v = t.value;
    t.value = &v[1..];
    t.flags.ends_with = true;
}

fn has_both_stars(t: &TextToken<'_>) -> bool {
    t.flags.starts_with && t.flags.ends_with
}

fn collapse_to_contains(t: &mut TextToken<'_>) {
    t.flags.contains = true;
    t.flags.starts_with = false;
    t.flags.ends_with = false;
}

fn has_bang_equals(t: &TextToken<'_>) -> bool {
    t.value.starts_with("!=")
}

fn strip_bang_equals(t: &mut TextToken<'_>) {
    let v = t.value;
    t.value = &v[2..];
    t.flags.negated = true;
}

fn is_quoted(t: &TextToken<'_>) -> bool {
    !t.flags.negated && t.value.len() >= 2 && t.value.starts_with('"') && t.value.ends_with('"')
}

fn strip_quotes(t: &mut TextToken<'_>) {
    let v = t.value;
    t.value = &v[1..v.len() - 1];
    t.flags.exact = true;
}

fn scan(value: &str) -> TextToken<'_> {
    let mut token = TextToken {
        value,
        flags: TokenFlags::default(),
    };

    for pass in [Pass::Wildcards, Pass::Qualifiers] {
        if !pass.admits(&token) {
            continue;
        }
        for rule in RULES.iter().filter(|r| r.pass == pass) {
            if (rule.applies)(&token) {
                (rule.apply)(&mut token);
                tracing::trace!(rule = rule.name, value = token.value, "applied token rule");
            }
        }
    }

    token
}

/// Translate raw values for a string, object or array field.
pub fn translate_text(
    field: &str,
    declared_type: DeclaredType,
    raw_values: &[String],
) -> Result<Vec<PredicateIntent>> {
    if declared_type == DeclaredType::Object {
        return raw_values
            .iter()
            .map(|sub| existence(field, sub))
            .collect();
    }

    let Some(shape) = split(raw_values) else {
        return Ok(Vec::new());
    };

    let intent = match shape {
        // The range marker carries no meaning here; values stay literal.
        Shape::Range { .. } | Shape::Set(_) => PredicateIntent::Set {
            field: field.to_string(),
            values: raw_values.iter().map(|v| Operand::text(v.as_str())).collect(),
            mode: if declared_type == DeclaredType::Array {
                SetMode::ArrayEquals
            } else {
                SetMode::AnyOf
            },
        },
        Shape::Single(token) => single(field, token)?,
    };

    Ok(vec![intent])
}

fn single(field: &str, raw: &str) -> Result<PredicateIntent> {
    if raw.is_empty() {
        return Err(Error::MalformedToken {
            field: field.to_string(),
            token: raw.to_string(),
            reason: "a string filter needs a value",
        });
    }

    let TextToken { value, flags } = scan(raw);

    if value.eq_ignore_ascii_case(NULL_KEYWORD) {
        return Ok(PredicateIntent::Null {
            field: field.to_string(),
            negated: flags.negated,
        });
    }

    let kind = if flags.exact {
        Some(PatternKind::Exact)
    } else if flags.contains {
        Some(PatternKind::Contains)
    } else if flags.starts_with {
        Some(PatternKind::StartsWith)
    } else if flags.ends_with {
        Some(PatternKind::EndsWith)
    } else {
        None
    };

    let intent = match kind {
        Some(kind) => PredicateIntent::Pattern {
            field: field.to_string(),
            kind,
            text: value.to_string(),
            negated: false,
        },
        None => PredicateIntent::Comparison {
            field: field.to_string(),
            operator: if flags.negated { Operator::Ne } else { Operator::Eq },
            operand: Operand::text(value),
        },
    };
    Ok(intent)
}

/// `-sub` and `!=sub` expect the sub-field to be absent.
fn existence(field: &str, raw: &str) -> Result<PredicateIntent> {
    let mut sub = raw;
    let mut exists = true;

    if sub.len() >= 2 {
        if let Some(rest) = sub.strip_prefix('-') {
            exists = false;
            sub = rest;
        }
    }
    if exists && sub.len() >= 3 {
        if let Some(rest) = sub.strip_prefix("!=") {
            exists = false;
            sub = rest;
        }
    }

    if sub.is_empty() {
        return Err(Error::MalformedToken {
            field: field.to_string(),
            token: raw.to_string(),
            reason: "an existence check needs a sub-field name",
        });
    }

    Ok(PredicateIntent::Exists {
        path: format!("{}.{}", field, sub),
        exists,
    })
}
