//! Type translators: raw tokens to predicate intents.
//!
//! - `ordered`: numeric and date fields, feeding the SQL emitter
//! - `text`: string, object and array fields, feeding the document emitter

mod ordered;
mod text;

pub use ordered::{translate_ordered, DateOperand, NumericOperand, OperandParser};
pub use text::translate_text;

use crate::config::Config;
use crate::intent::PredicateIntent;
use crate::request::{DeclaredType, FilterRequest};
use crate::Result;

/// Translate a request into intents. An empty value list yields no intents.
pub fn intents(request: &FilterRequest, config: &Config) -> Result<Vec<PredicateIntent>> {
    let field = request.field.as_str();
    match request.declared_type {
        DeclaredType::Numeric => ordered_intents(field, &request.raw_values, &NumericOperand),
        DeclaredType::Date => ordered_intents(
            field,
            &request.raw_values,
            &DateOperand::new(config.timestamps),
        ),
        DeclaredType::String | DeclaredType::Object | DeclaredType::Array => {
            translate_text(field, request.declared_type, &request.raw_values)
        }
    }
}

fn ordered_intents<P: OperandParser>(
    field: &str,
    raw_values: &[String],
    parser: &P,
) -> Result<Vec<PredicateIntent>> {
    Ok(translate_ordered(field, raw_values, parser)?
        .into_iter()
        .collect())
}
