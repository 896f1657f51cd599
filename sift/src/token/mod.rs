//! Token classifier for query-string filter values.
//!
//! # Syntax Overview
//!
//! - **Range**: two values, the first prefixed with `=>=<` (`=>=<10`, `20`)
//! - **Set**: two or more values, taken literally
//! - **Single token**: `<=v`, `>=v`, `!=v`, `<v`, `>v`, `-v`, `v`
//! - **Null keyword**: `null` (any case), negated by `!=` or `-`

mod classifier;

pub use classifier::{
    classify, parse_operand, split, Classification, Operator, ParsedOperand, RangeRequest,
    SetRequest, Shape, RANGE_MARKER,
};
