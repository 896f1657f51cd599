//! Filter requests as collected by the routing layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Declared storage type of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    Numeric,
    Date,
    String,
    Object,
    Array,
}

impl DeclaredType {
    /// Whether the type is filtered through the ordered (SQL) path.
    pub fn is_ordered(self) -> bool {
        matches!(self, DeclaredType::Numeric | DeclaredType::Date)
    }
}

impl FromStr for DeclaredType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "numeric" | "number" => Ok(DeclaredType::Numeric),
            "date" => Ok(DeclaredType::Date),
            "string" => Ok(DeclaredType::String),
            "object" => Ok(DeclaredType::Object),
            "array" => Ok(DeclaredType::Array),
            _ => Err(Error::UnknownType(s.to_string())),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Numeric => write!(f, "numeric"),
            DeclaredType::Date => write!(f, "date"),
            DeclaredType::String => write!(f, "string"),
            DeclaredType::Object => write!(f, "object"),
            DeclaredType::Array => write!(f, "array"),
        }
    }
}

/// One field's worth of raw filter tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    /// Field (column or document path) the filter applies to
    pub field: String,
    /// Declared type of the field
    pub declared_type: DeclaredType,
    /// Raw tokens in the order they appeared in the query string
    pub raw_values: Vec<String>,
}

impl FilterRequest {
    pub fn new<I, S>(field: impl Into<String>, declared_type: DeclaredType, raw_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            declared_type,
            raw_values: raw_values.into_iter().map(Into::into).collect(),
        }
    }

    /// Fail fast on a missing field name.
    pub(crate) fn check_field(&self) -> Result<()> {
        if self.field.trim().is_empty() {
            return Err(Error::MissingField);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_from_str() {
        assert_eq!("numeric".parse::<DeclaredType>().unwrap(), DeclaredType::Numeric);
        assert_eq!("DATE".parse::<DeclaredType>().unwrap(), DeclaredType::Date);
        assert_eq!("array".parse::<DeclaredType>().unwrap(), DeclaredType::Array);
        assert!(matches!(
            "blob".parse::<DeclaredType>(),
            Err(Error::UnknownType(t)) if t == "blob"
        ));
    }

    #[test]
    fn test_declared_type_display_round_trips() {
        for ty in [
            DeclaredType::Numeric,
            DeclaredType::Date,
            DeclaredType::String,
            DeclaredType::Object,
            DeclaredType::Array,
        ] {
            assert_eq!(ty.to_string().parse::<DeclaredType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let req = FilterRequest::new("  ", DeclaredType::String, ["x"]);
        assert!(matches!(req.check_field(), Err(Error::MissingField)));
    }
}
