//! Error types for SIFT operations.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filter field name is empty")]
    MissingField,

    #[error("Unknown declared type: {0}")]
    UnknownType(String),

    #[error("Malformed token {token:?} for field {field}: {reason}")]
    MalformedToken {
        field: String,
        token: String,
        reason: &'static str,
    },

    #[error("Unparseable timestamp {value:?} for field {field}: {source}")]
    UnparseableTimestamp {
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{backend} backend cannot express {intent} predicates")]
    Unsupported {
        backend: &'static str,
        intent: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
