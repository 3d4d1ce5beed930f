//! Load-time errors.
//!
//! Any of these aborts graph construction. Resolution never produces them:
//! an unresolvable token is an empty result, not an error.

/// Errors raised while building a [`crate::core::Dsdb`] from a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to parse DSDB document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid DSDB format: \"system\" root object not found")]
    MissingSystem,

    #[error("Value '{name}' must carry exactly one payload, found {}", describe_payload(.found))]
    PayloadCount { name: String, found: Vec<String> },

    #[error("Value '{name}' has an invalid payload: {source}")]
    InvalidValue {
        name: String,
        source: serde_json::Error,
    },

    #[error("Contextual reference tree refers to unknown token '{token}'")]
    UnknownToken { token: String },

    #[error("Reference tree of token '{token}' refers to unknown value '{value}'")]
    UnknownValue { token: String, value: String },

    #[error("Reference of token '{token}' requires unknown context tag '{tag}'")]
    UnknownTag { token: String, tag: String },
}

/// Errors raised while applying a context selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("Unknown context dimension '{0}'")]
    UnknownDimension(String),

    #[error("Context dimension '{dimension}' has no tag '{tag}'")]
    UnknownTag { dimension: String, tag: String },
}

fn describe_payload(found: &[String]) -> String {
    if found.is_empty() {
        "none".to_string()
    } else {
        found.join(", ")
    }
}
