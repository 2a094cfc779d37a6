// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for record normalization.

/// Errors raised while turning a raw pump record into a canonical event.
///
/// Every variant is fatal for the single record being parsed. The caller
/// decides whether to skip that record or abort the sync run.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed timestamp {value:?}: {reason}")]
    MalformedTimestamp { value: String, reason: String },

    #[error("Local time {value} does not exist in {zone}")]
    NonexistentLocalTime { value: String, zone: String },

    #[error("Unknown CIQ activity event type: {0}")]
    UnknownActivityEvent(i64),

    #[error("Unknown basal suspension event type: {0:?}")]
    UnknownBasalSuspensionEvent(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid {kind} record: {source}")]
    InvalidRecord {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    pub(crate) fn malformed(value: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedTimestamp {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the vendor sent a code outside one of the closed vocabularies.
    pub fn is_unknown_code(&self) -> bool {
        matches!(
            self,
            ParseError::UnknownActivityEvent(_) | ParseError::UnknownBasalSuspensionEvent(_)
        )
    }
}

/// Result type alias for parsers
pub type Result<T> = std::result::Result<T, ParseError>;
