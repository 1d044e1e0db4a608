//! # Error Types
//!
//! Decode failures for a single inbound payload. A `DecodeError` always
//! aborts processing of exactly one message and nothing else.

use thiserror::Error;

/// Why an inbound payload could not be mapped onto a domain record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Scan source outside the fixed lookup table.
    #[error("Unknown scan source: {0}")]
    UnknownSource(String),

    /// Decode mode outside the fixed lookup table.
    #[error("Unknown decode mode: {0}")]
    UnknownDecodeMode(String),

    /// Scanner status string that is not a known state.
    #[error("Unknown scanner state: {0}")]
    UnknownScannerState(String),

    /// A required field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field is present with an unexpected value shape.
    #[error("Field {field} has type {found}, expected {expected}")]
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
