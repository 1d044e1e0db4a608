//! Error types for the dispatch engine

use dw_bus::TransportError;
use thiserror::Error;

/// Failure of a single command, delivered through its `PendingCommand`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The transport refused the outgoing message.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The command payload has a shape the bus cannot carry.
    #[error("Unsupported payload type for {command}: {found}")]
    UnsupportedPayload {
        command: &'static str,
        found: &'static str,
    },

    /// DataWedge answered, and the answer was a failure code.
    #[error("{command} failed: {code}")]
    Vendor { command: String, code: String },

    /// The pending call was discarded (shutdown or expiry) without a result.
    #[error("Command abandoned before a result arrived")]
    Abandoned,

    /// The dispatcher has been shut down.
    #[error("Dispatcher closed")]
    Closed,

    /// The command argument was rejected before sending.
    #[error("Invalid profile configuration: {0}")]
    InvalidProfile(#[from] ProfileError),

    /// No free correlation token could be generated.
    #[error("Could not allocate a unique correlation token after {attempts} attempts")]
    TokenExhausted { attempts: u32 },
}

impl CommandError {
    /// The vendor's raw result code, if this is a vendor failure.
    #[must_use]
    pub fn vendor_code(&self) -> Option<&str> {
        match self {
            Self::Vendor { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Errors from the pending-call registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Correlation token already pending: {0}")]
    DuplicateToken(String),
}

/// Invalid dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Token length {length} is below the minimum of {min}")]
    TokenTooShort { length: usize, min: usize },

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Package name cannot be empty")]
    EmptyPackageName,

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Invalid profile configuration, rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Profile name cannot be empty")]
    EmptyProfileName,

    #[error("App entry package name cannot be empty")]
    EmptyPackageName,

    #[error("Intent action cannot be empty")]
    EmptyIntentAction,
}
