//! Correlation token for command/result matching.
//!
//! Tokens are generated client-side with no handshake: `length` characters
//! drawn from `[A-Za-z0-9]`. Uniqueness is probabilistic. With the default
//! 10 characters (62^10 combinations) and tens of outstanding calls a
//! collision is negligible, and the registry rejects the rare duplicate so
//! the facade can draw again.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// Default token length, matching what DataWedge clients customarily send.
pub const DEFAULT_TOKEN_LENGTH: usize = 10;

/// Shortest token the generator will produce.
pub const MIN_TOKEN_LENGTH: usize = 8;

/// Opaque identifier linking an outgoing command to its result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrelationToken(String);

impl CorrelationToken {
    /// Wrap a raw token (e.g. read from an inbound result).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty or whitespace (results without an id).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CorrelationToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for CorrelationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh correlation tokens.
pub trait TokenSource: Send + Sync {
    fn next_token(&self) -> CorrelationToken;
}

/// Random alphanumeric tokens from the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomTokenSource {
    length: usize,
}

impl RandomTokenSource {
    /// Create a generator; lengths below [`MIN_TOKEN_LENGTH`] are raised to it.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(MIN_TOKEN_LENGTH),
        }
    }

    /// Configured token length.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomTokenSource {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_LENGTH)
    }
}

impl TokenSource for RandomTokenSource {
    fn next_token(&self) -> CorrelationToken {
        let raw: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        CorrelationToken(raw)
    }
}
