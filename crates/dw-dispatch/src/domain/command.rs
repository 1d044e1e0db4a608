//! Outbound commands and their decoded outcomes.

use super::correlation::CorrelationToken;
use super::vocabulary::{extras, CommandKind, RESULT_SUCCESS};
use dw_types::{Bundle, BundleValue};

/// A command ready to be sent.
///
/// The bus carries either a flat string argument or a structured bundle.
/// Other value shapes can be constructed but are refused by the codec and
/// reported through the command's completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCommand {
    pub kind: CommandKind,
    pub payload: BundleValue,
}

impl OutboundCommand {
    pub fn new(kind: CommandKind, payload: impl Into<BundleValue>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    /// Command with a flat string argument.
    pub fn text(kind: CommandKind, argument: impl Into<String>) -> Self {
        Self::new(kind, BundleValue::String(argument.into()))
    }

    /// Command with a structured argument.
    pub fn structured(kind: CommandKind, argument: Bundle) -> Self {
        Self::new(kind, BundleValue::Bundle(argument))
    }
}

/// A command result as reported on the result topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Echoed command name (`UNKNOWN_COMMAND` when missing).
    pub command_name: String,
    /// Echoed correlation token (empty when missing).
    pub token: CorrelationToken,
    /// Raw vendor result code (`UNKNOWN_RESULT` when missing).
    pub raw_result_code: String,
    /// Every extra of the result message.
    pub payload: Bundle,
}

impl CommandOutcome {
    /// Whether the vendor reported plain `SUCCESS`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.raw_result_code == RESULT_SUCCESS
    }

    /// Vendor detail bundle, when present.
    #[must_use]
    pub fn result_info(&self) -> Option<&Bundle> {
        self.payload.get_bundle(extras::RESULT_INFO)
    }
}
