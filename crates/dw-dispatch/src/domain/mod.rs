//! Domain Layer - correlation and classification logic
//!
//! This layer contains:
//! - Correlation tokens and their generator
//! - The pending-call registry
//! - Inbound message classification
//! - Notification debounce / status dedup
//! - The DataWedge command vocabulary and typed profile builders
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - Time is passed in, never read

pub mod classifier;
pub mod command;
pub mod config;
pub mod correlation;
pub mod debounce;
pub mod pending;
pub mod profile;
pub mod vocabulary;

pub use classifier::{ClassifiedEvent, EventClassifier, UnrecognizedReason};
pub use command::{CommandOutcome, OutboundCommand};
pub use config::DispatchConfig;
pub use correlation::{
    CorrelationToken, RandomTokenSource, TokenSource, DEFAULT_TOKEN_LENGTH, MIN_TOKEN_LENGTH,
};
pub use debounce::{Admission, StatusDebouncer, DEFAULT_STATUS_DEBOUNCE};
pub use pending::{PendingCallRegistry, PendingCommand, RegistryStats, RegistryStatsSnapshot};
pub use profile::{AppEntry, BarcodeParameters, ConfigMode, Decoder, IntentParameters, ProfileConfig};
pub use vocabulary::{CommandKind, PluginAction, ResultPolicy};
