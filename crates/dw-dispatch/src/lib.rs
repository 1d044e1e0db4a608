//! # DataWedge Dispatch
//!
//! Command correlation and event dispatch over the one-way DataWedge intent
//! bus. DataWedge accepts fire-and-forget commands and answers, maybe, on a
//! separate broadcast topic. This crate pairs each answer with the command
//! that caused it and routes everything else to typed event streams.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): no I/O, time passed in
//!   - `CorrelationToken` / `RandomTokenSource`: command identifiers
//!   - `PendingCallRegistry`: token → one-shot completion
//!   - `EventClassifier`: topic routing of inbound messages
//!   - `StatusDebouncer`: notification time gate and status dedup
//!   - `vocabulary`: wire keys, host operations, result policies
//!   - `profile`: typed `SET_CONFIG` builders
//!   - `DispatchConfig`: configuration with validation
//!
//! - **Codec** (`codec`): bundles ↔ typed records
//!
//! - **Ports Layer** (`ports/`): `InboundHandler`, `Transport`, `EventSink`,
//!   `Clock`
//!
//! - **Service Layer**: `DispatchFacade` (`send_command`,
//!   `on_inbound_message`, `shutdown`) and `ScannerApi` (typed operations)
//!
//! - **Adapters Layer** (`adapters/`): channel sink, bus pump, expiry sweep
//!
//! ## Guarantees
//!
//! - A `PendingCommand` completes at most once, and only with the result
//!   that echoed its own token.
//! - A result whose token matches nothing is logged and dropped.
//! - Unsolicited events never touch the registry.
//! - Nothing on the inbound path returns an error to the transport.
//!
//! ## Usage Example
//!
//! ```ignore
//! let bus = Arc::new(InMemoryBus::new());
//! let (sink, mut events) = ChannelEventSink::new(64);
//! let facade = Arc::new(DispatchFacade::new(
//!     DispatchConfig::for_package("com.example.inventory"),
//!     bus.clone(),
//!     Arc::new(sink),
//! )?);
//!
//! let subscription = bus.subscribe(TopicFilter::topics(facade.inbound_topics()));
//! spawn_pump(facade.clone(), subscription);
//! spawn_expiry_sweep(facade.clone(), facade.config().sweep_interval);
//!
//! let api = ScannerApi::new(facade);
//! api.create_profile("Inventory").await?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod api;
pub mod codec;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{spawn_expiry_sweep, spawn_pump, ChannelEventSink};
pub use api::ScannerApi;
pub use domain::{
    AppEntry, BarcodeParameters, CommandKind, CommandOutcome, ConfigMode, CorrelationToken,
    Decoder, DispatchConfig, IntentParameters, OutboundCommand, PendingCommand, ProfileConfig,
};
pub use error::{CommandError, ConfigError, ProfileError, RegistryError};
pub use metrics::DispatchStatsSnapshot;
pub use ports::{Clock, EventSink, InboundHandler, ManualClock, SystemClock, UnsolicitedEvent};
pub use service::DispatchFacade;
