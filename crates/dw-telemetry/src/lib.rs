//! # DataWedge Telemetry
//!
//! Structured logging for the bridge, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dw_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DW_SERVICE_NAME` | `datawedge-bridge` | Service name attached to startup log |
//! | `DW_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `DW_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `DW_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Subscriber(String),
}
