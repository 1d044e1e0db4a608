//! # DataWedge Bridge Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── simulator.rs      # Scripted stand-in for DataWedge on the in-memory bus
//! └── integration/      # End-to-end flows through bus, pump and facade
//!     ├── correlation.rs
//!     ├── events.rs
//!     └── lifecycle.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p dw-tests
//!
//! # By category
//! cargo test -p dw-tests integration::correlation::
//! cargo test -p dw-tests integration::events::
//! ```

pub mod integration;
pub mod simulator;

pub use simulator::{Bridge, SimulatedDataWedge};
