//! # DataWedge Types
//!
//! Shared vocabulary of the bridge:
//!
//! - [`Bundle`]: the associative payload carried by every intent on the bus.
//! - Scanner domain records: [`ScanEvent`], [`StatusChangeEvent`],
//!   [`ScannerState`] and friends.
//! - [`DecodeError`]: why a single inbound payload could not be turned into
//!   a domain record.
//!
//! Nothing here performs I/O. Decoding rules that pick a variant from a raw
//! vendor string live next to the enum they produce (`FromStr`-style
//! `parse` constructors) so every closed set has exactly one mapping table.

pub mod bundle;
pub mod entities;
pub mod errors;

pub use bundle::{Bundle, BundleValue};
pub use entities::*;
pub use errors::*;
