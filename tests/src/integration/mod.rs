//! # Integration Tests
//!
//! Every test here runs the full path:
//!
//! ```text
//! caller ─▶ DispatchFacade ─▶ InMemoryBus ─▶ SimulatedDataWedge
//!                ▲                                   │
//!                └──── pump ◀── InMemoryBus ◀────────┘
//! ```

pub mod correlation;
pub mod events;
pub mod lifecycle;
