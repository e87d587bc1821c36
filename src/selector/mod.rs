//! Endpoint selection subsystem.
//!
//! # Data Flow
//! ```text
//! store (saved record) + localnet (discovered addresses)
//!     → candidates (ordered plan)
//!     → probe (sequential, short-circuiting)
//!     → store (selected endpoint or unreachable mark)
//! ```
//!
//! # Design Decisions
//! - Worst case is bounded: candidates × probe timeout
//! - The first candidate in priority order that works is chosen, not the
//!   fastest to respond

pub mod cycle;

pub use cycle::{CycleReport, DiscoveryOutcome, Selector};
