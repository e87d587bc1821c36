//! Candidate generation subsystem.
//!
//! # Data Flow
//! ```text
//! frontend origin + saved record + discovered addresses
//!     → generator.rs (ordering policy, dedup, escape hatch)
//!     → CandidatePlan
//!     → selector (sequential probing)
//! ```
//!
//! # Design Decisions
//! - Candidates are ephemeral, generated fresh per cycle, never persisted
//! - Normalization happens at the type boundary: a Candidate that exists
//!   is a valid bare http(s) origin

pub mod candidate;
pub mod generator;
pub mod origin;

pub use candidate::{Candidate, InvalidEndpoint};
pub use generator::{CandidateGenerator, CandidatePlan};
pub use origin::Origin;
