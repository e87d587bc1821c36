//! Reachability probing subsystem.
//!
//! # Design Decisions
//! - One probe checks one candidate; sequencing is the selector's job
//! - Every probe resolves (success or failure) by its deadline, so a hung
//!   candidate can never stall a cycle beyond its bound

pub mod http;
pub mod prober;

pub use http::HttpProber;
pub use prober::{Prober, ProbeResult};
