//! Local network address discovery subsystem.
//!
//! # Design Decisions
//! - The capability sits behind a trait; business logic never branches on
//!   runtime feature detection
//! - Purely advisory input to the candidate generator: zero addresses is a
//!   normal outcome
//! - Bounded by its own ceiling, independent of the probe timeout

pub mod discoverer;
pub mod netif;

pub use discoverer::{AddressDiscoverer, DiscoveredAddress, NoopDiscoverer};
pub use netif::NetifDiscoverer;
