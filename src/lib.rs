//! Backend endpoint discovery for the membership client.

pub mod candidates;
pub mod client;
pub mod config;
pub mod localnet;
pub mod probe;
pub mod selector;
pub mod status;
pub mod store;

pub use config::DiscoveryConfig;
pub use selector::{DiscoveryOutcome, Selector};
pub use status::StatusReporter;
pub use store::EndpointStore;
