//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DiscoveryConfig (validated, immutable)
//!     → shared by the selector, prober, discoverer and store
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::DiscoveryConfig;
pub use schema::HostMapping;
pub use schema::{LocalNetConfig, ProbeConfig, RefreshConfig, StoreConfig};
