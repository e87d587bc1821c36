//! Endpoint record persistence subsystem.
//!
//! # Data Flow
//! ```text
//! selector / manual override
//!     → set (serialize whole record, temp file + rename, swap cache)
//!
//! HTTP client / status snapshot
//!     → get (lock-free read of the cached record)
//! ```
//!
//! # Design Decisions
//! - One record under one well-known path; no history
//! - Readers never observe a partially-written record
//! - Corrupt or missing storage means "no saved endpoint", not a crash

pub mod file;
pub mod record;

pub use file::{EndpointStore, StoreError};
pub use record::{now_unix, EndpointRecord};
