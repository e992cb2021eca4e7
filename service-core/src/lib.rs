//! service-core: Shared infrastructure for the billing and RPC client crates.
pub mod config;
pub mod error;
pub mod observability;

pub use serde;
pub use tracing;
