//! Stripe billing bindings.
//!
//! Every operation follows one flow: validate the parameters locally, make a
//! single Stripe API call, and map any failure onto [`StripeError`]. Results
//! are wrapped in [`ApiResponse`] with a human-readable message.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod services;

pub use client::{StripeClient, VendorError, VendorErrorKind};
pub use config::StripeConfig;
pub use error::{ErrorCode, Operation, StripeError};
pub use models::ApiResponse;
pub use secrecy::SecretString;
