//! Billing operations, one module per Stripe resource.
//!
//! Each operation is an inherent method on [`StripeClient`](crate::StripeClient)
//! taking the caller's secret key per call.

pub mod customers;
pub mod products;
pub mod schedules;
pub mod subscriptions;

pub use customers::{customer_address, full_name, CreateCustomerParams, ModifyCustomerParams};
pub use products::{
    price_data, to_cents, CreateProductParams, ModifyProductParams, PriceData, PriceDataParams,
};
pub use schedules::UpdateScheduleParams;
pub use subscriptions::{CreateSubscriptionParams, UpdateSubscriptionParams};

use crate::error::{Operation, StripeError};
use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

/// Reject a blank secret key or a blank required id before any network call.
pub(crate) fn require(
    operation: Operation,
    api_key: &SecretString,
    values: &[&str],
) -> Result<(), StripeError> {
    let blank_key = api_key.expose_secret().trim().is_empty();
    if blank_key || values.iter().any(|v| v.trim().is_empty()) {
        tracing::warn!(method = %operation, "Rejected request with missing parameters");
        return Err(StripeError::bad_request(operation));
    }
    Ok(())
}

pub(crate) fn validate<T: Validate>(operation: Operation, params: &T) -> Result<(), StripeError> {
    params.validate().map_err(|e| {
        tracing::warn!(method = %operation, error = %e, "Rejected request with invalid parameters");
        StripeError::invalid_params(operation, e)
    })
}
