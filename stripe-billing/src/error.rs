//! Error taxonomy for the Stripe bindings.
//!
//! Three tagged variants stand in for the bad-request, vendor and generic
//! failure classes. Each carries a fixed [`ErrorCode`], the [`Operation`]
//! that raised it, and the underlying cause where there is one.

use crate::client::VendorError;
use std::fmt;
use thiserror::Error;

pub const BAD_REQUEST_MESSAGE: &str = "Invalid or missing request parameters.";
pub const STRIPE_INVALID_REQUEST_MESSAGE: &str = "Stripe rejected the request as invalid.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    StripeBadRequest,
    StripeInvalidRequest,
    StripeGeneric,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::StripeBadRequest => "STRIPE_BAD_REQUEST",
            ErrorCode::StripeInvalidRequest => "STRIPE_INVALID_REQUEST",
            ErrorCode::StripeGeneric => "STRIPE_GENERIC",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The public operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateSubscriptionSchedule,
    UpdateSubscriptionSchedule,
    ReleaseSubscriptionSchedule,
    RetrieveSubscriptionSchedule,
    CreateSubscription,
    UpdateSubscription,
    CancelSubscription,
    RetrieveSubscription,
    CreateCustomer,
    ModifyCustomer,
    DeleteCustomer,
    CreateProduct,
    ModifyProduct,
    RetrieveProduct,
    DeleteProduct,
    PriceData,
}

impl Operation {
    pub fn method_name(&self) -> &'static str {
        match self {
            Operation::CreateSubscriptionSchedule => "create_stripe_subscription_schedule",
            Operation::UpdateSubscriptionSchedule => "update_stripe_subscription_schedule",
            Operation::ReleaseSubscriptionSchedule => "release_stripe_subscription_schedule",
            Operation::RetrieveSubscriptionSchedule => "retrieve_stripe_subscription_schedule",
            Operation::CreateSubscription => "create_stripe_subscription",
            Operation::UpdateSubscription => "update_stripe_subscription",
            Operation::CancelSubscription => "cancel_stripe_subscription",
            Operation::RetrieveSubscription => "retrieve_stripe_subscription",
            Operation::CreateCustomer => "create_stripe_customer",
            Operation::ModifyCustomer => "modify_stripe_customer",
            Operation::DeleteCustomer => "delete_stripe_customer",
            Operation::CreateProduct => "create_stripe_product",
            Operation::ModifyProduct => "modify_stripe_product",
            Operation::RetrieveProduct => "retrieve_stripe_product",
            Operation::DeleteProduct => "delete_stripe_product",
            Operation::PriceData => "get_price_data",
        }
    }

    /// Code attached when Stripe reports an invalid request.
    ///
    /// Schedule creation and release report these as plain bad requests;
    /// every other operation keeps the dedicated invalid-request code.
    pub fn invalid_request_code(&self) -> ErrorCode {
        match self {
            Operation::CreateSubscriptionSchedule | Operation::ReleaseSubscriptionSchedule => {
                ErrorCode::StripeBadRequest
            }
            _ => ErrorCode::StripeInvalidRequest,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("Bad request in {method} [{code}]: {detail}")]
    BadRequest {
        detail: String,
        code: ErrorCode,
        method: Operation,
        #[source]
        source: Option<VendorError>,
    },

    #[error("Stripe error in {method} [{code}]: {source}")]
    Stripe {
        code: ErrorCode,
        method: Operation,
        #[source]
        source: VendorError,
    },

    #[error("Unexpected error in {method} [{code}]: {source}")]
    Generic {
        code: ErrorCode,
        method: Operation,
        #[source]
        source: anyhow::Error,
    },
}

impl StripeError {
    /// Local validation failure. Raised before any network call.
    pub fn bad_request(method: Operation) -> Self {
        Self::bad_request_with(method, BAD_REQUEST_MESSAGE)
    }

    pub fn bad_request_with(method: Operation, detail: impl Into<String>) -> Self {
        StripeError::BadRequest {
            detail: detail.into(),
            code: ErrorCode::StripeBadRequest,
            method,
            source: None,
        }
    }

    pub fn invalid_params(method: Operation, err: validator::ValidationErrors) -> Self {
        Self::bad_request_with(method, format!("{} {}", BAD_REQUEST_MESSAGE, err))
    }

    pub fn generic(method: Operation, source: impl Into<anyhow::Error>) -> Self {
        StripeError::Generic {
            code: ErrorCode::StripeGeneric,
            method,
            source: source.into(),
        }
    }

    /// Map a vendor failure: invalid requests become bad requests, the rest
    /// collapse into the vendor variant.
    pub fn from_vendor(method: Operation, source: VendorError) -> Self {
        if source.is_invalid_request() {
            StripeError::BadRequest {
                detail: STRIPE_INVALID_REQUEST_MESSAGE.to_string(),
                code: method.invalid_request_code(),
                method,
                source: Some(source),
            }
        } else {
            StripeError::Stripe {
                code: ErrorCode::StripeGeneric,
                method,
                source,
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StripeError::BadRequest { code, .. }
            | StripeError::Stripe { code, .. }
            | StripeError::Generic { code, .. } => *code,
        }
    }

    pub fn method(&self) -> Operation {
        match self {
            StripeError::BadRequest { method, .. }
            | StripeError::Stripe { method, .. }
            | StripeError::Generic { method, .. } => *method,
        }
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, StripeError::BadRequest { .. })
    }

    /// The vendor error behind this failure, if Stripe produced one.
    pub fn vendor(&self) -> Option<&VendorError> {
        match self {
            StripeError::BadRequest { source, .. } => source.as_ref(),
            StripeError::Stripe { source, .. } => Some(source),
            StripeError::Generic { .. } => None,
        }
    }
}
