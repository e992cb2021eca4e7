//! Stripe objects returned by the billing operations.

mod customer;
mod product;
mod schedule;
mod subscription;

pub use customer::{Address, Customer, InvoiceSettings};
pub use product::Product;
pub use schedule::{
    CurrentPhase, EndBehavior, PhaseItem, SchedulePhase, ScheduleStatus, SubscriptionSchedule,
};
pub use subscription::{Coupon, Plan, PromotionCode, Subscription, SubscriptionStatus};

use serde::{Deserialize, Serialize};

/// Result envelope: the Stripe object plus a message for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// Body Stripe returns for `DELETE` requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeletedObject {
    pub id: String,
    pub object: String,
    #[serde(default)]
    pub deleted: bool,
}
