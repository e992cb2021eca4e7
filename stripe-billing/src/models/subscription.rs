use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Incomplete,
    IncompleteExpired,
    Trialing,
    Active,
    PastDue,
    Canceled,
    Unpaid,
    Paused,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Subscription {
    pub id: String,
    pub object: String,
    pub customer: String,
    pub status: SubscriptionStatus,
    /// Attached schedule id, when the subscription is schedule-managed.
    pub schedule: Option<String>,
    pub current_period_start: Option<i64>,
    pub current_period_end: Option<i64>,
    pub plan: Option<Plan>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
    pub currency: Option<String>,
    pub default_payment_method: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Id, or the expanded invoice with its payment intent.
    pub latest_invoice: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Plan {
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromotionCode {
    pub id: String,
    pub code: Option<String>,
    pub coupon: Coupon,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Coupon {
    pub id: String,
    pub percent_off: Option<f64>,
    pub amount_off: Option<i64>,
}
