//! Subscription schedule model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Schedule status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    NotStarted,
    Active,
    Completed,
    Released,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// What happens once the last phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Detach into a plain subscription.
    Release,
    Cancel,
    None,
    Renew,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionSchedule {
    pub id: String,
    pub object: String,
    pub status: ScheduleStatus,
    pub customer: Option<String>,
    /// Managed subscription. Cleared once the schedule is released.
    pub subscription: Option<String>,
    pub end_behavior: EndBehavior,
    #[serde(default)]
    pub phases: Vec<SchedulePhase>,
    pub current_phase: Option<CurrentPhase>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub released_at: Option<i64>,
    pub released_subscription: Option<String>,
    pub created: i64,
    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulePhase {
    pub start_date: i64,
    pub end_date: Option<i64>,
    #[serde(default)]
    pub items: Vec<PhaseItem>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub coupon: Option<String>,
    pub default_payment_method: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhaseItem {
    pub price: String,
    pub quantity: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CurrentPhase {
    pub start_date: i64,
    pub end_date: i64,
}
