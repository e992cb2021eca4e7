//! Subscription schedule operations.
//!
//! A rewrite always submits exactly two phases: the current billing period,
//! closed with explicit dates and the current price, followed by an
//! open-ended phase carrying the new price. The list replaces the schedule's
//! phases wholesale, and `end_behavior=release` hands the subscription back
//! as a plain subscription once the last phase completes.

use crate::client::{segment, StripeClient};
use crate::error::{Operation, StripeError};
use crate::models::{ApiResponse, EndBehavior, SubscriptionSchedule};
use crate::services::{require, validate};
use secrecy::SecretString;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;
use validator::Validate;

pub const SCHEDULE_CREATED_MESSAGE: &str = "Subscription schedule created successfully.";
pub const SCHEDULE_MODIFIED_MESSAGE: &str = "Subscription Schedule modified successfully.";
pub const SCHEDULE_RELEASED_MESSAGE: &str = "Subscription schedule released successfully.";
pub const SCHEDULE_RETRIEVED_MESSAGE: &str = "Subscription schedule retrieved successfully.";

/// Parameters for rewriting a schedule's phases.
#[derive(Debug, Clone, Validate)]
pub struct UpdateScheduleParams {
    #[validate(length(min = 1))]
    pub schedule_id: String,
    /// Epoch seconds.
    pub current_phase_start_dt: i64,
    /// Epoch seconds. Must be after the start.
    pub current_phase_end_dt: i64,
    #[validate(length(min = 1))]
    pub current_price_id: String,
    /// Price for the next phase. Defaults to the current price.
    #[validate(length(min = 1))]
    pub new_price_id: Option<String>,
    pub coupon: Option<String>,
    pub default_payment_method: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub description: Option<String>,
}

impl UpdateScheduleParams {
    pub fn new(
        schedule_id: impl Into<String>,
        current_phase_start_dt: i64,
        current_phase_end_dt: i64,
        current_price_id: impl Into<String>,
    ) -> Self {
        Self {
            schedule_id: schedule_id.into(),
            current_phase_start_dt,
            current_phase_end_dt,
            current_price_id: current_price_id.into(),
            new_price_id: None,
            coupon: None,
            default_payment_method: None,
            metadata: None,
            description: None,
        }
    }

    pub fn next_price_id(&self) -> &str {
        self.new_price_id.as_deref().unwrap_or(&self.current_price_id)
    }
}

#[derive(Serialize)]
struct FromSubscription<'a> {
    from_subscription: &'a str,
}

#[derive(Debug, Serialize)]
struct PhaseRewrite<'a> {
    end_behavior: EndBehavior,
    phases: [PhaseParams<'a>; 2],
}

#[derive(Debug, Serialize)]
struct PhaseParams<'a> {
    start_date: Option<i64>,
    end_date: Option<i64>,
    items: [PhaseItemParams<'a>; 1],
    metadata: Option<&'a BTreeMap<String, String>>,
    coupon: Option<&'a str>,
    default_payment_method: Option<&'a str>,
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PhaseItemParams<'a> {
    price: &'a str,
}

impl<'a> PhaseRewrite<'a> {
    fn new(params: &'a UpdateScheduleParams) -> Self {
        let current = PhaseParams {
            start_date: Some(params.current_phase_start_dt),
            end_date: Some(params.current_phase_end_dt),
            items: [PhaseItemParams {
                price: &params.current_price_id,
            }],
            metadata: None,
            coupon: None,
            default_payment_method: None,
            description: None,
        };

        let next = PhaseParams {
            start_date: None,
            end_date: None,
            items: [PhaseItemParams {
                price: params.next_price_id(),
            }],
            metadata: params.metadata.as_ref(),
            coupon: params.coupon.as_deref(),
            default_payment_method: params.default_payment_method.as_deref(),
            description: params.description.as_deref(),
        };

        Self {
            end_behavior: EndBehavior::Release,
            phases: [current, next],
        }
    }
}

impl StripeClient {
    /// Convert an existing subscription into a schedule.
    #[instrument(skip(self, api_key), fields(method = "create_stripe_subscription_schedule"))]
    pub async fn create_subscription_schedule(
        &self,
        api_key: &SecretString,
        subscription_id: &str,
    ) -> Result<ApiResponse<SubscriptionSchedule>, StripeError> {
        let operation = Operation::CreateSubscriptionSchedule;
        require(operation, api_key, &[subscription_id])?;

        let schedule: SubscriptionSchedule = self
            .post(
                operation,
                api_key,
                "/v1/subscription_schedules",
                &FromSubscription {
                    from_subscription: subscription_id,
                },
            )
            .await?;

        tracing::info!(schedule_id = %schedule.id, subscription_id, "Subscription schedule created");
        Ok(ApiResponse::new(schedule, SCHEDULE_CREATED_MESSAGE))
    }

    /// Replace the schedule's phases with the current period and one
    /// open-ended phase on the new price.
    #[instrument(
        skip(self, api_key, params),
        fields(method = "update_stripe_subscription_schedule", schedule_id = %params.schedule_id)
    )]
    pub async fn update_subscription_schedule(
        &self,
        api_key: &SecretString,
        params: UpdateScheduleParams,
    ) -> Result<ApiResponse<SubscriptionSchedule>, StripeError> {
        let operation = Operation::UpdateSubscriptionSchedule;
        require(operation, api_key, &[&params.schedule_id, &params.current_price_id])?;
        validate(operation, &params)?;

        if params.current_phase_end_dt <= params.current_phase_start_dt {
            tracing::warn!(
                start = params.current_phase_start_dt,
                end = params.current_phase_end_dt,
                "Current phase ends before it starts"
            );
            return Err(StripeError::bad_request_with(
                operation,
                "Current phase end must be after its start.",
            ));
        }

        let path = format!("/v1/subscription_schedules/{}", segment(&params.schedule_id));
        let schedule: SubscriptionSchedule = self
            .post(operation, api_key, &path, &PhaseRewrite::new(&params))
            .await?;

        tracing::info!(
            schedule_id = %schedule.id,
            current_price = %params.current_price_id,
            next_price = %params.next_price_id(),
            "Subscription schedule phases rewritten"
        );
        Ok(ApiResponse::new(schedule, SCHEDULE_MODIFIED_MESSAGE))
    }

    /// Detach the schedule, leaving the subscription on its current terms.
    #[instrument(skip(self, api_key), fields(method = "release_stripe_subscription_schedule"))]
    pub async fn release_subscription_schedule(
        &self,
        api_key: &SecretString,
        schedule_id: &str,
    ) -> Result<ApiResponse<SubscriptionSchedule>, StripeError> {
        let operation = Operation::ReleaseSubscriptionSchedule;
        require(operation, api_key, &[schedule_id])?;

        let path = format!("/v1/subscription_schedules/{}/release", segment(schedule_id));
        let schedule: SubscriptionSchedule = self
            .post(operation, api_key, &path, &BTreeMap::<String, String>::new())
            .await?;

        tracing::info!(schedule_id = %schedule.id, "Subscription schedule released");
        Ok(ApiResponse::new(schedule, SCHEDULE_RELEASED_MESSAGE))
    }

    #[instrument(skip(self, api_key), fields(method = "retrieve_stripe_subscription_schedule"))]
    pub async fn retrieve_subscription_schedule(
        &self,
        api_key: &SecretString,
        schedule_id: &str,
    ) -> Result<ApiResponse<SubscriptionSchedule>, StripeError> {
        let operation = Operation::RetrieveSubscriptionSchedule;
        require(operation, api_key, &[schedule_id])?;

        let path = format!("/v1/subscription_schedules/{}", segment(schedule_id));
        let schedule = self.get(operation, api_key, &path).await?;

        Ok(ApiResponse::new(schedule, SCHEDULE_RETRIEVED_MESSAGE))
    }
}
