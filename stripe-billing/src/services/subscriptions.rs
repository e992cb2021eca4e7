//! Subscription operations.
//!
//! Price and coupon changes never touch the subscription directly. They go
//! through its schedule, so they take effect at the end of the current
//! billing period.

use crate::client::{segment, StripeClient};
use crate::error::{Operation, StripeError};
use crate::models::{ApiResponse, PromotionCode, Subscription};
use crate::services::schedules::UpdateScheduleParams;
use crate::services::{require, validate};
use anyhow::anyhow;
use secrecy::SecretString;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;
use validator::Validate;

pub const SUBSCRIPTION_CREATED_MESSAGE: &str = "Subscription created successfully.";
pub const SUBSCRIPTION_RETRIEVED_MESSAGE: &str = "Subscription retrieved successfully.";
pub const SUBSCRIPTION_UPDATED_MESSAGE: &str =
    "Subscription changes for upgrade/downgrade are applied at the end of your current billing cycle.";
pub const SUBSCRIPTION_CANCEL_SCHEDULED_MESSAGE: &str =
    "Subscription would be cancelled on end day of your billing period.";
pub const SUBSCRIPTION_CANCELLED_MESSAGE: &str = "Subscription cancelled.";

const LATEST_INVOICE_EXPAND: &str = "latest_invoice.payment_intent";

#[derive(Debug, Clone, Validate)]
pub struct CreateSubscriptionParams {
    #[validate(length(min = 1))]
    pub customer_id: String,
    #[validate(length(min = 1))]
    pub price_id: String,
    /// Three-letter ISO code, lowercase.
    #[validate(length(equal = 3))]
    pub currency: String,
    pub coupon: Option<String>,
    pub promo_code: Option<String>,
    pub cancel_at_period_end: bool,
    pub default_payment_method: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub description: Option<String>,
}

impl CreateSubscriptionParams {
    pub fn new(
        customer_id: impl Into<String>,
        price_id: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            price_id: price_id.into(),
            currency: currency.into(),
            coupon: None,
            promo_code: None,
            cancel_at_period_end: false,
            default_payment_method: None,
            metadata: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct UpdateSubscriptionParams {
    #[validate(length(min = 1))]
    pub subscription_id: String,
    #[validate(length(min = 1))]
    pub price_id: Option<String>,
    pub coupon: Option<String>,
    pub promo_code: Option<String>,
    pub default_payment_method: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub description: Option<String>,
}

impl UpdateSubscriptionParams {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            price_id: None,
            coupon: None,
            promo_code: None,
            default_payment_method: None,
            metadata: None,
            description: None,
        }
    }
}

#[derive(Serialize)]
struct PriceItem<'a> {
    price: &'a str,
}

#[derive(Serialize)]
struct CreateSubscriptionBody<'a> {
    customer: &'a str,
    items: [PriceItem<'a>; 1],
    currency: &'a str,
    coupon: Option<&'a str>,
    promotion_code: Option<&'a str>,
    cancel_at_period_end: bool,
    default_payment_method: Option<&'a str>,
    metadata: Option<&'a BTreeMap<String, String>>,
    description: Option<&'a str>,
    payment_behavior: &'static str,
    collection_method: &'static str,
    expand: [&'static str; 1],
}

#[derive(Serialize)]
struct ModifySubscriptionBody<'a> {
    metadata: Option<&'a BTreeMap<String, String>>,
    default_payment_method: Option<&'a str>,
    description: Option<&'a str>,
    expand: [&'static str; 1],
}

#[derive(Serialize)]
struct CancelAtPeriodEnd {
    cancel_at_period_end: bool,
}

impl StripeClient {
    /// Create a subscription. The first invoice is left incomplete until the
    /// payment intent under `latest_invoice` is confirmed.
    #[instrument(
        skip(self, api_key, params),
        fields(method = "create_stripe_subscription", customer_id = %params.customer_id)
    )]
    pub async fn create_subscription(
        &self,
        api_key: &SecretString,
        params: CreateSubscriptionParams,
    ) -> Result<ApiResponse<Subscription>, StripeError> {
        let operation = Operation::CreateSubscription;
        require(operation, api_key, &[&params.customer_id, &params.price_id])?;
        validate(operation, &params)?;

        let body = CreateSubscriptionBody {
            customer: &params.customer_id,
            items: [PriceItem {
                price: &params.price_id,
            }],
            currency: &params.currency,
            coupon: params.coupon.as_deref(),
            promotion_code: params.promo_code.as_deref(),
            cancel_at_period_end: params.cancel_at_period_end,
            default_payment_method: params.default_payment_method.as_deref(),
            metadata: params.metadata.as_ref(),
            description: params.description.as_deref(),
            payment_behavior: "default_incomplete",
            collection_method: "charge_automatically",
            expand: [LATEST_INVOICE_EXPAND],
        };

        let subscription: Subscription = self
            .post(operation, api_key, "/v1/subscriptions", &body)
            .await?;

        tracing::info!(
            subscription_id = %subscription.id,
            status = ?subscription.status,
            "Subscription created"
        );
        Ok(ApiResponse::new(subscription, SUBSCRIPTION_CREATED_MESSAGE))
    }

    #[instrument(skip(self, api_key), fields(method = "retrieve_stripe_subscription"))]
    pub async fn retrieve_subscription(
        &self,
        api_key: &SecretString,
        subscription_id: &str,
    ) -> Result<ApiResponse<Subscription>, StripeError> {
        let operation = Operation::RetrieveSubscription;
        require(operation, api_key, &[subscription_id])?;

        let path = format!("/v1/subscriptions/{}", segment(subscription_id));
        let subscription = self.get(operation, api_key, &path).await?;

        Ok(ApiResponse::new(subscription, SUBSCRIPTION_RETRIEVED_MESSAGE))
    }

    /// Apply changes at the end of the current billing period.
    ///
    /// A new price or coupon rewrites the subscription's schedule, creating
    /// one first if needed. A promotion code is resolved to its coupon when
    /// no coupon is given. Other changes modify the subscription in place.
    #[instrument(
        skip(self, api_key, params),
        fields(method = "update_stripe_subscription", subscription_id = %params.subscription_id)
    )]
    pub async fn update_subscription(
        &self,
        api_key: &SecretString,
        params: UpdateSubscriptionParams,
    ) -> Result<ApiResponse<Subscription>, StripeError> {
        let operation = Operation::UpdateSubscription;
        require(operation, api_key, &[&params.subscription_id])?;
        validate(operation, &params)?;

        let subscription = self
            .retrieve_subscription(api_key, &params.subscription_id)
            .await?
            .data;

        let coupon = match (&params.coupon, &params.promo_code) {
            (None, Some(promo_code)) => Some(
                self.promotion_code_coupon(operation, api_key, promo_code)
                    .await?,
            ),
            (coupon, _) => coupon.clone(),
        };

        let subscription = if params.price_id.is_some() || coupon.is_some() {
            let (start, end) = match (
                subscription.current_period_start,
                subscription.current_period_end,
            ) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(StripeError::generic(
                        operation,
                        anyhow!("subscription {} has no current billing period", subscription.id),
                    ))
                }
            };
            let current_price_id = subscription
                .plan
                .as_ref()
                .map(|plan| plan.id.clone())
                .ok_or_else(|| {
                    StripeError::generic(
                        operation,
                        anyhow!("subscription {} has no plan", subscription.id),
                    )
                })?;

            let schedule_id = match &subscription.schedule {
                Some(id) => id.clone(),
                None => {
                    self.create_subscription_schedule(api_key, &subscription.id)
                        .await?
                        .data
                        .id
                }
            };

            self.update_subscription_schedule(
                api_key,
                UpdateScheduleParams {
                    new_price_id: params.price_id.clone(),
                    coupon,
                    default_payment_method: params.default_payment_method.clone(),
                    metadata: params.metadata.clone(),
                    description: params.description.clone(),
                    ..UpdateScheduleParams::new(schedule_id, start, end, current_price_id)
                },
            )
            .await?;

            self.retrieve_subscription(api_key, &subscription.id)
                .await?
                .data
        } else {
            let path = format!("/v1/subscriptions/{}", segment(&subscription.id));
            let body = ModifySubscriptionBody {
                metadata: params.metadata.as_ref(),
                default_payment_method: params.default_payment_method.as_deref(),
                description: params.description.as_deref(),
                expand: [LATEST_INVOICE_EXPAND],
            };
            self.post(operation, api_key, &path, &body).await?
        };

        tracing::info!(subscription_id = %subscription.id, "Subscription updated");
        Ok(ApiResponse::new(subscription, SUBSCRIPTION_UPDATED_MESSAGE))
    }

    /// Cancel at the end of the current period, or immediately when the
    /// period has already ended. An attached schedule is released first.
    /// A subscription without a current period is left untouched.
    #[instrument(skip(self, api_key), fields(method = "cancel_stripe_subscription"))]
    pub async fn cancel_subscription(
        &self,
        api_key: &SecretString,
        subscription_id: &str,
    ) -> Result<ApiResponse<Subscription>, StripeError> {
        let operation = Operation::CancelSubscription;
        require(operation, api_key, &[subscription_id])?;

        let subscription = self
            .retrieve_subscription(api_key, subscription_id)
            .await?
            .data;

        let period_end = subscription.current_period_end.ok_or_else(|| {
            StripeError::generic(
                operation,
                anyhow!("subscription {} has no current billing period", subscription.id),
            )
        })?;

        if let Some(schedule_id) = &subscription.schedule {
            self.release_subscription_schedule(api_key, schedule_id)
                .await?;
        }

        let path = format!("/v1/subscriptions/{}", segment(subscription_id));

        if chrono::Utc::now().timestamp() < period_end {
            let subscription: Subscription = self
                .post(
                    operation,
                    api_key,
                    &path,
                    &CancelAtPeriodEnd {
                        cancel_at_period_end: true,
                    },
                )
                .await?;

            tracing::info!(subscription_id = %subscription.id, "Subscription set to cancel at period end");
            Ok(ApiResponse::new(subscription, SUBSCRIPTION_CANCEL_SCHEDULED_MESSAGE))
        } else {
            let subscription: Subscription = self.delete(operation, api_key, &path).await?;

            tracing::info!(subscription_id = %subscription.id, "Subscription cancelled");
            Ok(ApiResponse::new(subscription, SUBSCRIPTION_CANCELLED_MESSAGE))
        }
    }

    async fn promotion_code_coupon(
        &self,
        operation: Operation,
        api_key: &SecretString,
        promo_code: &str,
    ) -> Result<String, StripeError> {
        let path = format!("/v1/promotion_codes/{}", segment(promo_code));
        let promotion: PromotionCode = self.get(operation, api_key, &path).await?;
        Ok(promotion.coupon.id)
    }
}
