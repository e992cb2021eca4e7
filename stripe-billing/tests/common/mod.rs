#![allow(dead_code)]

use secrecy::SecretString;
use serde_json::{json, Value};
use stripe_billing::{StripeClient, StripeConfig};
use wiremock::MockServer;

pub const TEST_SECRET_KEY: &str = "sk_test_123";
pub const TEST_AUTH_HEADER: &str = "Bearer sk_test_123";

pub struct TestStripe {
    pub server: MockServer,
    pub client: StripeClient,
    pub api_key: SecretString,
}

impl TestStripe {
    pub async fn spawn() -> Self {
        // Only the first test in each binary installs the subscriber.
        let _ = service_core::observability::init_tracing("stripe-billing-test", "debug", false);

        let server = MockServer::start().await;
        let client = StripeClient::new(StripeConfig::with_base_url(server.uri()))
            .expect("Failed to build Stripe client");

        Self {
            server,
            client,
            api_key: SecretString::new(TEST_SECRET_KEY.to_string()),
        }
    }

    /// Decoded form bodies of every request received for `method` + `path`.
    pub async fn form_bodies(&self, method: &str, path: &str) -> Vec<Vec<(String, String)>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.to_string() == method && request.url.path() == path)
            .map(|request| {
                serde_urlencoded::from_bytes(&request.body).expect("Failed to decode form body")
            })
            .collect()
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

pub fn form_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn stripe_error(error_type: &str, message: &str) -> Value {
    json!({
        "error": {
            "type": error_type,
            "message": message
        }
    })
}

pub fn schedule_json(id: &str, status: &str, subscription: Option<&str>) -> Value {
    json!({
        "id": id,
        "object": "subscription_schedule",
        "status": status,
        "customer": "cus_123",
        "subscription": subscription,
        "end_behavior": "release",
        "phases": [],
        "current_phase": null,
        "metadata": {},
        "released_at": null,
        "released_subscription": null,
        "created": 1_700_000_000,
        "livemode": false
    })
}

pub fn subscription_json(id: &str, schedule: Option<&str>, current_period_end: i64) -> Value {
    json!({
        "id": id,
        "object": "subscription",
        "customer": "cus_123",
        "status": "active",
        "schedule": schedule,
        "current_period_start": current_period_end - 2_592_000,
        "current_period_end": current_period_end,
        "plan": {"id": "price_basic", "amount": 1000, "currency": "usd", "interval": "month"},
        "cancel_at_period_end": false,
        "currency": "usd",
        "default_payment_method": null,
        "description": null,
        "metadata": {},
        "latest_invoice": "in_123"
    })
}

pub fn customer_json(id: &str) -> Value {
    json!({
        "id": id,
        "object": "customer",
        "email": "ada@example.com",
        "name": "Ada Lovelace",
        "phone": null,
        "description": null,
        "address": null,
        "invoice_settings": {"default_payment_method": null},
        "metadata": {},
        "created": 1_700_000_000
    })
}

pub fn product_json(id: &str, active: bool) -> Value {
    json!({
        "id": id,
        "object": "product",
        "name": "Pro plan",
        "description": null,
        "active": active,
        "default_price": "price_pro",
        "metadata": {},
        "created": 1_700_000_000
    })
}

pub fn deleted_json(id: &str, object: &str) -> Value {
    json!({"id": id, "object": object, "deleted": true})
}
