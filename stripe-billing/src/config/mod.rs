use serde::Deserialize;
use service_core::error::CoreError;

/// Stripe API settings, loaded from `stripe.{toml,yaml,json}` and `STRIPE_*`.
///
/// Holds no secret key; every operation takes one per call.
#[derive(Deserialize, Clone, Debug)]
pub struct StripeConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Pins the `Stripe-Version` header. Account default when unset.
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_version: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StripeConfig {
    pub fn load() -> Result<Self, CoreError> {
        service_core::config::load("stripe", "STRIPE")
    }

    /// Config pointing at an alternative base URL, e.g. a local mock.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Default::default()
        }
    }
}
