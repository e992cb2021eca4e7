use crate::descriptor::Protocol;
use crate::transport::Credential;
use secrecy::SecretString;
use serde::Deserialize;
use service_core::error::CoreError;
use std::time::Duration;

/// Client settings, loaded from `openapi.{toml,yaml,json}` and `ALIBABA_CLOUD_*`.
#[derive(Deserialize, Clone, Debug)]
pub struct OpenApiConfig {
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub access_key_secret: Option<SecretString>,
    #[serde(default)]
    pub bearer_token: Option<SecretString>,
    #[serde(default = "default_region_id")]
    pub region_id: String,
    /// Skips endpoint resolution when set.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    /// Overrides every descriptor's protocol.
    #[serde(default)]
    pub protocol: Option<Protocol>,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_region_id() -> String {
    "cn-hangzhou".to_string()
}

fn default_read_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            access_key_id: None,
            access_key_secret: None,
            bearer_token: None,
            region_id: default_region_id(),
            endpoint: None,
            network: None,
            suffix: None,
            protocol: None,
            read_timeout_ms: default_read_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl OpenApiConfig {
    pub fn load() -> Result<Self, CoreError> {
        service_core::config::load("openapi", "ALIBABA_CLOUD")
    }

    /// Access key pair wins over a bearer token; neither means anonymous.
    pub fn credential(&self) -> Credential {
        match (&self.access_key_id, &self.access_key_secret, &self.bearer_token) {
            (Some(id), Some(secret), _) => Credential::AccessKey {
                id: id.clone(),
                secret: secret.clone(),
            },
            (_, _, Some(token)) => Credential::BearerToken(token.clone()),
            _ => Credential::Anonymous,
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
