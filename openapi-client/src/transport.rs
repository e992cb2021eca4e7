//! Transport seam between [`crate::RpcClient`] and the network.

use crate::descriptor::{ActionDescriptor, AuthType, HttpMethod};
use crate::error::RpcError;
use crate::signer;
use async_trait::async_trait;
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-call overrides.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    pub read_timeout: Option<Duration>,
    /// Extra headers sent with this call only.
    pub headers: BTreeMap<String, String>,
}

impl RuntimeOptions {
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// Undecoded result of a successful call.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn call_api(
        &self,
        descriptor: &ActionDescriptor,
        endpoint: &str,
        query: BTreeMap<String, String>,
        runtime: &RuntimeOptions,
    ) -> Result<RawResponse, RpcError>;
}

#[derive(Debug, Clone)]
pub enum Credential {
    AccessKey {
        id: String,
        secret: SecretString,
    },
    BearerToken(SecretString),
    Anonymous,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServerErrorBody {
    code: Option<String>,
    message: Option<String>,
    request_id: Option<String>,
}

/// reqwest-backed transport with RPC common parameters and signing.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    credential: Credential,
}

impl HttpTransport {
    pub fn new(credential: Credential, connect_timeout: Duration) -> Result<Self, RpcError> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;
        Ok(Self { client, credential })
    }

    /// Adds the common parameters and the credential to `query`.
    pub fn prepare_query(
        &self,
        descriptor: &ActionDescriptor,
        mut query: BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, RpcError> {
        query.insert("Action".to_string(), descriptor.action.to_string());
        query.insert("Version".to_string(), descriptor.version.to_string());
        query.insert("Format".to_string(), "JSON".to_string());
        query.insert(
            "Timestamp".to_string(),
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        );
        query.insert(
            "SignatureNonce".to_string(),
            uuid::Uuid::new_v4().to_string(),
        );

        if descriptor.auth_type == AuthType::Anonymous {
            return Ok(query);
        }

        match &self.credential {
            Credential::AccessKey { id, secret } => {
                query.insert("AccessKeyId".to_string(), id.clone());
                query.insert(
                    "SignatureMethod".to_string(),
                    signer::SIGNATURE_METHOD.to_string(),
                );
                query.insert(
                    "SignatureVersion".to_string(),
                    signer::SIGNATURE_VERSION.to_string(),
                );
                let to_sign = signer::string_to_sign(descriptor.method, &query);
                let signature = signer::sign(secret.expose_secret(), &to_sign)?;
                query.insert("Signature".to_string(), signature);
            }
            Credential::BearerToken(token) => {
                query.insert("SignatureType".to_string(), "BEARERTOKEN".to_string());
                query.insert(
                    "BearerToken".to_string(),
                    token.expose_secret().to_string(),
                );
            }
            Credential::Anonymous => {
                return Err(RpcError::Config(format!(
                    "{} requires credentials",
                    descriptor.action
                )));
            }
        }

        Ok(query)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call_api(
        &self,
        descriptor: &ActionDescriptor,
        endpoint: &str,
        query: BTreeMap<String, String>,
        runtime: &RuntimeOptions,
    ) -> Result<RawResponse, RpcError> {
        let query = self.prepare_query(descriptor, query)?;
        let url = format!(
            "{}://{}{}",
            descriptor.protocol, endpoint, descriptor.pathname
        );
        let method = match descriptor.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut request = self.client.request(method, &url).query(&query);
        for (name, value) in &runtime.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = runtime.read_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(action = descriptor.action, error = %e, "RPC request failed");
            RpcError::Transport(e)
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect::<BTreeMap<_, _>>();
        let text = response.text().await?;

        if !status.is_success() {
            let detail: ServerErrorBody =
                serde_json::from_str(&text).unwrap_or_else(|_| ServerErrorBody {
                    code: None,
                    message: Some(text.clone()),
                    request_id: None,
                });
            tracing::warn!(
                action = descriptor.action,
                status = status.as_u16(),
                code = detail.code.as_deref().unwrap_or_default(),
                "RPC action rejected"
            );
            return Err(RpcError::Server {
                status: status.as_u16(),
                code: detail.code.unwrap_or_else(|| "Unknown".to_string()),
                message: detail.message.unwrap_or_default(),
                request_id: detail.request_id,
            });
        }

        let body = serde_json::from_str(&text)?;
        Ok(RawResponse {
            status_code: status.as_u16(),
            headers,
            body,
        })
    }
}
