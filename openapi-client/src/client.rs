//! Generic RPC client.

use crate::config::OpenApiConfig;
use crate::descriptor::{ActionDescriptor, Protocol};
use crate::endpoint::EndpointRule;
use crate::error::RpcError;
use crate::query;
use crate::transport::{HttpTransport, RuntimeOptions, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;
use validator::Validate;

/// A request struct bound to one remote action.
pub trait RpcAction: Serialize + Validate + Send + Sync {
    type Response: DeserializeOwned;

    fn descriptor() -> ActionDescriptor;

    fn query(&self) -> Result<BTreeMap<String, String>, RpcError> {
        query::flatten(self)
    }
}

#[derive(Debug, Clone)]
pub struct RpcResponse<B> {
    pub headers: BTreeMap<String, String>,
    pub status_code: u16,
    pub body: B,
}

pub struct RpcClient<T = HttpTransport> {
    transport: T,
    endpoint: String,
    protocol: Option<Protocol>,
    runtime: RuntimeOptions,
}

impl RpcClient<HttpTransport> {
    /// Builds an HTTP client for the product described by `rule`.
    pub fn from_config(config: &OpenApiConfig, rule: &EndpointRule) -> Result<Self, RpcError> {
        let endpoint = rule.resolve(
            &config.region_id,
            config.network.as_deref(),
            config.suffix.as_deref(),
            config.endpoint.as_deref(),
        )?;
        let transport = HttpTransport::new(config.credential(), config.connect_timeout())?;

        tracing::info!(
            product = rule.product_id,
            endpoint = %endpoint,
            region = %config.region_id,
            "RPC client initialized"
        );

        Ok(Self {
            transport,
            endpoint,
            protocol: config.protocol,
            runtime: RuntimeOptions::default().with_read_timeout(config.read_timeout()),
        })
    }
}

impl<T: Transport> RpcClient<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            protocol: None,
            runtime: RuntimeOptions::default(),
        }
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, request, runtime), fields(action = A::descriptor().action))]
    pub async fn call_api_with_options<A: RpcAction>(
        &self,
        request: &A,
        runtime: &RuntimeOptions,
    ) -> Result<RpcResponse<A::Response>, RpcError> {
        request.validate()?;
        let query = request.query()?;

        let mut descriptor = A::descriptor();
        if let Some(protocol) = self.protocol {
            descriptor.protocol = protocol;
        }

        tracing::debug!(
            version = descriptor.version,
            endpoint = %self.endpoint,
            params = query.len(),
            "Calling RPC action"
        );

        let raw = self
            .transport
            .call_api(&descriptor, &self.endpoint, query, runtime)
            .await?;
        let body = serde_json::from_value(raw.body)?;

        Ok(RpcResponse {
            headers: raw.headers,
            status_code: raw.status_code,
            body,
        })
    }

    /// Uses the client's default runtime options.
    pub async fn call_api<A: RpcAction>(
        &self,
        request: &A,
    ) -> Result<RpcResponse<A::Response>, RpcError> {
        self.call_api_with_options(request, &self.runtime).await
    }

    /// Runs [`Self::call_api`] on a current-thread runtime. Fails with
    /// [`RpcError::Config`] when called from inside a Tokio runtime.
    pub fn call_api_blocking<A: RpcAction>(
        &self,
        request: &A,
    ) -> Result<RpcResponse<A::Response>, RpcError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(RpcError::Config(
                "call_api_blocking cannot run inside an async runtime; use call_api".to_string(),
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.call_api(request))
    }
}
