use openapi_client::{cen, Credential, HttpTransport, OpenApiConfig, Protocol, RpcClient};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_ACCESS_KEY_ID: &str = "LTAI-test";
pub const TEST_ACCESS_KEY_SECRET: &str = "test-secret";

pub fn test_config(server: &MockServer) -> OpenApiConfig {
    OpenApiConfig {
        access_key_id: Some(TEST_ACCESS_KEY_ID.to_string()),
        access_key_secret: Some(SecretString::new(TEST_ACCESS_KEY_SECRET.to_string())),
        endpoint: Some(server.address().to_string()),
        protocol: Some(Protocol::Http),
        ..Default::default()
    }
}

pub struct TestRpc {
    pub server: MockServer,
    pub client: RpcClient,
}

impl TestRpc {
    pub async fn spawn() -> Self {
        let _ = service_core::observability::init_tracing("openapi-client-test", "debug", false);

        let server = MockServer::start().await;
        let client = RpcClient::from_config(&test_config(&server), &cen::ENDPOINT_RULE)
            .expect("Failed to build RPC client");

        Self { server, client }
    }

    pub fn anonymous_client(&self) -> RpcClient {
        let transport = HttpTransport::new(Credential::Anonymous, Duration::from_secs(1))
            .expect("Failed to build transport");
        RpcClient::new(transport, self.server.address().to_string()).with_protocol(Protocol::Http)
    }

    /// Decoded query parameters of every request received so far.
    pub async fn queries(&self) -> Vec<BTreeMap<String, String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.query_pairs().into_owned().collect())
            .collect()
    }
}

pub fn server_error(code: &str, message: &str) -> Value {
    json!({
        "RequestId": "req-err-1",
        "HostId": "cbn.aliyuncs.com",
        "Code": code,
        "Message": message
    })
}
