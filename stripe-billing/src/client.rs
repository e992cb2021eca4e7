//! Stripe REST client.
//!
//! Owns the HTTP plumbing shared by every operation: bearer authentication
//! with the caller's secret key, form-encoded bodies, and classification of
//! Stripe's error responses into [`VendorError`].

use crate::config::StripeConfig;
use crate::error::{Operation, StripeError};
use crate::form;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const STRIPE_VERSION_HEADER: &str = "Stripe-Version";

/// Stripe client for the billing operations in [`crate::services`].
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    config: StripeConfig,
}

/// Class of a Stripe API failure, derived from the HTTP status and the
/// `error.type` field of the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorErrorKind {
    InvalidRequest,
    Authentication,
    Card,
    Permission,
    RateLimit,
    Idempotency,
    Api,
}

impl VendorErrorKind {
    pub fn classify(status: u16, error_type: Option<&str>) -> Self {
        if error_type == Some("idempotency_error") {
            return VendorErrorKind::Idempotency;
        }

        match status {
            400 | 404 => VendorErrorKind::InvalidRequest,
            401 => VendorErrorKind::Authentication,
            402 => VendorErrorKind::Card,
            403 => VendorErrorKind::Permission,
            429 => VendorErrorKind::RateLimit,
            _ => VendorErrorKind::Api,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorErrorKind::InvalidRequest => "invalid_request_error",
            VendorErrorKind::Authentication => "authentication_error",
            VendorErrorKind::Card => "card_error",
            VendorErrorKind::Permission => "permission_error",
            VendorErrorKind::RateLimit => "rate_limit_error",
            VendorErrorKind::Idempotency => "idempotency_error",
            VendorErrorKind::Api => "api_error",
        }
    }
}

impl fmt::Display for VendorErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `error` object of a Stripe error response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub param: Option<String>,
    pub decline_code: Option<String>,
    pub doc_url: Option<String>,
}

impl ApiErrorDetail {
    fn summary(&self) -> &str {
        self.message.as_deref().unwrap_or("no message")
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

/// A failure reported by Stripe or by the connection to it.
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("{kind} (HTTP {status}): {}", .detail.summary())]
    Api {
        kind: VendorErrorKind,
        status: u16,
        detail: ApiErrorDetail,
    },

    #[error("connection to Stripe failed: {0}")]
    Connection(#[source] reqwest::Error),
}

impl VendorError {
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            VendorError::Api {
                kind: VendorErrorKind::InvalidRequest,
                ..
            }
        )
    }

    pub fn kind(&self) -> Option<VendorErrorKind> {
        match self {
            VendorError::Api { kind, .. } => Some(*kind),
            VendorError::Connection(_) => None,
        }
    }
}

impl StripeClient {
    /// Create a new Stripe client.
    pub fn new(config: StripeConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        api_key: &SecretString,
        path: &str,
    ) -> Result<T, StripeError> {
        let request = self.request(Method::GET, api_key, path);
        self.send(operation, request).await
    }

    pub(crate) async fn post<T, P>(
        &self,
        operation: Operation,
        api_key: &SecretString,
        path: &str,
        params: &P,
    ) -> Result<T, StripeError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = form::encode(params).map_err(|e| StripeError::generic(operation, e))?;

        let request = self
            .request(Method::POST, api_key, path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        self.send(operation, request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        operation: Operation,
        api_key: &SecretString,
        path: &str,
    ) -> Result<T, StripeError> {
        let request = self.request(Method::DELETE, api_key, path);
        self.send(operation, request).await
    }

    fn request(&self, method: Method, api_key: &SecretString, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(api_key.expose_secret());

        if let Some(version) = &self.config.api_version {
            request = request.header(STRIPE_VERSION_HEADER, version);
        }

        request
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, StripeError> {
        let response = request
            .send()
            .await
            .map_err(|e| StripeError::from_vendor(operation, VendorError::Connection(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StripeError::from_vendor(operation, VendorError::Connection(e)))?;

        tracing::debug!(method = %operation, status = %status, "Stripe response");

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| StripeError::generic(operation, e));
        }

        let detail = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| ApiErrorDetail {
                message: Some(body.clone()),
                ..Default::default()
            });
        let kind = VendorErrorKind::classify(status.as_u16(), detail.error_type.as_deref());

        tracing::error!(
            method = %operation,
            status = %status,
            kind = %kind,
            code = ?detail.code,
            message = ?detail.message,
            "Stripe request failed"
        );

        Err(StripeError::from_vendor(
            operation,
            VendorError::Api {
                kind,
                status: status.as_u16(),
                detail,
            },
        ))
    }
}

/// Percent-encode an object id for use as a path segment.
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_status() {
        assert_eq!(VendorErrorKind::classify(400, None), VendorErrorKind::InvalidRequest);
        assert_eq!(VendorErrorKind::classify(404, None), VendorErrorKind::InvalidRequest);
        assert_eq!(VendorErrorKind::classify(401, None), VendorErrorKind::Authentication);
        assert_eq!(VendorErrorKind::classify(402, None), VendorErrorKind::Card);
        assert_eq!(VendorErrorKind::classify(403, None), VendorErrorKind::Permission);
        assert_eq!(VendorErrorKind::classify(429, None), VendorErrorKind::RateLimit);
        assert_eq!(VendorErrorKind::classify(500, None), VendorErrorKind::Api);
    }

    #[test]
    fn test_idempotency_type_overrides_status() {
        assert_eq!(
            VendorErrorKind::classify(400, Some("idempotency_error")),
            VendorErrorKind::Idempotency
        );
        assert_eq!(
            VendorErrorKind::classify(409, Some("idempotency_error")),
            VendorErrorKind::Idempotency
        );
    }

    #[test]
    fn test_error_envelope_parses() {
        let body = r#"{"error":{"type":"invalid_request_error","code":"resource_missing","message":"No such subscription: 'sub_x'","param":"id"}}"#;
        let envelope: ApiErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.code.as_deref(), Some("resource_missing"));
        assert_eq!(envelope.error.param.as_deref(), Some("id"));
    }

    #[test]
    fn test_segment_escapes_reserved_characters() {
        assert_eq!(segment("sub_123"), "sub_123");
        assert_eq!(segment("a/b"), "a%2Fb");
    }
}
