//! Fixed per-action call metadata.

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// Access key pair, request signed.
    AccessKey,
    BearerToken,
    Anonymous,
}

/// Identifies a single remote call: action, API version, and how the call
/// is framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub action: &'static str,
    pub version: &'static str,
    pub protocol: Protocol,
    pub method: HttpMethod,
    pub auth_type: AuthType,
    pub style: &'static str,
    pub pathname: &'static str,
    pub req_body_type: &'static str,
    pub body_type: &'static str,
}

impl ActionDescriptor {
    /// HTTPS POST, RPC style, access-key signed, JSON response.
    pub const fn rpc(action: &'static str, version: &'static str) -> Self {
        Self {
            action,
            version,
            protocol: Protocol::Https,
            method: HttpMethod::Post,
            auth_type: AuthType::AccessKey,
            style: "RPC",
            pathname: "/",
            req_body_type: "formData",
            body_type: "json",
        }
    }
}
