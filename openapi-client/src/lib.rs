//! RPC-style cloud API client.
//!
//! A remote action is an [`ActionDescriptor`] plus a request struct that
//! flattens into a query map. [`RpcClient`] validates the request, hands the
//! map to a [`Transport`], and deserializes the JSON body into the action's
//! response type. Endpoint resolution happens once, when the client is built.

pub mod cen;
pub mod client;
pub mod config;
pub mod descriptor;
pub mod endpoint;
pub mod error;
pub mod query;
pub mod signer;
pub mod transport;

pub use client::{RpcAction, RpcClient, RpcResponse};
pub use config::OpenApiConfig;
pub use descriptor::{ActionDescriptor, AuthType, HttpMethod, Protocol};
pub use endpoint::{EndpointRule, EndpointStyle};
pub use error::RpcError;
pub use transport::{Credential, HttpTransport, RawResponse, RuntimeOptions, Transport};
