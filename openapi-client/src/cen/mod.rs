//! Cloud Enterprise Network actions, API version `2017-09-12`.

mod models;

pub use models::*;

use crate::client::{RpcAction, RpcClient, RpcResponse};
use crate::descriptor::ActionDescriptor;
use crate::endpoint::{EndpointRule, EndpointStyle};
use crate::error::RpcError;
use crate::transport::{RuntimeOptions, Transport};

pub const API_VERSION: &str = "2017-09-12";

pub const ENDPOINT_RULE: EndpointRule = EndpointRule {
    product_id: "cbn",
    style: EndpointStyle::Central,
    endpoint_map: &[],
};

impl RpcAction for CreateCenRequest {
    type Response = CreateCenResponseBody;

    fn descriptor() -> ActionDescriptor {
        ActionDescriptor::rpc("CreateCen", API_VERSION)
    }
}

impl RpcAction for ListTransitRoutersRequest {
    type Response = ListTransitRoutersResponseBody;

    fn descriptor() -> ActionDescriptor {
        ActionDescriptor::rpc("ListTransitRouters", API_VERSION)
    }
}

impl<T: Transport> RpcClient<T> {
    pub async fn create_cen_with_options(
        &self,
        request: &CreateCenRequest,
        runtime: &RuntimeOptions,
    ) -> Result<RpcResponse<CreateCenResponseBody>, RpcError> {
        self.call_api_with_options(request, runtime).await
    }

    pub async fn create_cen(
        &self,
        request: &CreateCenRequest,
    ) -> Result<RpcResponse<CreateCenResponseBody>, RpcError> {
        self.call_api(request).await
    }

    pub async fn list_transit_routers_with_options(
        &self,
        request: &ListTransitRoutersRequest,
        runtime: &RuntimeOptions,
    ) -> Result<RpcResponse<ListTransitRoutersResponseBody>, RpcError> {
        self.call_api_with_options(request, runtime).await
    }

    pub async fn list_transit_routers(
        &self,
        request: &ListTransitRoutersRequest,
    ) -> Result<RpcResponse<ListTransitRoutersResponseBody>, RpcError> {
        self.call_api(request).await
    }
}
