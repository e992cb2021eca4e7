use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCenRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub description: Option<String>,
    /// `REDUCED` allows overlapping CIDR blocks.
    pub protection_level: Option<String>,
    pub client_token: Option<String>,
    pub owner_account: Option<String>,
    pub owner_id: Option<i64>,
    pub resource_owner_account: Option<String>,
    pub resource_owner_id: Option<i64>,
    #[validate(length(max = 20))]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCenResponseBody {
    pub request_id: Option<String>,
    pub cen_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct ListTransitRoutersRequest {
    #[validate(length(min = 1))]
    pub cen_id: String,
    pub region_id: Option<String>,
    pub transit_router_id: Option<String>,
    pub transit_router_name: Option<String>,
    #[serde(rename = "Type")]
    pub router_type: Option<String>,
    #[validate(range(min = 1))]
    pub page_number: Option<i32>,
    #[validate(range(min = 1, max = 50))]
    pub page_size: Option<i32>,
    pub owner_account: Option<String>,
    pub owner_id: Option<i64>,
    pub resource_owner_account: Option<String>,
    pub resource_owner_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<Tag>,
}

impl ListTransitRoutersRequest {
    pub fn new(cen_id: impl Into<String>) -> Self {
        Self {
            cen_id: cen_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTransitRoutersResponseBody {
    pub request_id: Option<String>,
    pub total_count: Option<i32>,
    pub page_number: Option<i32>,
    pub page_size: Option<i32>,
    #[serde(default)]
    pub transit_routers: Vec<TransitRouter>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransitRouter {
    pub transit_router_id: Option<String>,
    pub transit_router_name: Option<String>,
    pub transit_router_description: Option<String>,
    pub cen_id: Option<String>,
    pub region_id: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "Type")]
    pub router_type: Option<String>,
    pub creation_time: Option<String>,
    pub ali_uid: Option<i64>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}
