mod common;

use common::{server_error, TestRpc, TEST_ACCESS_KEY_ID, TEST_ACCESS_KEY_SECRET};
use openapi_client::cen::{CreateCenRequest, ListTransitRoutersRequest, Tag};
use openapi_client::{signer, HttpMethod, RpcError, RuntimeOptions};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn create_cen_sends_signed_rpc_query() {
    let app = TestRpc::spawn().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(query_param("Action", "CreateCen"))
        .and(query_param("Version", "2017-09-12"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-acs-request-id", "req-1")
                .set_body_json(json!({ "RequestId": "req-1", "CenId": "cen-7setul" })),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let request = CreateCenRequest {
        name: Some("core network".to_string()),
        tag: vec![Tag::new("env", "prod")],
        ..Default::default()
    };
    let response = app.client.create_cen(&request).await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.cen_id.as_deref(), Some("cen-7setul"));
    assert_eq!(
        response.headers.get("x-acs-request-id").map(String::as_str),
        Some("req-1")
    );

    let queries = app.queries().await;
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    assert_eq!(query["Name"], "core network");
    assert_eq!(query["Tag.1.Key"], "env");
    assert_eq!(query["Format"], "JSON");
    assert_eq!(query["AccessKeyId"], TEST_ACCESS_KEY_ID);
    assert!(query.contains_key("SignatureNonce"));
    assert!(query.contains_key("Timestamp"));

    let expected = signer::sign(
        TEST_ACCESS_KEY_SECRET,
        &signer::string_to_sign(HttpMethod::Post, query),
    )
    .unwrap();
    assert_eq!(query["Signature"], expected);
}

#[tokio::test]
async fn list_transit_routers_decodes_router_list() {
    let app = TestRpc::spawn().await;

    Mock::given(method("POST"))
        .and(query_param("Action", "ListTransitRouters"))
        .and(query_param("CenId", "cen-7setul"))
        .and(query_param("PageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RequestId": "req-2",
            "TotalCount": 1,
            "PageNumber": 1,
            "PageSize": 10,
            "TransitRouters": [{
                "TransitRouterId": "tr-1",
                "TransitRouterName": "hub",
                "CenId": "cen-7setul",
                "RegionId": "cn-hangzhou",
                "Status": "Active",
                "Type": "Enterprise",
                "AliUid": 1250000000000000i64
            }]
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut request = ListTransitRoutersRequest::new("cen-7setul");
    request.page_size = Some(10);
    let response = app
        .client
        .list_transit_routers_with_options(
            &request,
            &RuntimeOptions::default().with_read_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    assert_eq!(response.body.total_count, Some(1));
    let router = &response.body.transit_routers[0];
    assert_eq!(router.transit_router_id.as_deref(), Some("tr-1"));
    assert_eq!(router.router_type.as_deref(), Some("Enterprise"));
}

#[tokio::test]
async fn invalid_request_never_reaches_the_server() {
    let app = TestRpc::spawn().await;

    let result = app
        .client
        .list_transit_routers(&ListTransitRoutersRequest::new(""))
        .await;

    assert!(matches!(result, Err(RpcError::Validation(_))));
    assert!(app.queries().await.is_empty());
}

#[tokio::test]
async fn server_error_body_is_decoded() {
    let app = TestRpc::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(server_error(
            "InvalidCenId.NotFound",
            "The specified CEN instance does not exist.",
        )))
        .mount(&app.server)
        .await;

    let err = app
        .client
        .list_transit_routers(&ListTransitRoutersRequest::new("cen-missing"))
        .await
        .unwrap_err();

    match err {
        RpcError::Server {
            status,
            code,
            request_id,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, "InvalidCenId.NotFound");
            assert_eq!(request_id.as_deref(), Some("req-err-1"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_keeps_raw_message() {
    let app = TestRpc::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&app.server)
        .await;

    let err = app
        .client
        .create_cen(&CreateCenRequest::default())
        .await
        .unwrap_err();

    match err {
        RpcError::Server { status, code, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(code, "Unknown");
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn mismatched_response_shape_is_a_decode_error() {
    let app = TestRpc::spawn().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "TransitRouters": "not-a-list" })),
        )
        .mount(&app.server)
        .await;

    let result = app
        .client
        .list_transit_routers(&ListTransitRoutersRequest::new("cen-1"))
        .await;
    assert!(matches!(result, Err(RpcError::Decode(_))));
}

#[tokio::test]
async fn anonymous_client_is_refused_before_sending() {
    let app = TestRpc::spawn().await;

    let result = app
        .anonymous_client()
        .create_cen(&CreateCenRequest::default())
        .await;

    assert!(matches!(result, Err(RpcError::Config(_))));
    assert!(app.queries().await.is_empty());
}

#[test]
fn blocking_call_runs_outside_async_context() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("Action", "CreateCen"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "RequestId": "req-3", "CenId": "cen-blocking" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    let client = openapi_client::RpcClient::from_config(
        &common::test_config(&server),
        &openapi_client::cen::ENDPOINT_RULE,
    )
    .unwrap();
    let response = client
        .call_api_blocking(&CreateCenRequest::default())
        .unwrap();

    assert_eq!(response.body.cen_id.as_deref(), Some("cen-blocking"));
    runtime.block_on(async move { server.verify().await });
}

#[tokio::test]
async fn blocking_call_inside_runtime_is_refused() {
    let app = TestRpc::spawn().await;

    let result = app.client.call_api_blocking(&CreateCenRequest::default());

    assert!(matches!(result, Err(RpcError::Config(_))));
    assert!(app.queries().await.is_empty());
}
