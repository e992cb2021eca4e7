mod common;

use common::{deleted_json, form_value, product_json, stripe_error, TestStripe};
use stripe_billing::services::{CreateProductParams, ModifyProductParams, PriceDataParams};
use stripe_billing::{ErrorCode, Operation};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn create_product_with_recurring_default_price() {
    let stripe = TestStripe::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("prod_1", true)))
        .expect(1)
        .mount(&stripe.server)
        .await;

    let params = CreateProductParams {
        name: "Pro plan".to_string(),
        price: PriceDataParams {
            currency: Some("usd".to_string()),
            unit_amount: Some(9.99),
            recurring_interval: Some("month".to_string()),
            recurring_interval_count: Some(1),
        },
        ..Default::default()
    };
    let response = stripe
        .client
        .create_product(&stripe.api_key, params)
        .await
        .expect("Failed to create product");

    assert_eq!(response.data.id, "prod_1");
    assert_eq!(response.message, "Stripe product created successfully.");

    let bodies = stripe.form_bodies("POST", "/v1/products").await;
    let body = &bodies[0];
    assert_eq!(form_value(body, "name"), Some("Pro plan"));
    assert_eq!(form_value(body, "default_price_data[currency]"), Some("usd"));
    assert_eq!(form_value(body, "default_price_data[unit_amount]"), Some("999"));
    assert_eq!(
        form_value(body, "default_price_data[recurring][interval]"),
        Some("month")
    );
    assert_eq!(
        form_value(body, "default_price_data[recurring][interval_count]"),
        Some("1")
    );
}

#[tokio::test]
async fn currency_without_amount_is_rejected_before_calling_stripe() {
    let stripe = TestStripe::spawn().await;

    let params = CreateProductParams {
        name: "Pro plan".to_string(),
        price: PriceDataParams {
            currency: Some("usd".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let err = stripe
        .client
        .create_product(&stripe.api_key, params)
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(err.method(), Operation::PriceData);
    assert_eq!(stripe.request_count().await, 0);
}

#[tokio::test]
async fn modify_product_can_archive() {
    let stripe = TestStripe::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/products/prod_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("prod_1", false)))
        .expect(1)
        .mount(&stripe.server)
        .await;

    let params = ModifyProductParams {
        active: false,
        default_price_id: Some("price_pro".to_string()),
        ..ModifyProductParams::new("prod_1")
    };
    let response = stripe
        .client
        .modify_product(&stripe.api_key, params)
        .await
        .expect("Failed to modify product");

    assert!(!response.data.active);
    assert_eq!(response.message, "Stripe product modified successfully.");

    let bodies = stripe.form_bodies("POST", "/v1/products/prod_1").await;
    assert_eq!(form_value(&bodies[0], "active"), Some("false"));
    assert_eq!(form_value(&bodies[0], "default_price"), Some("price_pro"));
}

#[tokio::test]
async fn retrieve_and_delete_product() {
    let stripe = TestStripe::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v1/products/prod_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("prod_1", true)))
        .expect(1)
        .mount(&stripe.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/products/prod_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deleted_json("prod_1", "product")))
        .expect(1)
        .mount(&stripe.server)
        .await;

    let retrieved = stripe
        .client
        .retrieve_product(&stripe.api_key, "prod_1")
        .await
        .expect("Failed to retrieve product");
    assert_eq!(retrieved.data.default_price.as_deref(), Some("price_pro"));
    assert_eq!(retrieved.message, "Stripe product retrieved successfully.");

    let deleted = stripe
        .client
        .delete_product(&stripe.api_key, "prod_1")
        .await
        .expect("Failed to delete product");
    assert!(deleted.data.deleted);
    assert_eq!(deleted.message, "Stripe product deleted successfully.");
}

#[tokio::test]
async fn missing_product_maps_to_invalid_request() {
    let stripe = TestStripe::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v1/products/prod_missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(stripe_error("invalid_request_error", "No such product")),
        )
        .mount(&stripe.server)
        .await;

    let err = stripe
        .client
        .retrieve_product(&stripe.api_key, "prod_missing")
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(err.code(), ErrorCode::StripeInvalidRequest);
    assert_eq!(err.method().method_name(), "retrieve_stripe_product");
}
