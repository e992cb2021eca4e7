//! Product operations.

use crate::client::{segment, StripeClient};
use crate::error::{Operation, StripeError};
use crate::models::{ApiResponse, DeletedObject, Product};
use crate::services::{require, validate};
use secrecy::SecretString;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;
use validator::Validate;

pub const PRODUCT_CREATED_MESSAGE: &str = "Stripe product created successfully.";
pub const PRODUCT_MODIFIED_MESSAGE: &str = "Stripe product modified successfully.";
pub const PRODUCT_RETRIEVED_MESSAGE: &str = "Stripe product retrieved successfully.";
pub const PRODUCT_DELETED_MESSAGE: &str = "Stripe product deleted successfully.";

/// Inputs for a product's default price.
#[derive(Debug, Clone, Default)]
pub struct PriceDataParams {
    pub currency: Option<String>,
    /// Major currency units, e.g. `9.99`.
    pub unit_amount: Option<f64>,
    pub recurring_interval: Option<String>,
    pub recurring_interval_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceData {
    pub currency: String,
    /// Minor currency units.
    pub unit_amount: i64,
    pub recurring: Recurring,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recurring {
    pub interval: Option<String>,
    pub interval_count: Option<u32>,
}

pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Build `default_price_data`. No currency means no default price; a
/// currency without a positive amount is rejected.
pub fn price_data(params: &PriceDataParams) -> Result<Option<PriceData>, StripeError> {
    let currency = match params.currency.as_deref() {
        Some(currency) if !currency.is_empty() => currency,
        _ => return Ok(None),
    };

    let unit_amount = match params.unit_amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => amount,
        _ => return Err(StripeError::bad_request(Operation::PriceData)),
    };

    Ok(Some(PriceData {
        currency: currency.to_string(),
        unit_amount: to_cents(unit_amount),
        recurring: Recurring {
            interval: params.recurring_interval.clone(),
            interval_count: params.recurring_interval_count,
        },
    }))
}

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateProductParams {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub price: PriceDataParams,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Validate)]
pub struct ModifyProductParams {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub default_price_id: Option<String>,
    pub active: bool,
}

impl ModifyProductParams {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            name: None,
            description: None,
            metadata: None,
            default_price_id: None,
            active: true,
        }
    }
}

#[derive(Serialize)]
struct CreateProductBody<'a> {
    name: &'a str,
    description: Option<&'a str>,
    metadata: Option<&'a BTreeMap<String, String>>,
    default_price_data: Option<PriceData>,
}

#[derive(Serialize)]
struct ModifyProductBody<'a> {
    name: Option<&'a str>,
    description: Option<&'a str>,
    metadata: Option<&'a BTreeMap<String, String>>,
    default_price: Option<&'a str>,
    active: bool,
}

impl StripeClient {
    #[instrument(skip(self, api_key, params), fields(method = "create_stripe_product"))]
    pub async fn create_product(
        &self,
        api_key: &SecretString,
        params: CreateProductParams,
    ) -> Result<ApiResponse<Product>, StripeError> {
        let operation = Operation::CreateProduct;
        require(operation, api_key, &[&params.name])?;
        validate(operation, &params)?;

        let body = CreateProductBody {
            name: &params.name,
            description: params.description.as_deref(),
            metadata: params.metadata.as_ref(),
            default_price_data: price_data(&params.price)?,
        };

        let product: Product = self
            .post(operation, api_key, "/v1/products", &body)
            .await?;

        tracing::info!(product_id = %product.id, "Stripe product created");
        Ok(ApiResponse::new(product, PRODUCT_CREATED_MESSAGE))
    }

    #[instrument(
        skip(self, api_key, params),
        fields(method = "modify_stripe_product", product_id = %params.product_id)
    )]
    pub async fn modify_product(
        &self,
        api_key: &SecretString,
        params: ModifyProductParams,
    ) -> Result<ApiResponse<Product>, StripeError> {
        let operation = Operation::ModifyProduct;
        require(operation, api_key, &[&params.product_id])?;
        validate(operation, &params)?;

        let body = ModifyProductBody {
            name: params.name.as_deref(),
            description: params.description.as_deref(),
            metadata: params.metadata.as_ref(),
            default_price: params.default_price_id.as_deref(),
            active: params.active,
        };

        let path = format!("/v1/products/{}", segment(&params.product_id));
        let product: Product = self.post(operation, api_key, &path, &body).await?;

        tracing::info!(product_id = %product.id, "Stripe product modified");
        Ok(ApiResponse::new(product, PRODUCT_MODIFIED_MESSAGE))
    }

    #[instrument(skip(self, api_key), fields(method = "retrieve_stripe_product"))]
    pub async fn retrieve_product(
        &self,
        api_key: &SecretString,
        product_id: &str,
    ) -> Result<ApiResponse<Product>, StripeError> {
        let operation = Operation::RetrieveProduct;
        require(operation, api_key, &[product_id])?;

        let path = format!("/v1/products/{}", segment(product_id));
        let product = self.get(operation, api_key, &path).await?;

        Ok(ApiResponse::new(product, PRODUCT_RETRIEVED_MESSAGE))
    }

    #[instrument(skip(self, api_key), fields(method = "delete_stripe_product"))]
    pub async fn delete_product(
        &self,
        api_key: &SecretString,
        product_id: &str,
    ) -> Result<ApiResponse<DeletedObject>, StripeError> {
        let operation = Operation::DeleteProduct;
        require(operation, api_key, &[product_id])?;

        let path = format!("/v1/products/{}", segment(product_id));
        let deleted: DeletedObject = self.delete(operation, api_key, &path).await?;

        tracing::info!(product_id = %deleted.id, "Stripe product deleted");
        Ok(ApiResponse::new(deleted, PRODUCT_DELETED_MESSAGE))
    }
}
