//! Customer operations.

use crate::client::{segment, StripeClient};
use crate::error::{Operation, StripeError};
use crate::models::{Address, ApiResponse, Customer, DeletedObject};
use crate::services::{require, validate};
use secrecy::SecretString;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;
use validator::Validate;

pub const CUSTOMER_CREATED_MESSAGE: &str = "Stripe customer created successfully.";
pub const CUSTOMER_MODIFIED_MESSAGE: &str = "Stripe customer modified successfully.";
pub const CUSTOMER_DELETED_MESSAGE: &str = "Stripe customer deleted successfully.";

/// Join first and last name, trimming each. `None` when both are blank.
pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let first = first_name.map(str::trim).filter(|s| !s.is_empty());
    let last = last_name.map(str::trim).filter(|s| !s.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
        (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
        (None, None) => None,
    }
}

/// `None` when every address component is blank, so no `address` parameter
/// is sent at all.
pub fn customer_address(address: &Address) -> Option<Address> {
    let blank = |part: &Option<String>| part.as_deref().map_or(true, |s| s.is_empty());

    let all_blank = blank(&address.city)
        && blank(&address.country)
        && blank(&address.line1)
        && blank(&address.line2)
        && blank(&address.postal_code)
        && blank(&address.state);

    if all_blank {
        None
    } else {
        Some(address.clone())
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateCustomerParams {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: Option<String>,
    pub address: Address,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ModifyCustomerParams {
    #[validate(length(min = 1))]
    pub customer_id: String,
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Address,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub default_payment_method: Option<String>,
}

#[derive(Serialize)]
struct CustomerBody<'a> {
    email: Option<&'a str>,
    name: Option<String>,
    address: Option<Address>,
    description: Option<&'a str>,
    phone: Option<&'a str>,
    metadata: Option<&'a BTreeMap<String, String>>,
    invoice_settings: Option<InvoiceSettingsBody<'a>>,
}

#[derive(Serialize)]
struct InvoiceSettingsBody<'a> {
    default_payment_method: Option<&'a str>,
}

impl StripeClient {
    #[instrument(skip(self, api_key, params), fields(method = "create_stripe_customer"))]
    pub async fn create_customer(
        &self,
        api_key: &SecretString,
        params: CreateCustomerParams,
    ) -> Result<ApiResponse<Customer>, StripeError> {
        let operation = Operation::CreateCustomer;
        require(operation, api_key, &[&params.email, &params.first_name])?;
        validate(operation, &params)?;

        let body = CustomerBody {
            email: Some(&params.email),
            name: full_name(Some(&params.first_name), params.last_name.as_deref()),
            address: customer_address(&params.address),
            description: params.description.as_deref(),
            phone: params.phone.as_deref(),
            metadata: params.metadata.as_ref(),
            invoice_settings: None,
        };

        let customer: Customer = self
            .post(operation, api_key, "/v1/customers", &body)
            .await?;

        tracing::info!(customer_id = %customer.id, "Stripe customer created");
        Ok(ApiResponse::new(customer, CUSTOMER_CREATED_MESSAGE))
    }

    #[instrument(
        skip(self, api_key, params),
        fields(method = "modify_stripe_customer", customer_id = %params.customer_id)
    )]
    pub async fn modify_customer(
        &self,
        api_key: &SecretString,
        params: ModifyCustomerParams,
    ) -> Result<ApiResponse<Customer>, StripeError> {
        let operation = Operation::ModifyCustomer;
        require(operation, api_key, &[&params.customer_id])?;
        validate(operation, &params)?;

        let body = CustomerBody {
            email: params.email.as_deref(),
            name: full_name(params.first_name.as_deref(), params.last_name.as_deref()),
            address: customer_address(&params.address),
            description: params.description.as_deref(),
            phone: params.phone.as_deref(),
            metadata: params.metadata.as_ref(),
            invoice_settings: Some(InvoiceSettingsBody {
                default_payment_method: params.default_payment_method.as_deref(),
            }),
        };

        let path = format!("/v1/customers/{}", segment(&params.customer_id));
        let customer: Customer = self.post(operation, api_key, &path, &body).await?;

        tracing::info!(customer_id = %customer.id, "Stripe customer modified");
        Ok(ApiResponse::new(customer, CUSTOMER_MODIFIED_MESSAGE))
    }

    #[instrument(skip(self, api_key), fields(method = "delete_stripe_customer"))]
    pub async fn delete_customer(
        &self,
        api_key: &SecretString,
        customer_id: &str,
    ) -> Result<ApiResponse<DeletedObject>, StripeError> {
        let operation = Operation::DeleteCustomer;
        require(operation, api_key, &[customer_id])?;

        let path = format!("/v1/customers/{}", segment(customer_id));
        let deleted: DeletedObject = self.delete(operation, api_key, &path).await?;

        tracing::info!(customer_id = %deleted.id, "Stripe customer deleted");
        Ok(ApiResponse::new(deleted, CUSTOMER_DELETED_MESSAGE))
    }
}
