use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::api::date;
use crate::database::models::{CustomerFields, ProductFields, SaleFields, StoreFields};

/// Violated fields keyed by their wire name
pub type FieldErrors = BTreeMap<String, String>;

/// A request body for create or update.
///
/// Every field is optional on the wire so that a missing field turns into a
/// field error instead of a deserialization failure. `id` is only consulted
/// on update; create ignores it.
pub trait Payload {
    type Fields;

    fn id(&self) -> Option<i64>;

    fn into_fields(self) -> Result<Self::Fields, FieldErrors>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Sale body. The flattened `productName`/`customerName`/`storeName` a client
/// may echo back on update are not part of it and are ignored. `date` stays
/// raw text until `into_fields` so a bad date is reported against its field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub product_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub store_id: Option<i64>,
    pub date: Option<String>,
    pub quantity: Option<i64>,
}

const REQUIRED: &str = "This field is required";

/// Required text must be present and not blank
fn required_text(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.insert(field.to_string(), REQUIRED.to_string());
            None
        }
    }
}

fn required<T>(errors: &mut FieldErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.insert(field.to_string(), REQUIRED.to_string());
    }
    value
}

impl Payload for CustomerPayload {
    type Fields = CustomerFields;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn into_fields(self) -> Result<CustomerFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        match required_text(&mut errors, "name", self.name) {
            Some(name) => Ok(CustomerFields {
                name,
                address: self.address.unwrap_or_default(),
            }),
            None => Err(errors),
        }
    }
}

impl Payload for ProductPayload {
    type Fields = ProductFields;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn into_fields(self) -> Result<ProductFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", self.name);
        let price = required(&mut errors, "price", self.price);

        match (name, price) {
            (Some(name), Some(price)) => Ok(ProductFields { name, price }),
            _ => Err(errors),
        }
    }
}

impl Payload for StorePayload {
    type Fields = StoreFields;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn into_fields(self) -> Result<StoreFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        match required_text(&mut errors, "name", self.name) {
            Some(name) => Ok(StoreFields {
                name,
                address: self.address.unwrap_or_default(),
            }),
            None => Err(errors),
        }
    }
}

impl Payload for SalePayload {
    type Fields = SaleFields;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn into_fields(self) -> Result<SaleFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let product_id = required(&mut errors, "productId", self.product_id);
        let customer_id = required(&mut errors, "customerId", self.customer_id);
        let store_id = required(&mut errors, "storeId", self.store_id);
        let date = match self.date.filter(|raw| !raw.trim().is_empty()) {
            None => required(&mut errors, "date", None),
            Some(raw) => {
                let parsed = date::parse(&raw);
                if parsed.is_none() {
                    errors.insert("date".to_string(), format!("Invalid date '{}'", raw.trim()));
                }
                parsed
            }
        };
        let quantity = required(&mut errors, "quantity", self.quantity);

        match (product_id, customer_id, store_id, date, quantity) {
            (Some(product_id), Some(customer_id), Some(store_id), Some(date), Some(quantity)) => {
                Ok(SaleFields {
                    product_id,
                    customer_id,
                    store_id,
                    date,
                    quantity,
                })
            }
            _ => Err(errors),
        }
    }
}
