use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::models::{Customer, Product, Sale, Store};

/// Anything with a stored id; lets list code find rows without knowing the entity
pub trait Identified {
    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// Sale with the names of its product, customer and store flattened in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub store_id: i64,
    pub store_name: String,
    #[serde(with = "crate::api::date")]
    pub date: NaiveDateTime,
    pub quantity: i64,
}

impl From<Customer> for CustomerDto {
    fn from(row: Customer) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
        }
    }
}

impl From<Product> for ProductDto {
    fn from(row: Product) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

impl From<Store> for StoreDto {
    fn from(row: Store) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
        }
    }
}

impl From<Sale> for SaleDto {
    fn from(row: Sale) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            store_id: row.store_id,
            store_name: row.store_name,
            date: row.date,
            quantity: row.quantity,
        }
    }
}

impl Identified for CustomerDto {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for ProductDto {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for StoreDto {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for SaleDto {
    fn id(&self) -> i64 {
        self.id
    }
}
