use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::api::{
    CustomerDto, CustomerPayload, Identified, Payload, ProductDto, ProductPayload, StoreDto,
    StorePayload,
};
use crate::database::models::{Customer, Entity, Product, Store};
use crate::services::ServiceError;

/// Fields a resource writes to its table
pub type FieldsOf<R> = <<R as Resource>::Entity as Entity>::Fields;

/// One REST collection: its path, its stored row, and its wire types.
///
/// The handlers, the service and the client are all generic over this, so
/// adding an entity means adding one impl.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Path segment under `/api`
    const NAME: &'static str;
    /// Used in messages, e.g. "Error retrieving products"
    const PLURAL: &'static str;

    type Entity: Entity;
    type Dto: From<Self::Entity>
        + Identified
        + Serialize
        + DeserializeOwned
        + Clone
        + Send
        + Sync
        + 'static;
    type Payload: Payload<Fields = FieldsOf<Self>>
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Checks that need the store, run after required-field validation
    async fn check_references(_pool: &SqlitePool, _fields: &FieldsOf<Self>) -> Result<(), ServiceError> {
        Ok(())
    }
}

pub struct Customers;
pub struct Products;
pub struct Stores;

#[async_trait]
impl Resource for Customers {
    const NAME: &'static str = "customer";
    const PLURAL: &'static str = "customers";

    type Entity = Customer;
    type Dto = CustomerDto;
    type Payload = CustomerPayload;
}

#[async_trait]
impl Resource for Products {
    const NAME: &'static str = "product";
    const PLURAL: &'static str = "products";

    type Entity = Product;
    type Dto = ProductDto;
    type Payload = ProductPayload;
}

#[async_trait]
impl Resource for Stores {
    const NAME: &'static str = "store";
    const PLURAL: &'static str = "stores";

    type Entity = Store;
    type Dto = StoreDto;
    type Payload = StorePayload;
}
