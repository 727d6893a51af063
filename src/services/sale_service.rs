use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::api::{FieldErrors, SaleDto, SalePayload};
use crate::database::models::{Customer, Entity, Product, Sale, SaleFields, Store};
use crate::database::Repository;
use crate::services::{Resource, ServiceError};

pub struct Sales;

#[async_trait]
impl Resource for Sales {
    const NAME: &'static str = "sale";
    const PLURAL: &'static str = "sales";

    type Entity = Sale;
    type Dto = SaleDto;
    type Payload = SalePayload;

    /// Every referenced product, customer and store must exist. The three
    /// lookups are independent reads; a delete landing between check and
    /// write is caught by the foreign key instead.
    async fn check_references(pool: &SqlitePool, fields: &SaleFields) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();

        check::<Product>(pool, &mut errors, "productId", "Product", fields.product_id).await?;
        check::<Customer>(pool, &mut errors, "customerId", "Customer", fields.customer_id).await?;
        check::<Store>(pool, &mut errors, "storeId", "Store", fields.store_id).await?;

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errors))
        }
    }
}

async fn check<E: Entity>(
    pool: &SqlitePool,
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    id: i64,
) -> Result<(), ServiceError> {
    if !Repository::<E>::new(pool.clone()).exists(id).await? {
        errors.insert(field.to_string(), format!("{} {} does not exist", label, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CustomerPayload, ProductPayload, StorePayload};
    use crate::database::DatabaseManager;
    use crate::services::{CrudService, Customers, Products, Stores};
    use rust_decimal::Decimal;
    use std::time::Duration;

    struct Fixture {
        pool: SqlitePool,
        product: i64,
        customer: i64,
        store: i64,
    }

    async fn fixture() -> Fixture {
        let pool = DatabaseManager::connect_url("sqlite::memory:", 1, Duration::from_secs(5))
            .await
            .unwrap();
        DatabaseManager::bootstrap(&pool).await.unwrap();

        let product = CrudService::<Products>::new(pool.clone())
            .create(ProductPayload {
                id: None,
                name: Some("Widget".to_string()),
                price: Some(Decimal::new(999, 2)),
            })
            .await
            .unwrap()
            .id;
        let customer = CrudService::<Customers>::new(pool.clone())
            .create(CustomerPayload {
                id: None,
                name: Some("Ada".to_string()),
                address: Some("1 Main St".to_string()),
            })
            .await
            .unwrap()
            .id;
        let store = CrudService::<Stores>::new(pool.clone())
            .create(StorePayload {
                id: None,
                name: Some("Downtown".to_string()),
                address: None,
            })
            .await
            .unwrap()
            .id;

        Fixture {
            pool,
            product,
            customer,
            store,
        }
    }

    fn sale(f: &Fixture) -> SalePayload {
        SalePayload {
            id: None,
            product_id: Some(f.product),
            customer_id: Some(f.customer),
            store_id: Some(f.store),
            date: Some("2024-06-01".to_string()),
            quantity: Some(3),
        }
    }

    #[tokio::test]
    async fn create_embeds_referenced_names() {
        let f = fixture().await;
        let dto = CrudService::<Sales>::new(f.pool.clone()).create(sale(&f)).await.unwrap();

        assert_eq!(dto.product_name, "Widget");
        assert_eq!(dto.customer_name, "Ada");
        assert_eq!(dto.store_name, "Downtown");
        assert_eq!(dto.quantity, 3);
    }

    #[tokio::test]
    async fn dangling_references_are_reported_per_field() {
        let f = fixture().await;
        let mut payload = sale(&f);
        payload.product_id = Some(404);
        payload.store_id = Some(405);

        let service = CrudService::<Sales>::new(f.pool.clone());
        match service.create(payload).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["productId", "storeId"]);
                assert_eq!(errors["productId"], "Product 404 does not exist");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_product_removes_its_sales() {
        let f = fixture().await;
        let sales = CrudService::<Sales>::new(f.pool.clone());
        sales.create(sale(&f)).await.unwrap();

        assert!(CrudService::<Products>::new(f.pool.clone()).delete(f.product).await.unwrap());
        assert!(sales.list_all().await.unwrap().is_empty());
    }
}
