use sqlx::SqlitePool;
use std::marker::PhantomData;
use tracing::debug;

use crate::api::Payload;
use crate::database::{DatabaseError, Repository};
use crate::services::{Resource, ServiceError};

/// Get-all / get-by-id / create / update / delete for one resource.
///
/// Built per request around a handle to the shared pool; absent rows come
/// back as `None`/`false`, never as errors.
pub struct CrudService<R: Resource> {
    pool: SqlitePool,
    repository: Repository<R::Entity>,
    _resource: PhantomData<R>,
}

impl<R: Resource> CrudService<R> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: Repository::new(pool.clone()),
            pool,
            _resource: PhantomData,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<R::Dto>, ServiceError> {
        let rows = self.repository.select_all().await?;
        Ok(rows.into_iter().map(R::Dto::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<R::Dto>, ServiceError> {
        let row = self.repository.select_one(id).await?;
        Ok(row.map(R::Dto::from))
    }

    pub async fn create(&self, payload: R::Payload) -> Result<R::Dto, ServiceError> {
        let fields = payload.into_fields().map_err(ServiceError::Validation)?;
        R::check_references(&self.pool, &fields).await?;

        let id = self.repository.insert(&fields).await?;
        debug!("Created {} {}", R::NAME, id);

        self.reload(id).await
    }

    /// The body id must equal `id`; that is checked before the store is touched.
    pub async fn update(&self, id: i64, payload: R::Payload) -> Result<Option<R::Dto>, ServiceError> {
        if payload.id() != Some(id) {
            return Err(ServiceError::IdMismatch {
                path: id,
                body: payload.id(),
            });
        }
        let fields = payload.into_fields().map_err(ServiceError::Validation)?;

        if !self.repository.exists(id).await? {
            return Ok(None);
        }
        R::check_references(&self.pool, &fields).await?;

        if !self.repository.update(id, &fields).await? {
            return Ok(None);
        }
        debug!("Updated {} {}", R::NAME, id);

        self.reload(id).await.map(Some)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            debug!("Deleted {} {}", R::NAME, id);
        }
        Ok(deleted)
    }

    /// Read back a row just written, so the DTO carries joined columns
    async fn reload(&self, id: i64) -> Result<R::Dto, ServiceError> {
        let row = self.repository.select_one(id).await?.ok_or_else(|| {
            DatabaseError::QueryError(format!("{} {} missing after write", R::NAME, id))
        })?;
        Ok(R::Dto::from(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CustomerPayload, ProductPayload};
    use crate::database::DatabaseManager;
    use crate::services::{Customers, Products};
    use rust_decimal::Decimal;
    use std::time::Duration;

    async fn pool() -> SqlitePool {
        let pool = DatabaseManager::connect_url("sqlite::memory:", 1, Duration::from_secs(5))
            .await
            .unwrap();
        DatabaseManager::bootstrap(&pool).await.unwrap();
        pool
    }

    fn widget() -> ProductPayload {
        ProductPayload {
            id: None,
            name: Some("Widget".to_string()),
            price: Some(Decimal::new(999, 2)),
        }
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids() {
        let service = CrudService::<Products>::new(pool().await);
        let a = service.create(widget()).await.unwrap();
        let b = service.create(widget()).await.unwrap();
        assert_ne!(a.id, b.id);

        let fetched = service.get_by_id(a.id).await.unwrap();
        assert_eq!(fetched, Some(a));
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_writing() {
        let service = CrudService::<Customers>::new(pool().await);
        let err = service.create(CustomerPayload::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref fields) if fields.contains_key("name")));
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_mismatched_id_leaves_row_unchanged() {
        let service = CrudService::<Products>::new(pool().await);
        let created = service.create(widget()).await.unwrap();

        let mut payload = widget();
        payload.id = Some(created.id + 1);
        payload.name = Some("Gadget".to_string());
        let err = service.update(created.id, payload).await.unwrap_err();
        assert!(matches!(err, ServiceError::IdMismatch { .. }));

        let current = service.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(current.name, "Widget");
    }

    #[tokio::test]
    async fn update_unknown_id_is_absent() {
        let service = CrudService::<Products>::new(pool().await);
        let mut payload = widget();
        payload.id = Some(99);
        assert_eq!(service.update(99, payload).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_overwrites_mutable_fields() {
        let service = CrudService::<Products>::new(pool().await);
        let created = service.create(widget()).await.unwrap();

        let payload = ProductPayload {
            id: Some(created.id),
            name: Some("Gadget".to_string()),
            price: Some(Decimal::new(1250, 2)),
        };
        let updated = service.update(created.id, payload).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.price, Decimal::new(1250, 2));
    }

    #[tokio::test]
    async fn delete_then_get_is_absent() {
        let service = CrudService::<Products>::new(pool().await);
        let created = service.create(widget()).await.unwrap();

        assert!(service.delete(created.id).await.unwrap());
        assert!(!service.delete(created.id).await.unwrap());
        assert_eq!(service.get_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_counts_creates_minus_deletes() {
        let service = CrudService::<Products>::new(pool().await);
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(service.create(widget()).await.unwrap().id);
        }
        for id in &ids[..2] {
            service.delete(*id).await.unwrap();
        }
        assert_eq!(service.list_all().await.unwrap().len(), 3);
    }
}
