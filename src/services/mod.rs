pub mod crud_service;
pub mod resource;
pub mod sale_service;

pub use crud_service::CrudService;
pub use resource::{Customers, Products, Resource, Stores};
pub use sale_service::Sales;

use thiserror::Error;

use crate::api::FieldErrors;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("ID mismatch: path id {path}, body id {body:?}")]
    IdMismatch { path: i64, body: Option<i64> },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
