// client/mod.rs - Programmatic client for the REST API
//
// http:  typed requests against one server, generic over Resource
// slice: per-entity list state and UI flags, updated by the async actions,
//        plus the reference lists a sale is picked from
// form:  string-typed form input and the checks run before anything is sent
pub mod error;
pub mod form;
pub mod http;
pub mod slice;

pub use error::ClientError;
pub use form::{CustomerForm, Form, ProductForm, SaleForm, StoreForm};
pub use http::ApiClient;
pub use slice::{ModalType, SaleChoices, Slice, Status};
