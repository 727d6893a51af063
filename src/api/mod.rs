// api/mod.rs - Wire format
//
// dto:     what the API returns (one struct per entity, camelCase fields)
// payload: what the API accepts, and the required-field checks that turn a
//          payload into the fields written to the store
// date:    lenient parsing for sale dates
// openapi: generated description of the REST surface
pub mod date;
pub mod dto;
pub mod openapi;
pub mod payload;

pub use dto::{CustomerDto, Identified, ProductDto, SaleDto, StoreDto};
pub use payload::{
    CustomerPayload, FieldErrors, Payload, ProductPayload, SalePayload, StorePayload,
};
