pub mod customer;
pub mod product;
pub mod sale;
pub mod server;
pub mod store;
