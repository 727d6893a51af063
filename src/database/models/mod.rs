pub mod customer;
pub mod product;
pub mod sale;
pub mod store;

pub use customer::{Customer, CustomerFields};
pub use product::{Product, ProductFields};
pub use sale::{Sale, SaleFields};
pub use store::{Store, StoreFields};

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

/// A query under construction, ready for more binds
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A stored row type and how to read and write it.
///
/// `SELECT` must produce every column the row's `FromRow` expects and must
/// leave the entity's own table addressable as `TABLE` so that the repository
/// can append `WHERE {TABLE}.id = ?` and `ORDER BY {TABLE}.id`.
/// `COLUMNS` lists the mutable columns in the order `bind_fields` binds them.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const SELECT: &'static str;

    /// Mutable fields written on insert and update
    type Fields: Send + Sync + 'static;

    fn bind_fields<'q>(query: SqliteQuery<'q>, fields: &Self::Fields) -> SqliteQuery<'q>;
}
