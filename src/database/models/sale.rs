use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, SqliteQuery};

/// A sale joined with the names of the rows it references
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub store_id: i64,
    pub store_name: String,
    pub date: NaiveDateTime,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleFields {
    pub product_id: i64,
    pub customer_id: i64,
    pub store_id: i64,
    pub date: NaiveDateTime,
    pub quantity: i64,
}

impl Entity for Sale {
    const TABLE: &'static str = "sales";
    const COLUMNS: &'static [&'static str] =
        &["product_id", "customer_id", "store_id", "date", "quantity"];
    const SELECT: &'static str = "SELECT sales.id, \
            sales.product_id, COALESCE(products.name, '') AS product_name, \
            sales.customer_id, COALESCE(customers.name, '') AS customer_name, \
            sales.store_id, COALESCE(stores.name, '') AS store_name, \
            sales.date, sales.quantity \
        FROM sales \
        LEFT JOIN products ON products.id = sales.product_id \
        LEFT JOIN customers ON customers.id = sales.customer_id \
        LEFT JOIN stores ON stores.id = sales.store_id";

    type Fields = SaleFields;

    fn bind_fields<'q>(query: SqliteQuery<'q>, fields: &SaleFields) -> SqliteQuery<'q> {
        query
            .bind(fields.product_id)
            .bind(fields.customer_id)
            .bind(fields.store_id)
            .bind(fields.date)
            .bind(fields.quantity)
    }
}
