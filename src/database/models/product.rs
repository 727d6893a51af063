use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::{Entity, SqliteQuery};

/// Price is kept as decimal text; SQLite has no exact numeric type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub price: Decimal,
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let raw: String = row.try_get("price")?;
        let price = raw.parse::<Decimal>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price,
        })
    }
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["name", "price"];
    const SELECT: &'static str = "SELECT products.id, products.name, products.price FROM products";

    type Fields = ProductFields;

    fn bind_fields<'q>(query: SqliteQuery<'q>, fields: &ProductFields) -> SqliteQuery<'q> {
        query
            .bind(fields.name.clone())
            .bind(fields.price.normalize().to_string())
    }
}
