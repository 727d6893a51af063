use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, SqliteQuery};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: String,
    pub address: String,
}

impl Entity for Customer {
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static [&'static str] = &["name", "address"];
    const SELECT: &'static str = "SELECT customers.id, customers.name, customers.address FROM customers";

    type Fields = CustomerFields;

    fn bind_fields<'q>(query: SqliteQuery<'q>, fields: &CustomerFields) -> SqliteQuery<'q> {
        query.bind(fields.name.clone()).bind(fields.address.clone())
    }
}
