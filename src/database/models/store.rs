use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Entity, SqliteQuery};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFields {
    pub name: String,
    pub address: String,
}

impl Entity for Store {
    const TABLE: &'static str = "stores";
    const COLUMNS: &'static [&'static str] = &["name", "address"];
    const SELECT: &'static str = "SELECT stores.id, stores.name, stores.address FROM stores";

    type Fields = StoreFields;

    fn bind_fields<'q>(query: SqliteQuery<'q>, fields: &StoreFields) -> SqliteQuery<'q> {
        query.bind(fields.name.clone()).bind(fields.address.clone())
    }
}
