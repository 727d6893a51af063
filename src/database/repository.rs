use sqlx::SqlitePool;
use std::marker::PhantomData;

use crate::database::manager::DatabaseError;
use crate::database::models::Entity;

/// Data access for one table. Every write commits before returning.
pub struct Repository<E> {
    pool: SqlitePool,
    _phantom: PhantomData<fn() -> E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    pub async fn select_all(&self) -> Result<Vec<E>, DatabaseError> {
        let sql = format!("{} ORDER BY {}.id", E::SELECT, E::TABLE);
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<E>, DatabaseError> {
        let sql = format!("{} WHERE {}.id = ?", E::SELECT, E::TABLE);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", E::TABLE);
        let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(count > 0)
    }

    /// Insert a row and return its generated id
    pub async fn insert(&self, fields: &E::Fields) -> Result<i64, DatabaseError> {
        let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders
        );
        let result = E::bind_fields(sqlx::query(&sql), fields)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite the mutable columns. Returns false when no row has `id`.
    pub async fn update(&self, id: i64, fields: &E::Fields) -> Result<bool, DatabaseError> {
        let assignments = E::COLUMNS
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", E::TABLE, assignments);
        let result = E::bind_fields(sqlx::query(&sql), fields)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard delete. Returns false when no row has `id`.
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
