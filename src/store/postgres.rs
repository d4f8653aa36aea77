use super::{DummyStore, StoreResult};
use crate::models::{Dummy, NewDummy};
use rocket_db_pools::sqlx::{self, PgPool};

/// [`DummyStore`] backed by the `dummies` table.
///
/// Every write is a single autocommitted statement, so a failed insert never
/// rolls back rows written earlier in the same import.
#[derive(Clone)]
pub struct PgDummyStore {
    pool: PgPool,
}

impl PgDummyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[rocket::async_trait]
impl DummyStore for PgDummyStore {
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Dummy>> {
        let dummies = sqlx::query_as::<_, Dummy>(
            r#"SELECT id, name, description, created_at
               FROM dummies
               ORDER BY id ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(dummies)
    }

    async fn count(&self) -> StoreResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dummies")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn get(&self, id: i32) -> StoreResult<Option<Dummy>> {
        let dummy = sqlx::query_as::<_, Dummy>(
            r#"SELECT id, name, description, created_at
               FROM dummies
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dummy)
    }

    async fn create(&self, dummy: &NewDummy) -> StoreResult<Dummy> {
        let created = sqlx::query_as::<_, Dummy>(
            r#"INSERT INTO dummies (name, description)
               VALUES ($1, $2)
               RETURNING id, name, description, created_at"#,
        )
        .bind(&dummy.name)
        .bind(&dummy.description)
        .fetch_one(&self.pool)
        .await?;

        log::debug!("created dummy {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update(&self, id: i32, dummy: &NewDummy) -> StoreResult<Option<Dummy>> {
        let updated = sqlx::query_as::<_, Dummy>(
            r#"UPDATE dummies
               SET name = $1, description = $2
               WHERE id = $3
               RETURNING id, name, description, created_at"#,
        )
        .bind(&dummy.name)
        .bind(&dummy.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM dummies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
