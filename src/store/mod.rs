//! Persistence seam for dummy items.
//!
//! Route handlers and the import pipeline talk to a [`DummyStore`] trait object
//! held in Rocket state, so the PostgreSQL-backed store can be swapped for the
//! in-memory one in tests.

mod memory;
mod postgres;

pub use memory::MemoryDummyStore;
pub use postgres::PgDummyStore;

use crate::models::{Dummy, NewDummy};
use rocket_db_pools::sqlx;
use std::sync::Arc;
use thiserror::Error;

/// Store handle managed by Rocket.
pub type SharedStore = Arc<dyn DummyStore>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`DummyStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused this particular record (constraint violation).
    #[error("rejected by store: {0}")]
    Rejected(String),
    /// The store could not be reached or is shutting down.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    /// True when the failure is attributable to the record being written
    /// rather than to the store itself.
    pub fn is_record_specific(&self) -> bool {
        matches!(self, StoreError::Rejected(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // SQLSTATE class 23: integrity constraint violation
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|code| code.starts_with("23")) =>
            {
                StoreError::Rejected(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("timed out waiting for a connection".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::Unavailable("pool closed".to_string()),
            sqlx::Error::Io(io_err) => StoreError::Unavailable(io_err.to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// CRUD operations over the dummy collection.
#[rocket::async_trait]
pub trait DummyStore: Send + Sync {
    /// Page through dummies ordered by id.
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Dummy>>;

    async fn count(&self) -> StoreResult<i64>;

    async fn get(&self, id: i32) -> StoreResult<Option<Dummy>>;

    /// Insert a new dummy as a single unit of work; the store assigns the id.
    async fn create(&self, dummy: &NewDummy) -> StoreResult<Dummy>;

    /// Replace both fields of an existing dummy. `None` when the id is unknown.
    async fn update(&self, id: i32, dummy: &NewDummy) -> StoreResult<Option<Dummy>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: i32) -> StoreResult<bool>;
}
