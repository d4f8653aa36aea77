use super::{DummyStore, StoreError, StoreResult};
use crate::models::{Dummy, NewDummy};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};

#[derive(Default)]
struct MemoryState {
    next_id: i32,
    rows: BTreeMap<i32, Dummy>,
    rejected_names: HashSet<String>,
    unavailable: bool,
    outage_after: Option<usize>,
    writes: usize,
}

/// In-process [`DummyStore`] used by tests and local experiments.
///
/// Names registered with [`MemoryDummyStore::reject_name`] fail with
/// [`StoreError::Rejected`]; [`MemoryDummyStore::set_unavailable`] makes every
/// write fail with [`StoreError::Unavailable`], and
/// [`MemoryDummyStore::fail_after_writes`] does the same once that many
/// creates have succeeded.
#[derive(Default)]
pub struct MemoryDummyStore {
    state: Mutex<MemoryState>,
}

impl MemoryDummyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_name(&self, name: impl Into<String>) {
        self.state.lock().rejected_names.insert(name.into());
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }

    pub fn fail_after_writes(&self, writes: usize) {
        self.state.lock().outage_after = Some(writes);
    }

    /// Snapshot of every stored dummy in id order.
    pub fn all(&self) -> Vec<Dummy> {
        self.state.lock().rows.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemoryState {
    fn check_writable(&self, dummy: &NewDummy) -> StoreResult<()> {
        let outage = self.outage_after.is_some_and(|limit| self.writes >= limit);
        if self.unavailable || outage {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        if self.rejected_names.contains(&dummy.name) {
            return Err(StoreError::Rejected(format!(
                "name '{}' is not accepted",
                dummy.name
            )));
        }
        Ok(())
    }
}

#[rocket::async_trait]
impl DummyStore for MemoryDummyStore {
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Dummy>> {
        let state = self.state.lock();
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(state.rows.values().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.state.lock().rows.len() as i64)
    }

    async fn get(&self, id: i32) -> StoreResult<Option<Dummy>> {
        Ok(self.state.lock().rows.get(&id).cloned())
    }

    async fn create(&self, dummy: &NewDummy) -> StoreResult<Dummy> {
        let mut state = self.state.lock();
        state.check_writable(dummy)?;

        state.next_id += 1;
        state.writes += 1;
        let created = Dummy {
            id: state.next_id,
            name: dummy.name.clone(),
            description: dummy.description.clone(),
            created_at: Some(Utc::now()),
        };
        state.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, dummy: &NewDummy) -> StoreResult<Option<Dummy>> {
        let mut state = self.state.lock();
        state.check_writable(dummy)?;

        Ok(state.rows.get_mut(&id).map(|row| {
            row.name = dummy.name.clone();
            row.description = dummy.description.clone();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let mut state = self.state.lock();
        if state.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(state.rows.remove(&id).is_some())
    }
}
