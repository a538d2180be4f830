//! In-memory repository implementations.
//!
//! Used by the `memory` database backend and by tests that exercise the
//! HTTP surface without a database file. Semantics match the SQLite
//! repositories: same ordering, same soft-delete behaviour, same
//! not-found and conflict errors.

mod auth;
mod certification;
mod experience;
mod project;

use std::collections::BTreeMap;

use tokio::sync::RwLock;

pub use auth::MemoryAuthRepository;
pub use certification::MemoryCertificationRepository;
pub use experience::MemoryExperienceRepository;
pub use project::MemoryProjectRepository;

/// Rows keyed by an auto-incrementing id.
#[derive(Debug)]
pub(crate) struct MemoryTable<T> {
    inner: RwLock<TableState<T>>,
}

#[derive(Debug)]
struct TableState<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T: Clone> MemoryTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(TableState {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Insert the row built from a freshly assigned id.
    pub(crate) async fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let mut state = self.inner.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let row = build(id);
        state.rows.insert(id, row.clone());
        row
    }

    pub(crate) async fn get(&self, id: i64) -> Option<T> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    pub(crate) async fn all(&self) -> Vec<T> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    /// Run `apply` against the row with `id`; returns the updated row.
    pub(crate) async fn modify(&self, id: i64, apply: impl FnOnce(&mut T) -> bool) -> Option<T> {
        let mut state = self.inner.write().await;
        let row = state.rows.get_mut(&id)?;
        if apply(row) { Some(row.clone()) } else { None }
    }

    pub(crate) async fn remove(&self, id: i64) -> bool {
        self.inner.write().await.rows.remove(&id).is_some()
    }

    /// Whether any row satisfies `predicate`.
    pub(crate) async fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.inner.read().await.rows.values().any(predicate)
    }
}
