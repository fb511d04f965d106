//! Memoization of expansion histories keyed by the exact parameter tuple.
//!
//! Construction (grid evaluation + integration + interpolator build) dominates the
//! cost of a request. Fixed best-fit parameter sets recur on every request, so the
//! cache hands out shared `Arc<ExpansionHistory>` handles instead of rebuilding.
//!
//! Failed constructions are not cached: the error is returned to the caller and the
//! next request with the same tuple fails the same way.
//!
//! Entries are never evicted: the cache holds one engine per distinct tuple for as
//! long as it lives. Callers sweeping many parameter sets should use a short-lived
//! cache per sweep or call [`EngineCache::clear`] between batches.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::trace;

use crate::domain::{ModelParameters, ParamKey};
use crate::engine::expansion::ExpansionHistory;
use crate::error::CosmoResult;
use crate::grid::RedshiftGrid;

#[derive(Debug)]
pub struct EngineCache {
    grid: Arc<RedshiftGrid>,
    entries: Mutex<HashMap<ParamKey, Arc<ExpansionHistory>>>,
}

impl EngineCache {
    pub fn new(grid: Arc<RedshiftGrid>) -> Self {
        Self {
            grid,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn grid(&self) -> &Arc<RedshiftGrid> {
        &self.grid
    }

    /// Return the cached history for `params`, building it on first use.
    pub fn get_or_build(&self, params: &ModelParameters) -> CosmoResult<Arc<ExpansionHistory>> {
        let key = params.key();
        if let Some(hit) = self.lock().get(&key) {
            trace!(?key, "expansion history cache hit");
            return Ok(Arc::clone(hit));
        }

        // Build outside the lock; concurrent builders of the same tuple race and the
        // first insert wins, which is harmless because construction is deterministic.
        trace!(?key, "expansion history cache miss");
        let built = Arc::new(ExpansionHistory::new(*params, Arc::clone(&self.grid))?);
        let mut entries = self.lock();
        let entry = entries.entry(key).or_insert(built);
        Ok(Arc::clone(entry))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached engine. Handles already given out stay valid.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ParamKey, Arc<ExpansionHistory>>> {
        // Entries are immutable once inserted, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
