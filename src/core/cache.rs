//! Per-client request cache.
//!
//! Every provider request is identified by its fully-qualified key (an
//! endpoint path or a complete URL). The first lookup of a key performs the
//! fetch; later lookups are served from memory for as long as the owning
//! client lives or until [`RequestCache::clear`] is called.
//!
//! The cache is plain instance state behind `&mut self`; it has no interior
//! locking and is never shared between clients.

use std::collections::HashMap;
use std::future::Future;

use tracing::debug;

use crate::{core::table::Table, Result};

/// Result of one provider request after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The request returned at least one row.
    Loaded(Table),
    /// The request succeeded but returned no rows.
    Empty,
    /// The provider answered with a non-success status.
    Failed { status: u16 },
}

impl FetchOutcome {
    pub fn table(&self) -> Option<&Table> {
        match self {
            FetchOutcome::Loaded(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            FetchOutcome::Loaded(table) => Some(table),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed { .. })
    }
}

#[derive(Debug, Default)]
pub struct RequestCache {
    entries: HashMap<String, FetchOutcome>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored outcome for `key`, or run `fetch`, store its result
    /// and return it. Every outcome is stored, failures included; only
    /// [`RequestCache::clear`] makes a key fetch again. Errors are not stored.
    pub async fn get_or_fetch<F, Fut>(&mut self, key: &str, fetch: F) -> Result<FetchOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FetchOutcome>>,
    {
        if let Some(hit) = self.entries.get(key) {
            debug!(%key, "cache hit");
            return Ok(hit.clone());
        }

        debug!(%key, "cache miss");
        let outcome = fetch().await?;
        self.entries.insert(key.to_string(), outcome.clone());
        Ok(outcome)
    }

    pub fn get(&self, key: &str) -> Option<&FetchOutcome> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every entry. Subsequent lookups fetch again.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
