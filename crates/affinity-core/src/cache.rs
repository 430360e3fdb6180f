//! Team result cache
//!
//! Optional memoization of [`TeamAffinityResult`]s. Keys are the sorted,
//! deduplicated member-id set, so `[a, b]` and `[b, a]` share an entry.
//! Capacity is bounded; the oldest entry is evicted first.
//!
//! Entries are tagged with the directory generation they were computed
//! against. A lookup or insert under a different generation empties the
//! cache first, so a result never outlives the roster it was built from.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

use crate::team::TeamAffinityResult;
use crate::types::MemberId;

/// Order-independent cache key
pub type TeamKey = Vec<MemberId>;

/// Canonical key for a member set
pub fn team_key(ids: &[MemberId]) -> TeamKey {
    let mut key = ids.to_vec();
    key.sort();
    key.dedup();
    key
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    entries: HashMap<TeamKey, TeamAffinityResult>,
    order: VecDeque<TeamKey>,
}

impl Inner {
    fn sync_generation(&mut self, generation: u64) {
        if self.generation != generation {
            self.entries.clear();
            self.order.clear();
            self.generation = generation;
        }
    }
}

/// Bounded, thread-safe cache of team results
#[derive(Debug)]
pub struct TeamCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl TeamCache {
    /// A cache holding at most `capacity` results; 0 disables caching
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Cached result for `ids`, if computed against `generation`
    pub fn get(&self, ids: &[MemberId], generation: u64) -> Option<TeamAffinityResult> {
        if !self.is_enabled() {
            return None;
        }
        let mut inner = self.inner.lock();
        inner.sync_generation(generation);
        inner.entries.get(&team_key(ids)).cloned()
    }

    pub fn insert(&self, ids: &[MemberId], generation: u64, result: TeamAffinityResult) {
        if !self.is_enabled() {
            return;
        }
        let key = team_key(ids);
        let mut inner = self.inner.lock();
        inner.sync_generation(generation);

        if inner.entries.insert(key.clone(), result).is_none() {
            inner.order.push_back(key);
        }
        while inner.entries.len() > self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Drop every cached team containing `id`
    pub fn invalidate_member(&self, id: MemberId) {
        let mut inner = self.inner.lock();
        inner.entries.retain(|key, _| key.binary_search(&id).is_err());
        let Inner { entries, order, .. } = &mut *inner;
        order.retain(|key| entries.contains_key(key));
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
