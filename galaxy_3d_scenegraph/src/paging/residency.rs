/// Residency bookkeeping for externally stored subgraphs
///
/// Each `PagedEntry` keeps its residency state and cached root behind one
/// small mutex so readers never observe a state without its root. The
/// last-used frame is a plain atomic since it is written on every visit.

use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use rustc_hash::FxHashMap;
use crate::node::NodeRef;

/// Identifier of an external subgraph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PagingKey(Arc<str>);

impl PagingKey {
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PagingKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for PagingKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl fmt::Display for PagingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Residency state of a paged subgraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    /// Not in memory and no load in flight
    Unloaded,
    /// Load requested, result not yet published
    Loading,
    /// Loaded and usable
    Resident,
    /// Unused long enough to be evicted
    Expired,
}

/// Snapshot of one entry as seen by a traversal
#[derive(Debug, Clone)]
pub struct ResidencyStatus {
    pub residency: Residency,
    /// Set only when `residency` is `Resident`
    pub root: Option<NodeRef>,
}

impl ResidencyStatus {
    pub(crate) fn unloaded() -> Self {
        Self {
            residency: Residency::Unloaded,
            root: None,
        }
    }
}

#[derive(Debug)]
struct EntryState {
    residency: Residency,
    root: Option<NodeRef>,
    /// Frame at which the last load was requested
    requested_frame: u64,
    /// No new request before this frame (failure backoff)
    retry_after_frame: u64,
}

/// Residency record of one external subgraph
#[derive(Debug)]
pub struct PagedEntry {
    key: PagingKey,
    last_used_frame: AtomicU64,
    state: Mutex<EntryState>,
}

impl PagedEntry {
    pub(crate) fn new(key: PagingKey, frame: u64) -> Self {
        Self {
            key,
            last_used_frame: AtomicU64::new(frame),
            state: Mutex::new(EntryState {
                residency: Residency::Unloaded,
                root: None,
                requested_frame: 0,
                retry_after_frame: 0,
            }),
        }
    }

    pub fn key(&self) -> &PagingKey {
        &self.key
    }

    pub fn last_used_frame(&self) -> u64 {
        self.last_used_frame.load(Ordering::Acquire)
    }

    pub fn residency(&self) -> Residency {
        self.lock().residency
    }

    pub fn status(&self) -> ResidencyStatus {
        let state = self.lock();
        ResidencyStatus {
            residency: state.residency,
            root: state.root.clone(),
        }
    }

    /// Record a visit; last-used frames never move backwards
    pub(crate) fn touch(&self, frame: u64) {
        self.last_used_frame.fetch_max(frame, Ordering::AcqRel);
    }

    /// Unloaded -> Loading, unless a failure backoff is still running
    pub(crate) fn begin_load(&self, frame: u64) -> bool {
        let mut state = self.lock();
        if state.residency != Residency::Unloaded || frame < state.retry_after_frame {
            return false;
        }
        state.residency = Residency::Loading;
        state.requested_frame = frame;
        true
    }

    /// Loading -> Resident. Results for abandoned requests are dropped.
    pub(crate) fn complete_load(&self, root: NodeRef) -> bool {
        let mut state = self.lock();
        if state.residency != Residency::Loading {
            return false;
        }
        state.root = Some(root);
        state.residency = Residency::Resident;
        true
    }

    /// Loading -> Unloaded with a retry backoff
    pub(crate) fn fail_load(&self, retry_after_frame: u64) -> bool {
        let mut state = self.lock();
        if state.residency != Residency::Loading {
            return false;
        }
        state.residency = Residency::Unloaded;
        state.retry_after_frame = retry_after_frame;
        true
    }

    /// Loading -> Unloaded without backoff (request abandoned as stale)
    pub(crate) fn abandon_load(&self) -> bool {
        let mut state = self.lock();
        if state.residency != Residency::Loading {
            return false;
        }
        state.residency = Residency::Unloaded;
        true
    }

    /// Resident -> Expired when unused for more than `expiry_frames`
    pub(crate) fn expire_if_unused(&self, frame: u64, expiry_frames: u64) -> bool {
        let last_used = self.last_used_frame();
        let mut state = self.lock();
        if state.residency != Residency::Resident || frame.saturating_sub(last_used) < expiry_frames {
            return false;
        }
        state.residency = Residency::Expired;
        true
    }

    /// Expired -> Unloaded, dropping the cached root
    pub(crate) fn evict(&self) -> bool {
        let mut state = self.lock();
        if state.residency != Residency::Expired {
            return false;
        }
        state.root = None;
        state.residency = Residency::Unloaded;
        true
    }

    /// Unloaded, idle for at least `expiry_frames` and outside any failure backoff
    pub(crate) fn is_reclaimable(&self, frame: u64, expiry_frames: u64) -> bool {
        let last_used = self.last_used_frame();
        let state = self.lock();
        state.residency == Residency::Unloaded
            && frame.saturating_sub(last_used) >= expiry_frames
            && frame >= state.retry_after_frame
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EntryState> {
        // Every critical section leaves EntryState consistent, so a
        // poisoned lock still holds valid data.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Concurrent map from key to entry
///
/// Lookups take the read lock and clone the entry handle; the write lock
/// is only taken to insert a key seen for the first time.
#[derive(Debug, Default)]
pub struct ResidencyTable {
    entries: RwLock<FxHashMap<PagingKey, Arc<PagedEntry>>>,
}

impl ResidencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PagingKey) -> Option<Arc<PagedEntry>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    /// Get the entry for `key`, creating it (Unloaded, used at `frame`) if absent
    pub fn get_or_insert(&self, key: &PagingKey, frame: u64) -> Arc<PagedEntry> {
        if let Some(entry) = self.get(key) {
            return entry;
        }
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries
            .entry(key.clone())
            .or_insert_with(|| Arc::new(PagedEntry::new(key.clone(), frame)))
            .clone()
    }

    /// Drop every reclaimable entry nobody else holds a handle to
    ///
    /// Runs under the write lock, so no new handle can be cloned out while
    /// an entry is checked. Returns the number of entries removed.
    pub fn remove_reclaimable(&self, frame: u64, expiry_frames: u64) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| {
            Arc::strong_count(entry) > 1 || !entry.is_reclaimable(frame, expiry_frames)
        });
        before - entries.len()
    }

    /// Handles to every entry, taken under a single read lock
    pub fn snapshot(&self) -> Vec<Arc<PagedEntry>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "residency_tests.rs"]
mod tests;
