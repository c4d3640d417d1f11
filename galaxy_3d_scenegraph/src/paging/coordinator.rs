/// PagingCoordinator - residency decisions for paged subgraphs
///
/// The traversal asks the coordinator for the residency of a key, touches
/// entries it wants, and posts load requests. Requests travel over a
/// channel to a loading facility (usually a `DatabasePager`), which reports
/// back through `complete_load`. Nothing here blocks on a load, and no lock
/// is held while a request is sent.

use std::cmp::Ordering as CmpOrdering;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use crossbeam_channel::{self as channel, Receiver, Sender};
use crate::error::{Error, Result};
use crate::node::NodeRef;
use crate::{engine_debug, engine_warn};
use super::residency::{PagingKey, Residency, ResidencyStatus, ResidencyTable};

/// Paging frame-count policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    /// Frames a Resident entry may go untouched before it expires
    pub expiry_frames: u64,
    /// Frames to wait after a failed load before requesting again
    pub retry_backoff_frames: u64,
    /// Frames a queued request may go untouched before it is abandoned
    pub stale_request_frames: u64,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            expiry_frames: 60,
            retry_backoff_frames: 30,
            stale_request_frames: 120,
        }
    }
}

/// Asynchronous load request for one external subgraph
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub key: PagingKey,
    /// Higher is loaded first
    pub priority: f32,
    /// Frame the request was posted in
    pub frame: u64,
}

impl PartialEq for LoadRequest {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for LoadRequest {}

impl PartialOrd for LoadRequest {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

/// Max-heap order: highest priority first, then oldest request first
impl Ord for LoadRequest {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.frame.cmp(&self.frame))
    }
}

struct CoordinatorInner {
    policy: PagingPolicy,
    table: ResidencyTable,
    sender: Sender<LoadRequest>,
    receiver: Receiver<LoadRequest>,
    /// Latest frame seen through touch/request/update
    current_frame: AtomicU64,
}

/// Shared residency coordinator
///
/// Cloning is cheap and every clone sees the same table, so traversals and
/// loader threads each hold their own handle.
#[derive(Clone)]
pub struct PagingCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl PagingCoordinator {
    pub fn new(policy: PagingPolicy) -> Self {
        let (sender, receiver) = channel::unbounded();
        Self {
            inner: Arc::new(CoordinatorInner {
                policy,
                table: ResidencyTable::new(),
                sender,
                receiver,
                current_frame: AtomicU64::new(0),
            }),
        }
    }

    pub fn policy(&self) -> &PagingPolicy {
        &self.inner.policy
    }

    pub fn current_frame(&self) -> u64 {
        self.inner.current_frame.load(Ordering::Acquire)
    }

    fn observe_frame(&self, frame: u64) {
        self.inner.current_frame.fetch_max(frame, Ordering::AcqRel);
    }

    /// Residency and cached root of `key`
    ///
    /// Unknown keys report `Unloaded`.
    pub fn residency_for(&self, key: &PagingKey) -> ResidencyStatus {
        match self.inner.table.get(key) {
            Some(entry) => entry.status(),
            None => ResidencyStatus::unloaded(),
        }
    }

    /// Mark `key` as used in `frame`
    pub fn touch(&self, key: &PagingKey, frame: u64) {
        self.observe_frame(frame);
        if let Some(entry) = self.inner.table.get(key) {
            entry.touch(frame);
        }
    }

    /// Request an asynchronous load of `key`
    ///
    /// Creates the entry on first use. Only an Unloaded entry outside its
    /// failure backoff is moved to Loading and posted; every other state is
    /// a no-op. Returns whether a new request was posted.
    pub fn request_load(&self, key: &PagingKey, priority: f32, frame: u64) -> bool {
        self.observe_frame(frame);
        let entry = self.inner.table.get_or_insert(key, frame);
        entry.touch(frame);
        if !entry.begin_load(frame) {
            return false;
        }

        let request = LoadRequest {
            key: key.clone(),
            priority,
            frame,
        };
        // The coordinator owns a receiver, so the channel never disconnects.
        if self.inner.sender.send(request).is_err() {
            entry.abandon_load();
            return false;
        }
        engine_debug!("galaxy3d::PagingCoordinator", "Load requested for '{}' (priority {:.3})", key, priority);
        true
    }

    /// Publish the outcome of a load
    ///
    /// Success moves a Loading entry to Resident. Failure returns it to
    /// Unloaded and blocks new requests for `retry_backoff_frames`. Results
    /// for entries no longer Loading (abandoned requests) are dropped.
    pub fn complete_load(&self, key: &PagingKey, result: Result<NodeRef>) {
        let Some(entry) = self.inner.table.get(key) else {
            engine_warn!("galaxy3d::PagingCoordinator", "Load completed for unknown key '{}'", key);
            return;
        };

        match result {
            Ok(root) => {
                if entry.complete_load(root) {
                    engine_debug!("galaxy3d::PagingCoordinator", "'{}' is now resident", key);
                }
            }
            Err(error) => {
                let retry_after = self.current_frame() + self.inner.policy.retry_backoff_frames;
                if entry.fail_load(retry_after) {
                    engine_warn!("galaxy3d::PagingCoordinator",
                        "Load of '{}' failed, retrying after frame {}: {}", key, retry_after, error);
                }
            }
        }
    }

    /// Whether a request still matters
    ///
    /// A request is stale once its entry left Loading or has gone untouched
    /// for more than `stale_request_frames`.
    pub fn is_request_current(&self, request: &LoadRequest) -> bool {
        let Some(entry) = self.inner.table.get(&request.key) else {
            return false;
        };
        if entry.residency() != Residency::Loading {
            return false;
        }
        let idle = self.current_frame().saturating_sub(entry.last_used_frame());
        idle <= self.inner.policy.stale_request_frames
    }

    /// Drop an in-flight request, returning its entry to Unloaded
    pub fn abandon_request(&self, request: &LoadRequest) {
        if let Some(entry) = self.inner.table.get(&request.key) {
            if entry.abandon_load() {
                engine_debug!("galaxy3d::PagingCoordinator", "Abandoned stale request for '{}'", request.key);
            }
        }
    }

    /// Advance to `frame`, expiring Resident entries unused for `expiry_frames`
    ///
    /// Returns the number of entries that expired.
    pub fn update(&self, frame: u64) -> usize {
        self.observe_frame(frame);
        let expiry = self.inner.policy.expiry_frames;
        let expired = self
            .inner
            .table
            .snapshot()
            .iter()
            .filter(|entry| entry.expire_if_unused(frame, expiry))
            .count();
        if expired > 0 {
            engine_debug!("galaxy3d::PagingCoordinator", "Frame {}: {} entries expired", frame, expired);
        }
        expired
    }

    /// Drop the cached roots of all Expired entries
    ///
    /// Entries left Unloaded, idle for `expiry_frames` and outside their
    /// failure backoff are then removed from the table. Returns the number
    /// of entries evicted.
    pub fn evict_expired(&self) -> usize {
        let evicted = self
            .inner
            .table
            .snapshot()
            .iter()
            .filter(|entry| entry.evict())
            .count();
        let removed = self
            .inner
            .table
            .remove_reclaimable(self.current_frame(), self.inner.policy.expiry_frames);
        if evicted > 0 || removed > 0 {
            engine_debug!("galaxy3d::PagingCoordinator",
                "Evicted {} entries, removed {} idle keys", evicted, removed);
        }
        evicted
    }

    /// Request queue consumed by a loading facility
    pub fn requests(&self) -> Receiver<LoadRequest> {
        self.inner.receiver.clone()
    }

    /// Requests posted but not yet taken by a loading facility
    pub fn pending_request_count(&self) -> usize {
        self.inner.receiver.len()
    }

    /// Number of keys currently tracked
    pub fn entry_count(&self) -> usize {
        self.inner.table.len()
    }

    /// Take one queued request and service it on the calling thread
    ///
    /// Returns `Ok(false)` when the queue is empty.
    pub fn service_next(&self, loader: &dyn SubgraphLoader) -> Result<bool> {
        match self.inner.receiver.try_recv() {
            Ok(request) => {
                self.service(&request, loader);
                Ok(true)
            }
            Err(channel::TryRecvError::Empty) => Ok(false),
            Err(channel::TryRecvError::Disconnected) => Err(Error::PagerShutdown),
        }
    }

    /// Load one request unless it went stale
    pub(crate) fn service(&self, request: &LoadRequest, loader: &dyn SubgraphLoader) {
        if !self.is_request_current(request) {
            self.abandon_request(request);
            return;
        }
        let result = loader.load(&request.key);
        self.complete_load(&request.key, result);
    }
}

impl std::fmt::Debug for PagingCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagingCoordinator")
            .field("policy", &self.inner.policy)
            .field("entries", &self.inner.table.len())
            .field("pending_requests", &self.inner.receiver.len())
            .finish()
    }
}

/// Loading facility producing subgraphs from keys
///
/// Implementations may block (file or network I/O); they run on pager
/// worker threads, never on a traversal thread.
pub trait SubgraphLoader: Send + Sync {
    fn load(&self, key: &PagingKey) -> Result<NodeRef>;
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
