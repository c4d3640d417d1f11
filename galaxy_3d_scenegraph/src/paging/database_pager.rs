/// DatabasePager - worker threads servicing load requests
///
/// Requests posted by traversals are moved from the coordinator's channel
/// into one priority heap shared by every worker. Each request moved in
/// also posts a ready token, and whichever worker is idle takes a token
/// and loads the highest priority request, one at a time. Stale requests
/// are abandoned without loading. Results are published through
/// `PagingCoordinator::complete_load`.

use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use crossbeam_channel::{self as channel, Receiver, Sender, TryRecvError};
use crate::error::{Error, Result};
use crate::{engine_info, engine_error};
use super::coordinator::{LoadRequest, PagingCoordinator, SubgraphLoader};

/// Background loading facility
pub struct DatabasePager {
    coordinator: PagingCoordinator,
    /// Dropping the sender wakes and stops every worker
    shutdown: Option<Sender<()>>,
    queue: Arc<SharedQueue>,
    workers: Vec<JoinHandle<()>>,
}

impl DatabasePager {
    /// Spawn `worker_threads` workers servicing `coordinator`'s requests
    pub fn start(
        coordinator: PagingCoordinator,
        loader: Arc<dyn SubgraphLoader>,
        worker_threads: usize,
    ) -> Result<Self> {
        if worker_threads == 0 {
            return Err(Error::InitializationFailed(
                "DatabasePager needs at least one worker thread".to_string(),
            ));
        }

        let (shutdown_sender, shutdown_receiver) = channel::bounded::<()>(0);
        let queue = Arc::new(SharedQueue::new());
        let mut pager = Self {
            coordinator: coordinator.clone(),
            shutdown: Some(shutdown_sender),
            queue: queue.clone(),
            workers: Vec::with_capacity(worker_threads),
        };

        for index in 0..worker_threads {
            let worker = Worker {
                coordinator: coordinator.clone(),
                loader: loader.clone(),
                requests: coordinator.requests(),
                shutdown: shutdown_receiver.clone(),
                queue: queue.clone(),
            };
            let handle = thread::Builder::new()
                .name(format!("galaxy3d-pager-{}", index))
                .spawn(move || worker.run())
                .map_err(|e| {
                    Error::InitializationFailed(format!("Failed to spawn pager worker {}: {}", index, e))
                })?;
            pager.workers.push(handle);
        }

        engine_info!("galaxy3d::DatabasePager", "Started {} worker thread(s)", worker_threads);
        Ok(pager)
    }

    pub fn coordinator(&self) -> &PagingCoordinator {
        &self.coordinator
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stop all workers and wait for them
    ///
    /// A load already running finishes and is published. Requests already
    /// moved into the shared heap are abandoned; requests still in the
    /// channel stay queued for the next pager.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if self.shutdown.take().is_none() {
            return;
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                engine_error!("galaxy3d::DatabasePager", "Pager worker panicked");
            }
        }
        for request in self.queue.take_all() {
            self.coordinator.abandon_request(&request);
        }
        engine_info!("galaxy3d::DatabasePager", "Stopped");
    }
}

impl Drop for DatabasePager {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Priority heap shared by all workers of one pager
///
/// Every request pushed posts exactly one token on `ready`, so the number
/// of tokens never falls below the number of queued requests.
struct SharedQueue {
    heap: Mutex<BinaryHeap<LoadRequest>>,
    ready_sender: Sender<()>,
    ready: Receiver<()>,
}

impl SharedQueue {
    fn new() -> Self {
        let (ready_sender, ready) = channel::unbounded();
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            ready_sender,
            ready,
        }
    }

    fn push(&self, request: LoadRequest) {
        self.lock().push(request);
        // The queue owns a receiver, so the token channel never disconnects.
        let _ = self.ready_sender.send(());
    }

    fn pop(&self) -> Option<LoadRequest> {
        self.lock().pop()
    }

    fn take_all(&self) -> Vec<LoadRequest> {
        self.lock().drain().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BinaryHeap<LoadRequest>> {
        self.heap.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct Worker {
    coordinator: PagingCoordinator,
    loader: Arc<dyn SubgraphLoader>,
    requests: Receiver<LoadRequest>,
    shutdown: Receiver<()>,
    queue: Arc<SharedQueue>,
}

impl Worker {
    fn run(self) {
        loop {
            crossbeam_channel::select! {
                recv(self.shutdown) -> _ => return,
                recv(self.requests) -> request => match request {
                    Ok(request) => {
                        self.queue.push(request);
                        self.drain();
                    }
                    Err(_) => return,
                },
                recv(self.queue.ready) -> _ => {
                    if self.stopping() {
                        return;
                    }
                    if let Some(request) = self.queue.pop() {
                        self.coordinator.service(&request, self.loader.as_ref());
                    }
                },
            }
        }
    }

    /// Move everything queued in the channel into the shared heap
    fn drain(&self) {
        for request in self.requests.try_iter() {
            self.queue.push(request);
        }
    }

    fn stopping(&self) -> bool {
        !matches!(self.shutdown.try_recv(), Err(TryRecvError::Empty))
    }
}

#[cfg(test)]
#[path = "database_pager_tests.rs"]
mod tests;
