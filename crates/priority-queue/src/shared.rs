use crate::{Enqueued, PriorityQueue, PriorityQueueError};
use bridge_codec::OperationKind;
use bridge_primitives::L1Origin;
use std::sync::Arc;

use alloy_primitives::Bytes;
use parking_lot::{Mutex, MutexGuard};

/// A priority queue shared between request ingress and block commitment.
///
/// Every mutation runs under a single lock: concurrent enqueues each receive a distinct serial
/// id, and block commits holding the guard exclude each other.
#[derive(Debug, Clone, Default)]
pub struct SharedPriorityQueue {
    inner: Arc<Mutex<PriorityQueue>>,
}

impl SharedPriorityQueue {
    /// Returns a new shared handle over the queue.
    pub fn new(queue: PriorityQueue) -> Self {
        Self { inner: Arc::new(Mutex::new(queue)) }
    }

    /// Enqueues a priority request. See [`PriorityQueue::enqueue`].
    pub fn enqueue(
        &self,
        op_type: OperationKind,
        pubdata: Bytes,
        current_block: u64,
        origin: L1Origin,
    ) -> Result<Enqueued, PriorityQueueError> {
        self.inner.lock().enqueue(op_type, pubdata, current_block, origin)
    }

    /// Locks the queue for exclusive access, typically for the duration of a block commit.
    pub fn lock(&self) -> MutexGuard<'_, PriorityQueue> {
        self.inner.lock()
    }

    /// Returns the amount of requests consumed by committed blocks.
    pub fn total_committed_requests(&self) -> u64 {
        self.inner.lock().total_committed_requests()
    }
}
