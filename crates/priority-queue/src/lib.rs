//! The priority request queue of the bridge.
//!
//! Layer-1 requests are appended with a serial id and an expiration block, and consumed strictly
//! in serial id order by committed blocks. Consumed requests are dropped from the queue, which
//! only holds the pending window.

mod error;
pub use error::PriorityQueueError;

mod metrics;
pub use metrics::PriorityQueueMetrics;

mod shared;
pub use shared::SharedPriorityQueue;

use bridge_codec::{Deposit, FullExit, OperationKind};
use bridge_primitives::{BridgeConfig, L1Origin, PriorityQueueEvent, PriorityRequest};
use std::collections::VecDeque;

use alloy_primitives::Bytes;

/// The outcome of a successful enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enqueued {
    /// The queued request.
    pub request: PriorityRequest,
    /// The notifications for downstream observers.
    pub events: Vec<PriorityQueueEvent>,
}

/// An append only queue of priority requests, consumed in FIFO order.
#[derive(Debug, Clone)]
pub struct PriorityQueue {
    /// The pending requests. The front request holds the first unprocessed serial id.
    pending: VecDeque<PriorityRequest>,
    /// The amount of requests ever enqueued.
    total_open_requests: u64,
    /// The amount of requests consumed by committed blocks.
    total_committed_requests: u64,
    /// The amount of blocks a request can wait before expiring.
    expiration_window: u64,
    /// The metrics of the queue.
    metrics: PriorityQueueMetrics,
}

impl PriorityQueue {
    /// Returns a new empty queue.
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            pending: VecDeque::new(),
            total_open_requests: 0,
            total_committed_requests: 0,
            expiration_window: config.expiration_window,
            metrics: PriorityQueueMetrics::default(),
        }
    }

    /// Appends a priority request and returns it along with the notifications to emit.
    ///
    /// The pubdata must be the priority encoding of a deposit or a full exit. The request expires
    /// once `current_block + expiration_window` has passed.
    pub fn enqueue(
        &mut self,
        op_type: OperationKind,
        pubdata: Bytes,
        current_block: u64,
        origin: L1Origin,
    ) -> Result<Enqueued, PriorityQueueError> {
        let expected = op_type
            .priority_pubdata_length()
            .ok_or(PriorityQueueError::InvalidRequestType(op_type))?;
        if pubdata.len() != expected {
            return Err(PriorityQueueError::InvalidRequestLength {
                op_type,
                expected,
                got: pubdata.len(),
            })
        }
        if pubdata[0] != op_type.tag() {
            return Err(PriorityQueueError::TagMismatch { op_type, got: pubdata[0] })
        }

        let request = PriorityRequest {
            serial_id: self.total_open_requests,
            op_type,
            pubdata,
            expiration_block: current_block.saturating_add(self.expiration_window),
            origin,
        };
        self.total_open_requests += 1;
        self.pending.push_back(request.clone());

        tracing::debug!(
            target: "bridge::priority_queue",
            serial_id = request.serial_id,
            %op_type,
            expiration_block = request.expiration_block,
            sender = %request.origin.sender,
            "enqueued priority request"
        );
        self.metrics.enqueued_requests.increment(1);
        self.metrics.pending_requests.set(self.pending.len() as f64);

        let events = vec![PriorityQueueEvent::from(&request)];
        Ok(Enqueued { request, events })
    }

    /// Enqueues a deposit request.
    pub fn request_deposit(
        &mut self,
        deposit: &Deposit,
        current_block: u64,
        origin: L1Origin,
    ) -> Result<Enqueued, PriorityQueueError> {
        self.enqueue(OperationKind::Deposit, deposit.priority_pubdata(), current_block, origin)
    }

    /// Enqueues a full exit request.
    pub fn request_full_exit(
        &mut self,
        full_exit: &FullExit,
        current_block: u64,
        origin: L1Origin,
    ) -> Result<Enqueued, PriorityQueueError> {
        self.enqueue(OperationKind::FullExit, full_exit.priority_pubdata(), current_block, origin)
    }

    /// Returns the first unprocessed request, if any.
    pub fn peek_next(&self) -> Option<&PriorityRequest> {
        self.pending.front()
    }

    /// Returns the pending request with the provided serial id. Consumed and unknown serial ids
    /// return [`None`].
    pub fn get(&self, serial_id: u64) -> Option<&PriorityRequest> {
        let index = serial_id.checked_sub(self.total_committed_requests)?;
        self.pending.get(usize::try_from(index).ok()?)
    }

    /// Returns an iterator over the pending requests in serial id order.
    pub fn pending(&self) -> impl Iterator<Item = &PriorityRequest> {
        self.pending.iter()
    }

    /// Consumes the next `count` requests.
    ///
    /// Fails without any effect if fewer than `count` requests are pending or if any of them has
    /// expired at `current_block`.
    pub fn advance(&mut self, count: u64, current_block: u64) -> Result<(), PriorityQueueError> {
        let pending = self.pending_count();
        if count > pending {
            return Err(PriorityQueueError::AdvanceOverflow { count, pending })
        }
        // count <= pending, which is a usize.
        let count_usize = count as usize;
        if let Some(expired) =
            self.pending.iter().take(count_usize).find(|request| request.is_expired(current_block))
        {
            return Err(PriorityQueueError::RequestExpired {
                serial_id: expired.serial_id,
                expiration_block: expired.expiration_block,
                current_block,
            })
        }

        self.pending.drain(..count_usize);
        self.total_committed_requests += count;

        tracing::trace!(
            target: "bridge::priority_queue",
            count,
            total_committed_requests = self.total_committed_requests,
            "advanced priority queue"
        );
        self.metrics.committed_requests.increment(count);
        self.metrics.pending_requests.set(self.pending.len() as f64);

        Ok(())
    }

    /// Returns true if the first unprocessed request has expired at `current_block`. No later
    /// request can be committed until it is settled.
    pub fn head_expired(&self, current_block: u64) -> bool {
        self.peek_next().is_some_and(|request| request.is_expired(current_block))
    }

    /// Returns the amount of requests ever enqueued.
    pub const fn total_open_requests(&self) -> u64 {
        self.total_open_requests
    }

    /// Returns the amount of requests consumed by committed blocks.
    pub const fn total_committed_requests(&self) -> u64 {
        self.total_committed_requests
    }

    /// Returns the serial id of the first unprocessed request.
    pub const fn first_unprocessed_serial_id(&self) -> u64 {
        self.total_committed_requests
    }

    /// Returns the amount of pending requests.
    pub const fn pending_count(&self) -> u64 {
        self.total_open_requests - self.total_committed_requests
    }

    /// Returns true if no request is pending.
    pub const fn is_empty(&self) -> bool {
        self.pending_count() == 0
    }

    /// Returns the expiration window of the queue.
    pub const fn expiration_window(&self) -> u64 {
        self.expiration_window
    }
}

impl Default for PriorityQueue {
    fn default() -> Self {
        Self::new(&BridgeConfig::default())
    }
}
