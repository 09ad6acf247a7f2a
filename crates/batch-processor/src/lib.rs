//! The batch processor of the bridge.
//!
//! A committed block carries its pubdata along with the offsets of its onchain operations. The
//! processor decodes every operation and matches each priority operation against the priority
//! queue in serial id order. Matched requests are consumed only once the whole block verified, so
//! a rejected block leaves the queue untouched.

mod error;
pub use error::BatchError;

mod metrics;
pub use metrics::BatchProcessorMetrics;

use bridge_codec::{decode, OperationKind, OperationRecord, PubdataMatcher, TokenId};
use bridge_primitives::{BridgeConfig, PriorityQueueEvent};
use bridge_priority_queue::{PriorityQueue, SharedPriorityQueue};
use std::time::Instant;

use alloy_primitives::{keccak256, Address, Bytes, B256, KECCAK256_EMPTY};

/// A block submitted for commitment.
#[derive(Debug, Clone, Copy)]
pub struct BlockCommit<'a> {
    /// The number of the committed block.
    pub block_number: u64,
    /// The pubdata of the block.
    pub pubdata: &'a [u8],
    /// The ascending offsets of the onchain operations in the pubdata.
    pub offsets: &'a [usize],
}

impl<'a> BlockCommit<'a> {
    /// Returns a new [`BlockCommit`].
    pub const fn new(block_number: u64, pubdata: &'a [u8], offsets: &'a [usize]) -> Self {
        Self { block_number, pubdata, offsets }
    }
}

/// An operation decoded from a committed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnchainOperation {
    /// The offset of the operation in the block pubdata.
    pub offset: usize,
    /// The decoded operation.
    pub record: OperationRecord,
    /// The serial id of the priority request the operation consumed, if any.
    pub serial_id: Option<u64>,
}

/// A layer-1 payout triggered by a committed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    /// The kind of the triggering operation.
    pub kind: OperationKind,
    /// The withdrawn token.
    pub token_id: TokenId,
    /// The withdrawn amount.
    pub amount: u128,
    /// The layer-1 recipient.
    pub recipient: Address,
}

impl Withdrawal {
    /// Returns the withdrawal the record triggers, if any.
    pub const fn from_record(record: &OperationRecord) -> Option<Self> {
        let (kind, token_id, amount, recipient) = match record {
            OperationRecord::Withdraw(op) => {
                (OperationKind::Withdraw, op.token_id, op.amount, op.owner)
            }
            OperationRecord::ForcedExit(op) => {
                (OperationKind::ForcedExit, op.token_id, op.amount, op.target)
            }
            OperationRecord::FullExit(op) => {
                (OperationKind::FullExit, op.token_id, op.amount, op.owner)
            }
            _ => return None,
        };
        Some(Self { kind, token_id, amount, recipient })
    }
}

/// The outcome of a committed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The amount of priority requests the block consumed.
    pub consumed: u64,
    /// The amount of priority requests consumed by all committed blocks.
    pub total_committed_requests: u64,
    /// The operations of the block in offset order.
    pub operations: Vec<OnchainOperation>,
    /// The withdrawals the block triggers.
    pub withdrawals: Vec<Withdrawal>,
    /// The chained hash of the pubdata of the withdrawal operations.
    pub processable_operations_hash: B256,
    /// The notifications for downstream observers.
    pub events: Vec<PriorityQueueEvent>,
}

/// A block which passed verification but has not consumed its requests yet.
#[derive(Debug)]
struct VerifiedBlock {
    consumed: u64,
    operations: Vec<OnchainOperation>,
    withdrawals: Vec<Withdrawal>,
    processable_operations_hash: B256,
}

/// Verifies committed blocks against the priority queue.
#[derive(Debug)]
pub struct BatchProcessor {
    /// The matcher for onchain priority operations.
    matcher: PubdataMatcher,
    /// The metrics of the processor.
    metrics: BatchProcessorMetrics,
}

impl BatchProcessor {
    /// Returns a new [`BatchProcessor`].
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            matcher: PubdataMatcher::new(config.padding_byte),
            metrics: BatchProcessorMetrics::default(),
        }
    }

    /// Processes a block commit against the queue.
    ///
    /// On success the queue has consumed every priority request the block references. On
    /// failure the queue is left unchanged.
    pub fn process(
        &self,
        queue: &mut PriorityQueue,
        commit: BlockCommit<'_>,
    ) -> Result<BatchOutcome, BatchError> {
        let start = Instant::now();
        let result = self.commit(queue, commit);

        match &result {
            Ok(outcome) => {
                tracing::info!(
                    target: "bridge::batch_processor",
                    block_number = commit.block_number,
                    consumed = outcome.consumed,
                    total_committed_requests = outcome.total_committed_requests,
                    operations = outcome.operations.len(),
                    withdrawals = outcome.withdrawals.len(),
                    "committed block"
                );
                self.metrics.committed_blocks.increment(1);
                self.metrics.consumed_priority_operations.increment(outcome.consumed);
            }
            Err(err) => {
                tracing::warn!(
                    target: "bridge::batch_processor",
                    block_number = commit.block_number,
                    reason = err.reason(),
                    %err,
                    "rejected block"
                );
                self.metrics.rejected_blocks.increment(1);
            }
        }
        self.metrics.processing_duration.record(start.elapsed().as_secs_f64());

        result
    }

    /// Processes a block commit while holding the lock of the shared queue.
    pub fn process_shared(
        &self,
        queue: &SharedPriorityQueue,
        commit: BlockCommit<'_>,
    ) -> Result<BatchOutcome, BatchError> {
        self.process(&mut queue.lock(), commit)
    }

    fn commit(
        &self,
        queue: &mut PriorityQueue,
        commit: BlockCommit<'_>,
    ) -> Result<BatchOutcome, BatchError> {
        let verified = self.verify(queue, commit)?;

        let first_serial_id = queue.first_unprocessed_serial_id();
        queue.advance(verified.consumed, commit.block_number)?;

        let events = if verified.consumed > 0 {
            vec![PriorityQueueEvent::PriorityRequestsCommitted {
                first_serial_id,
                count: verified.consumed,
                block_number: commit.block_number,
            }]
        } else {
            vec![]
        };

        Ok(BatchOutcome {
            consumed: verified.consumed,
            total_committed_requests: queue.total_committed_requests(),
            operations: verified.operations,
            withdrawals: verified.withdrawals,
            processable_operations_hash: verified.processable_operations_hash,
            events,
        })
    }

    /// Decodes every operation of the block and matches the priority operations against the
    /// pending requests, without mutating the queue.
    fn verify(
        &self,
        queue: &PriorityQueue,
        commit: BlockCommit<'_>,
    ) -> Result<VerifiedBlock, BatchError> {
        let BlockCommit { block_number, pubdata, offsets } = commit;
        let first_serial_id = queue.first_unprocessed_serial_id();

        let mut consumed = 0u64;
        let mut previous_end = 0;
        let mut operations = Vec::with_capacity(offsets.len());
        let mut withdrawals = Vec::new();
        let mut processable_operations_hash = KECCAK256_EMPTY;

        for (index, &offset) in offsets.iter().enumerate() {
            if offset < previous_end {
                return Err(BatchError::OffsetsNotAscending { offset, previous_end })
            }
            let (record, end) = decode(pubdata, offset)
                .map_err(|source| BatchError::MalformedOperation { offset, source })?;
            previous_end = end;

            let kind = record.kind();
            let serial_id = if kind.is_priority() {
                let serial_id = first_serial_id + consumed;
                let request =
                    queue.get(serial_id).ok_or(BatchError::QueueUnderflow { offset, serial_id })?;
                if request.is_expired(block_number) {
                    return Err(BatchError::RequestExpired {
                        serial_id,
                        expiration_block: request.expiration_block,
                        current_block: block_number,
                    })
                }

                // the onchain slice spans the chunk footprint, bounded by the next operation and
                // the end of the pubdata.
                let boundary =
                    offsets.get(index + 1).copied().unwrap_or(pubdata.len()).min(pubdata.len());
                let onchain_end =
                    offset.saturating_add(kind.onchain_footprint()).min(boundary.max(end));
                let onchain = &pubdata[offset..onchain_end];

                if !self.matcher.matches(kind, onchain, &request.pubdata) {
                    return Err(BatchError::PubdataMismatch {
                        serial_id,
                        offset,
                        onchain: Bytes::copy_from_slice(onchain),
                        request: request.pubdata.clone(),
                    })
                }
                tracing::debug!(
                    target: "bridge::batch_processor",
                    serial_id,
                    offset,
                    %kind,
                    "matched priority operation"
                );

                consumed += 1;
                Some(serial_id)
            } else {
                None
            };

            if let Some(withdrawal) = Withdrawal::from_record(&record) {
                processable_operations_hash = keccak256(
                    [processable_operations_hash.as_slice(), &pubdata[offset..end]].concat(),
                );
                withdrawals.push(withdrawal);
            }
            operations.push(OnchainOperation { offset, record, serial_id });
        }

        Ok(VerifiedBlock { consumed, operations, withdrawals, processable_operations_hash })
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(&BridgeConfig::default())
    }
}
