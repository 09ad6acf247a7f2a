use bridge_codec::DecodingError;
use bridge_priority_queue::PriorityQueueError;

use alloy_primitives::Bytes;

/// An error rejecting a block commit. Every variant is fatal to the whole block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// The operation at a declared offset could not be decoded.
    #[error("malformed operation at offset {offset}: {source}")]
    MalformedOperation {
        /// The declared offset.
        offset: usize,
        /// The decoding failure.
        #[source]
        source: DecodingError,
    },
    /// A declared offset precedes the end of the previous operation.
    #[error("offset {offset} overlaps the operation ending at {previous_end}")]
    OffsetsNotAscending {
        /// The offending offset.
        offset: usize,
        /// The end of the previously decoded operation.
        previous_end: usize,
    },
    /// A priority operation references a request which was never enqueued.
    #[error("priority operation at offset {offset} references missing request {serial_id}")]
    QueueUnderflow {
        /// The offset of the priority operation.
        offset: usize,
        /// The serial id the operation should consume.
        serial_id: u64,
    },
    /// A priority operation references an expired request.
    #[error(
        "priority request {serial_id} expired at block {expiration_block}, current block {current_block}"
    )]
    RequestExpired {
        /// The serial id of the expired request.
        serial_id: u64,
        /// The expiration block of the request.
        expiration_block: u64,
        /// The block being committed.
        current_block: u64,
    },
    /// The onchain operation does not match the queued request.
    #[error("pubdata at offset {offset} does not match priority request {serial_id}")]
    PubdataMismatch {
        /// The serial id of the request.
        serial_id: u64,
        /// The offset of the onchain operation.
        offset: usize,
        /// The onchain pubdata slice.
        onchain: Bytes,
        /// The queued request pubdata.
        request: Bytes,
    },
    /// The priority queue refused to advance.
    #[error(transparent)]
    Queue(#[from] PriorityQueueError),
}

impl BatchError {
    /// Returns the reject code reported to the operator.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MalformedOperation { .. } => "malformed_operation",
            Self::OffsetsNotAscending { .. } => "offsets_not_ascending",
            Self::QueueUnderflow { .. } => "queue_underflow",
            Self::RequestExpired { .. } |
            Self::Queue(PriorityQueueError::RequestExpired { .. }) => "request_expired",
            Self::PubdataMismatch { .. } => "pubdata_mismatch",
            Self::Queue(_) => "queue_error",
        }
    }
}
