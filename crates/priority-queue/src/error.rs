use bridge_codec::OperationKind;

/// An error occurring while mutating the priority queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriorityQueueError {
    /// The operation kind cannot be queued as a priority request.
    #[error("operation {0} is not a priority operation")]
    InvalidRequestType(OperationKind),
    /// The pubdata length differs from the priority encoding length of the kind.
    #[error("invalid {op_type} request length: expected {expected}, got {got}")]
    InvalidRequestLength {
        /// The kind of the request.
        op_type: OperationKind,
        /// The priority encoding length of the kind.
        expected: usize,
        /// The length of the provided pubdata.
        got: usize,
    },
    /// The tag byte of the pubdata does not match the kind of the request.
    #[error("request tag {got:#04x} does not match {op_type}")]
    TagMismatch {
        /// The kind of the request.
        op_type: OperationKind,
        /// The tag byte of the provided pubdata.
        got: u8,
    },
    /// The queue cannot advance past its last open request.
    #[error("cannot advance by {count} with {pending} pending requests")]
    AdvanceOverflow {
        /// The requested advance.
        count: u64,
        /// The amount of pending requests.
        pending: u64,
    },
    /// A request in the advanced range has expired.
    #[error(
        "priority request {serial_id} expired at block {expiration_block}, current block {current_block}"
    )]
    RequestExpired {
        /// The serial id of the expired request.
        serial_id: u64,
        /// The expiration block of the request.
        expiration_block: u64,
        /// The block the advance was attempted at.
        current_block: u64,
    },
}
