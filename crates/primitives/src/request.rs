use bridge_codec::OperationKind;

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// The layer-1 event a priority request originates from. Kept for auditing only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct L1Origin {
    /// The layer-1 account which submitted the request.
    pub sender: Address,
    /// The hash of the layer-1 transaction which submitted the request.
    pub tx_hash: B256,
}

impl L1Origin {
    /// Returns a new instance of [`L1Origin`].
    pub const fn new(sender: Address, tx_hash: B256) -> Self {
        Self { sender, tx_hash }
    }
}

/// A layer-1 request awaiting settlement on layer 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityRequest {
    /// The serial id of the request, assigned in enqueue order.
    pub serial_id: u64,
    /// The kind of the request, a deposit or a full exit.
    pub op_type: OperationKind,
    /// The encoding the onchain operation must match.
    pub pubdata: Bytes,
    /// The last block at which the request can be settled.
    pub expiration_block: u64,
    /// The layer-1 origin of the request.
    pub origin: L1Origin,
}

impl PriorityRequest {
    /// Returns true if the request can no longer be settled at `current_block`.
    pub const fn is_expired(&self, current_block: u64) -> bool {
        current_block > self.expiration_block
    }
}
