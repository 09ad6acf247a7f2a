use crate::PriorityRequest;

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// A notification emitted by the priority queue for downstream observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PriorityQueueEvent {
    /// A priority request was enqueued.
    NewPriorityRequest(NewPriorityRequest),
    /// A committed block consumed a range of priority requests.
    PriorityRequestsCommitted {
        /// The serial id of the first consumed request.
        first_serial_id: u64,
        /// The amount of consumed requests.
        count: u64,
        /// The block which consumed the requests.
        block_number: u64,
    },
}

/// The record observers receive for every enqueued priority request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPriorityRequest {
    /// The serial id of the request.
    pub serial_id: u64,
    /// The operation tag of the request.
    pub op_type: u8,
    /// The queued pubdata.
    pub pubdata: Bytes,
    /// The last block at which the request can be settled.
    pub expiration_block: u64,
    /// The layer-1 account which submitted the request.
    pub sender: Address,
}

impl From<&PriorityRequest> for NewPriorityRequest {
    fn from(request: &PriorityRequest) -> Self {
        Self {
            serial_id: request.serial_id,
            op_type: request.op_type.tag(),
            pubdata: request.pubdata.clone(),
            expiration_block: request.expiration_block,
            sender: request.origin.sender,
        }
    }
}

impl From<&PriorityRequest> for PriorityQueueEvent {
    fn from(request: &PriorityRequest) -> Self {
        Self::NewPriorityRequest(request.into())
    }
}
