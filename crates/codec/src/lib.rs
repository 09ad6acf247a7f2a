//! The pubdata codec for the bridge operations.
//!
//! Every operation is serialized into a fixed width big-endian record whose first byte is the
//! operation tag. The crate decodes and encodes those records, unpacks the compressed amount and
//! fee fields, and decides whether an onchain operation settles a queued priority request.

pub mod bits;

pub use error::{DecodingError, PackingError};
mod error;

pub use matching::{eq_with_tolerated_suffix, PubdataMatcher, SuffixTolerance};
pub mod matching;

pub use operation::{
    decode, AccountId, ChangePubKey, Deposit, ForcedExit, FullExit, NftExit, Nonce,
    OperationKind, OperationRecord, TokenId, Transfer, TransferToNew, Withdraw, CHUNK_BYTES,
};
pub mod operation;

pub use packing::{FloatFormat, PackedAmount, PackedFee};
pub mod packing;

pub use reader::{read_bytes, read_uint};
pub mod reader;
