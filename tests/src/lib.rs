//! Fixtures shared by the bridge integration tests.

use alloy_primitives::{address, Address, B256};
use arbitrary::Unstructured;
use bridge_codec::{Deposit, FullExit, NftExit, OperationRecord};
use bridge_primitives::L1Origin;
use rand::Rng;

/// The owner of the accounts used across the scenarios.
pub const OWNER: Address = address!("823B747710C5bC9b8A47243f2c3d1805F1aA00c5");

/// The deposit of the end to end scenarios.
pub const fn scenario_deposit() -> Deposit {
    Deposit {
        account_id: 0x01020304,
        token_id: 0x0102,
        amount: 0x101112131415161718191a1b1c1d1e1f,
        owner: OWNER,
    }
}

/// Returns a full exit of a fungible token for the provided amount.
pub fn full_exit(amount: u128) -> FullExit {
    FullExit {
        account_id: 0x0a0b0c0d,
        owner: OWNER,
        token_id: 0x0e0f,
        amount,
        nft: NftExit::default(),
    }
}

/// Returns an origin with a random transaction hash.
pub fn origin() -> L1Origin {
    L1Origin::new(OWNER, B256::random())
}

/// Returns `len` random bytes for an [`Unstructured`].
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill(bytes.as_mut_slice());
    bytes
}

/// Returns a deposit with random fields.
pub fn arbitrary_deposit(u: &mut Unstructured<'_>) -> arbitrary::Result<Deposit> {
    Ok(Deposit {
        account_id: u.arbitrary()?,
        token_id: u.arbitrary()?,
        amount: u.arbitrary()?,
        owner: Address::from(u.arbitrary::<[u8; 20]>()?),
    })
}

/// Lays out the records one after the other, each padded with zeros to its chunk footprint, and
/// returns the pubdata along with the offsets of the records.
pub fn layout_block(records: &[OperationRecord]) -> (Vec<u8>, Vec<usize>) {
    let mut pubdata = Vec::new();
    let mut offsets = Vec::with_capacity(records.len());
    for record in records {
        offsets.push(pubdata.len());
        let end = pubdata.len() + record.kind().onchain_footprint();
        pubdata.extend_from_slice(&record.encode());
        pubdata.resize(end, 0);
    }
    (pubdata, offsets)
}
