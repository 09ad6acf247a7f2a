use super::{AccountId, Nonce, OperationKind, PubdataRecord, TokenId};
use crate::{
    reader::{address_from_buf, ADDRESS_BYTES},
    PackedFee,
};

use alloy_primitives::{
    bytes::{Buf, BufMut},
    Address, FixedBytes,
};

/// A change of the layer-2 signing key of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePubKey {
    /// The account changing its key.
    pub account_id: AccountId,
    /// The hash of the new public key.
    pub pub_key_hash: FixedBytes<20>,
    /// The owner of the account.
    pub owner: Address,
    /// The nonce of the account.
    pub nonce: Nonce,
    /// The token the fee is paid in.
    pub fee_token_id: TokenId,
    /// The fee paid for the change.
    pub fee: PackedFee,
}

impl ChangePubKey {
    /// The encoded length of the key change.
    pub const BYTES_LENGTH: usize = 1 + 4 + 20 + ADDRESS_BYTES + 4 + 2 + PackedFee::BYTES;
}

impl PubdataRecord for ChangePubKey {
    const KIND: OperationKind = OperationKind::ChangePubKey;

    fn from_buf(buf: &mut &[u8]) -> Self {
        let account_id = buf.get_u32();
        let pub_key_hash = FixedBytes::from_slice(&buf[..20]);
        buf.advance(20);
        let owner = address_from_buf(buf);
        let nonce = buf.get_u32();
        let fee_token_id = buf.get_u16();
        let fee = PackedFee::from_raw(buf.get_u16());
        Self { account_id, pub_key_hash, owner, nonce, fee_token_id, fee }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.account_id);
        out.put_slice(self.pub_key_hash.as_slice());
        out.put_slice(self.owner.as_slice());
        out.put_u32(self.nonce);
        out.put_u16(self.fee_token_id);
        out.put_u16(self.fee.raw());
    }
}
