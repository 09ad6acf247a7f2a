use super::{AccountId, OperationKind, PubdataRecord, TokenId};
use crate::{
    reader::{address_from_buf, ADDRESS_BYTES},
    PackedAmount, PackedFee,
};

use alloy_primitives::{
    bytes::{Buf, BufMut},
    Address,
};

/// Reads a 5 bytes packed amount from the front of the buffer.
fn packed_amount_from_buf(buf: &mut &[u8]) -> PackedAmount {
    // 5 bytes always fit the 40 bits format.
    PackedAmount::from_raw(buf.get_uint(PackedAmount::BYTES)).unwrap_or_default()
}

/// A transfer which creates the receiving account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferToNew {
    /// The sending account.
    pub from_account_id: AccountId,
    /// The transferred token.
    pub token_id: TokenId,
    /// The transferred amount.
    pub amount: PackedAmount,
    /// The owner of the created account.
    pub to: Address,
    /// The created account.
    pub to_account_id: AccountId,
    /// The fee paid by the sender.
    pub fee: PackedFee,
}

impl TransferToNew {
    /// The encoded length of the transfer.
    pub const BYTES_LENGTH: usize =
        1 + 4 + 2 + PackedAmount::BYTES + ADDRESS_BYTES + 4 + PackedFee::BYTES;
}

impl PubdataRecord for TransferToNew {
    const KIND: OperationKind = OperationKind::TransferToNew;

    fn from_buf(buf: &mut &[u8]) -> Self {
        let from_account_id = buf.get_u32();
        let token_id = buf.get_u16();
        let amount = packed_amount_from_buf(buf);
        let to = address_from_buf(buf);
        let to_account_id = buf.get_u32();
        let fee = PackedFee::from_raw(buf.get_u16());
        Self { from_account_id, token_id, amount, to, to_account_id, fee }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.from_account_id);
        out.put_u16(self.token_id);
        out.put_slice(&self.amount.to_be_bytes());
        out.put_slice(self.to.as_slice());
        out.put_u32(self.to_account_id);
        out.put_u16(self.fee.raw());
    }
}

/// A transfer between two existing accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// The sending account.
    pub from_account_id: AccountId,
    /// The transferred token.
    pub token_id: TokenId,
    /// The receiving account.
    pub to_account_id: AccountId,
    /// The transferred amount.
    pub amount: PackedAmount,
    /// The fee paid by the sender.
    pub fee: PackedFee,
}

impl Transfer {
    /// The encoded length of the transfer.
    pub const BYTES_LENGTH: usize = 1 + 4 + 2 + 4 + PackedAmount::BYTES + PackedFee::BYTES;
}

impl PubdataRecord for Transfer {
    const KIND: OperationKind = OperationKind::Transfer;

    fn from_buf(buf: &mut &[u8]) -> Self {
        let from_account_id = buf.get_u32();
        let token_id = buf.get_u16();
        let to_account_id = buf.get_u32();
        let amount = packed_amount_from_buf(buf);
        let fee = PackedFee::from_raw(buf.get_u16());
        Self { from_account_id, token_id, to_account_id, amount, fee }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.from_account_id);
        out.put_u16(self.token_id);
        out.put_u32(self.to_account_id);
        out.put_slice(&self.amount.to_be_bytes());
        out.put_u16(self.fee.raw());
    }
}
