use super::{AccountId, OperationKind, PubdataRecord, TokenId};
use crate::{
    reader::{address_from_buf, ADDRESS_BYTES},
    PackedFee,
};

use alloy_primitives::{
    bytes::{Buf, BufMut},
    Address,
};

/// A withdrawal from a layer-2 account to a layer-1 address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdraw {
    /// The withdrawing account.
    pub account_id: AccountId,
    /// The withdrawn token.
    pub token_id: TokenId,
    /// The withdrawn amount.
    pub amount: u128,
    /// The fee paid for the withdrawal.
    pub fee: PackedFee,
    /// The layer-1 recipient.
    pub owner: Address,
}

impl Withdraw {
    /// The encoded length of the withdrawal.
    pub const BYTES_LENGTH: usize = 1 + 4 + 2 + 16 + PackedFee::BYTES + ADDRESS_BYTES;
}

impl PubdataRecord for Withdraw {
    const KIND: OperationKind = OperationKind::Withdraw;

    fn from_buf(buf: &mut &[u8]) -> Self {
        let account_id = buf.get_u32();
        let token_id = buf.get_u16();
        let amount = buf.get_u128();
        let fee = PackedFee::from_raw(buf.get_u16());
        let owner = address_from_buf(buf);
        Self { account_id, token_id, amount, fee, owner }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.account_id);
        out.put_u16(self.token_id);
        out.put_u128(self.amount);
        out.put_u16(self.fee.raw());
        out.put_slice(self.owner.as_slice());
    }
}

/// A withdrawal of a target account's balance initiated by another account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedExit {
    /// The account initiating the exit and paying the fee.
    pub initiator_account_id: AccountId,
    /// The exited account.
    pub target_account_id: AccountId,
    /// The exited token.
    pub token_id: TokenId,
    /// The exited amount.
    pub amount: u128,
    /// The fee paid by the initiator.
    pub fee: PackedFee,
    /// The layer-1 recipient, owner of the target account.
    pub target: Address,
}

impl ForcedExit {
    /// The encoded length of the forced exit.
    pub const BYTES_LENGTH: usize = 1 + 4 + 4 + 2 + 16 + PackedFee::BYTES + ADDRESS_BYTES;
}

impl PubdataRecord for ForcedExit {
    const KIND: OperationKind = OperationKind::ForcedExit;

    fn from_buf(buf: &mut &[u8]) -> Self {
        let initiator_account_id = buf.get_u32();
        let target_account_id = buf.get_u32();
        let token_id = buf.get_u16();
        let amount = buf.get_u128();
        let fee = PackedFee::from_raw(buf.get_u16());
        let target = address_from_buf(buf);
        Self { initiator_account_id, target_account_id, token_id, amount, fee, target }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.initiator_account_id);
        out.put_u32(self.target_account_id);
        out.put_u16(self.token_id);
        out.put_u128(self.amount);
        out.put_u16(self.fee.raw());
        out.put_slice(self.target.as_slice());
    }
}
