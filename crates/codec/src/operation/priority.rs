use super::{AccountId, OperationKind, PubdataRecord, TokenId};
use crate::reader::{address_from_buf, b256_from_buf, ADDRESS_BYTES, HASH_BYTES};
use core::ops::Range;

use alloy_primitives::{
    bytes::{Buf, BufMut},
    Address, Bytes, B256,
};

/// A deposit of layer-1 funds into a layer-2 account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    /// The receiving account.
    pub account_id: AccountId,
    /// The deposited token.
    pub token_id: TokenId,
    /// The deposited amount.
    pub amount: u128,
    /// The owner of the receiving account.
    pub owner: Address,
}

impl Deposit {
    /// The encoded length of the deposit.
    pub const BYTES_LENGTH: usize = 1 + 4 + 2 + 16 + ADDRESS_BYTES;

    /// Returns the encoding the deposit is queued with as a priority request.
    pub fn priority_pubdata(&self) -> Bytes {
        let mut out = Vec::with_capacity(Self::BYTES_LENGTH);
        self.write(&mut out);
        out.into()
    }
}

impl PubdataRecord for Deposit {
    const KIND: OperationKind = OperationKind::Deposit;

    fn from_buf(buf: &mut &[u8]) -> Self {
        let account_id = buf.get_u32();
        let token_id = buf.get_u16();
        let amount = buf.get_u128();
        let owner = address_from_buf(buf);
        Self { account_id, token_id, amount, owner }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.account_id);
        out.put_u16(self.token_id);
        out.put_u128(self.amount);
        out.put_slice(self.owner.as_slice());
    }
}

/// The NFT fields carried by a full exit. All zero for a fungible token exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftExit {
    /// The account which minted the NFT.
    pub creator_account_id: AccountId,
    /// The address of the minting account.
    pub creator_address: Address,
    /// The serial id of the NFT within its creator's mints.
    pub serial_id: u32,
    /// The content hash of the NFT.
    pub content_hash: B256,
}

impl NftExit {
    /// The encoded length of the NFT fields.
    pub const BYTES_LENGTH: usize = 4 + ADDRESS_BYTES + 4 + HASH_BYTES;
}

/// A request to exit the full balance of a token from a layer-2 account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullExit {
    /// The exiting account.
    pub account_id: AccountId,
    /// The owner of the exiting account.
    pub owner: Address,
    /// The exited token.
    pub token_id: TokenId,
    /// The exited amount, known only once the operation is executed on layer 2.
    pub amount: u128,
    /// The NFT fields of the exit.
    pub nft: NftExit,
}

impl FullExit {
    /// The encoded length of a full exit without the NFT fields. Priority requests are queued
    /// with this length.
    pub const PRIORITY_BYTES_LENGTH: usize = 1 + 4 + ADDRESS_BYTES + 2 + 16;

    /// The encoded length of the full exit.
    pub const BYTES_LENGTH: usize = Self::PRIORITY_BYTES_LENGTH + NftExit::BYTES_LENGTH;

    /// The amount and NFT fields, which the requester cannot know in advance.
    pub(crate) const IGNORED_RANGES: &'static [Range<usize>] =
        &[Self::PRIORITY_BYTES_LENGTH - 16..Self::BYTES_LENGTH];

    /// Returns the encoding the full exit is queued with as a priority request. The amount is
    /// written as zero.
    pub fn priority_pubdata(&self) -> Bytes {
        let mut out = Vec::with_capacity(Self::PRIORITY_BYTES_LENGTH);
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.account_id);
        out.put_slice(self.owner.as_slice());
        out.put_u16(self.token_id);
        out.put_u128(0);
        out.into()
    }
}

impl PubdataRecord for FullExit {
    const KIND: OperationKind = OperationKind::FullExit;

    fn from_buf(buf: &mut &[u8]) -> Self {
        let account_id = buf.get_u32();
        let owner = address_from_buf(buf);
        let token_id = buf.get_u16();
        let amount = buf.get_u128();
        let creator_account_id = buf.get_u32();
        let creator_address = address_from_buf(buf);
        let serial_id = buf.get_u32();
        let content_hash = b256_from_buf(buf);
        Self {
            account_id,
            owner,
            token_id,
            amount,
            nft: NftExit { creator_account_id, creator_address, serial_id, content_hash },
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.put_u8(Self::KIND.tag());
        out.put_u32(self.account_id);
        out.put_slice(self.owner.as_slice());
        out.put_u16(self.token_id);
        out.put_u128(self.amount);
        out.put_u32(self.nft.creator_account_id);
        out.put_slice(self.nft.creator_address.as_slice());
        out.put_u32(self.nft.serial_id);
        out.put_slice(self.nft.content_hash.as_slice());
    }
}
