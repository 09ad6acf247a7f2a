//! Operation records and their fixed width pubdata encoding.

mod change_pubkey;
pub use change_pubkey::ChangePubKey;

mod exit;
pub use exit::{ForcedExit, Withdraw};

mod priority;
pub use priority::{Deposit, FullExit, NftExit};

mod transfer;
pub use transfer::{Transfer, TransferToNew};

use crate::{
    reader::{read_bytes, read_uint},
    DecodingError,
};
use core::ops::Range;

use alloy_primitives::Bytes;

/// The identifier of a layer-2 account.
pub type AccountId = u32;

/// The identifier of a token.
pub type TokenId = u16;

/// The nonce of a layer-2 account.
pub type Nonce = u32;

/// The size of a pubdata chunk in bytes. Every operation occupies a whole number of chunks in a
/// committed block.
pub const CHUNK_BYTES: usize = 9;

/// The kind of an operation, identified on the wire by its tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, strum::EnumIter)]
#[repr(u8)]
pub enum OperationKind {
    /// A layer-1 deposit into a layer-2 account.
    Deposit = 0x01,
    /// A transfer to an account created by the transfer.
    TransferToNew = 0x02,
    /// A withdrawal to a layer-1 address.
    Withdraw = 0x03,
    /// A transfer between existing accounts.
    Transfer = 0x05,
    /// A layer-1 request to exit the full balance of a token.
    FullExit = 0x06,
    /// A change of the signing key of an account.
    ChangePubKey = 0x07,
    /// A withdrawal initiated on behalf of another account.
    ForcedExit = 0x08,
}

impl OperationKind {
    /// Returns the tag byte of the kind.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Returns the kind matching the tag byte, if any.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0x01 => Self::Deposit,
            0x02 => Self::TransferToNew,
            0x03 => Self::Withdraw,
            0x05 => Self::Transfer,
            0x06 => Self::FullExit,
            0x07 => Self::ChangePubKey,
            0x08 => Self::ForcedExit,
            _ => return None,
        })
    }

    /// Returns the amount of bytes a record of this kind occupies, tag included.
    pub const fn required_length(self) -> usize {
        match self {
            Self::Deposit => Deposit::BYTES_LENGTH,
            Self::TransferToNew => TransferToNew::BYTES_LENGTH,
            Self::Withdraw => Withdraw::BYTES_LENGTH,
            Self::Transfer => Transfer::BYTES_LENGTH,
            Self::FullExit => FullExit::BYTES_LENGTH,
            Self::ChangePubKey => ChangePubKey::BYTES_LENGTH,
            Self::ForcedExit => ForcedExit::BYTES_LENGTH,
        }
    }

    /// Returns the amount of chunks the operation occupies in a block.
    pub const fn chunks(self) -> usize {
        match self {
            Self::Transfer => 2,
            Self::FullExit => 12,
            Self::Deposit |
            Self::TransferToNew |
            Self::Withdraw |
            Self::ChangePubKey |
            Self::ForcedExit => 6,
        }
    }

    /// Returns the amount of bytes the operation occupies in a block, padding included.
    pub const fn onchain_footprint(self) -> usize {
        self.chunks() * CHUNK_BYTES
    }

    /// Returns true if operations of this kind consume a priority request.
    pub const fn is_priority(self) -> bool {
        matches!(self, Self::Deposit | Self::FullExit)
    }

    /// Returns the length of the encoding a priority request of this kind is queued with, or
    /// [`None`] if the kind is not a priority operation.
    pub const fn priority_pubdata_length(self) -> Option<usize> {
        match self {
            Self::Deposit => Some(Deposit::BYTES_LENGTH),
            Self::FullExit => Some(FullExit::PRIORITY_BYTES_LENGTH),
            _ => None,
        }
    }

    /// Returns the byte ranges of the onchain encoding which are authoritative onchain and are
    /// therefore excluded when matching against a priority request.
    pub fn ignored_ranges(self) -> &'static [Range<usize>] {
        match self {
            Self::FullExit => FullExit::IGNORED_RANGES,
            _ => &[],
        }
    }

    /// Returns true if the operation pays out funds on layer 1 once its block is executed.
    pub const fn is_withdrawal(self) -> bool {
        matches!(self, Self::Withdraw | Self::ForcedExit | Self::FullExit)
    }
}

impl TryFrom<u8> for OperationKind {
    type Error = DecodingError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or(DecodingError::UnknownTag(tag))
    }
}

/// A record with a fixed width pubdata encoding.
pub(crate) trait PubdataRecord: Sized {
    /// The kind of the record.
    const KIND: OperationKind;

    /// Reads the record body from the front of the buffer, which must hold at least the record
    /// length minus the tag byte.
    fn from_buf(buf: &mut &[u8]) -> Self;

    /// Appends the record, tag included, to `out`.
    fn write(&self, out: &mut Vec<u8>);
}

/// A decoded operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum OperationRecord {
    /// A deposit.
    Deposit(Deposit),
    /// A transfer to a new account.
    TransferToNew(TransferToNew),
    /// A withdrawal.
    Withdraw(Withdraw),
    /// A transfer.
    Transfer(Transfer),
    /// A full exit.
    FullExit(FullExit),
    /// A key change.
    ChangePubKey(ChangePubKey),
    /// A forced exit.
    ForcedExit(ForcedExit),
}

impl OperationRecord {
    /// Returns the kind of the record.
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Deposit(_) => OperationKind::Deposit,
            Self::TransferToNew(_) => OperationKind::TransferToNew,
            Self::Withdraw(_) => OperationKind::Withdraw,
            Self::Transfer(_) => OperationKind::Transfer,
            Self::FullExit(_) => OperationKind::FullExit,
            Self::ChangePubKey(_) => OperationKind::ChangePubKey,
            Self::ForcedExit(_) => OperationKind::ForcedExit,
        }
    }

    /// Encodes the record into its fixed width pubdata.
    pub fn encode(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.kind().required_length());
        match self {
            Self::Deposit(op) => op.write(&mut out),
            Self::TransferToNew(op) => op.write(&mut out),
            Self::Withdraw(op) => op.write(&mut out),
            Self::Transfer(op) => op.write(&mut out),
            Self::FullExit(op) => op.write(&mut out),
            Self::ChangePubKey(op) => op.write(&mut out),
            Self::ForcedExit(op) => op.write(&mut out),
        }
        debug_assert_eq!(out.len(), self.kind().required_length());
        out.into()
    }
}

/// Decodes the operation starting at `offset` in the buffer and returns it along with the offset
/// right after it.
///
/// Fails with [`DecodingError::UnknownTag`] if the tag byte is not a known kind and with
/// [`DecodingError::OutOfRange`] if the buffer ends before the record does.
pub fn decode(buf: &[u8], offset: usize) -> Result<(OperationRecord, usize), DecodingError> {
    let tag = read_uint(buf, offset, 8)? as u8;
    let kind = OperationKind::try_from(tag)?;
    let required = kind.required_length();
    let data = read_bytes(buf, offset, required)?;

    // skip the tag byte.
    let body = &mut &data[1..];
    let record = match kind {
        OperationKind::Deposit => Deposit::from_buf(body).into(),
        OperationKind::TransferToNew => TransferToNew::from_buf(body).into(),
        OperationKind::Withdraw => Withdraw::from_buf(body).into(),
        OperationKind::Transfer => Transfer::from_buf(body).into(),
        OperationKind::FullExit => FullExit::from_buf(body).into(),
        OperationKind::ChangePubKey => ChangePubKey::from_buf(body).into(),
        OperationKind::ForcedExit => ForcedExit::from_buf(body).into(),
    };
    debug_assert!(body.is_empty());
    tracing::trace!(target: "bridge::codec", %kind, offset, "decoded operation");

    Ok((record, offset + required))
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for OperationRecord {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        use crate::{PackedAmount, PackedFee};
        use alloy_primitives::{Address, FixedBytes, B256};

        fn packed_amount(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<PackedAmount> {
            PackedAmount::from_raw(u.arbitrary::<u64>()? & ((1 << 40) - 1))
                .ok_or(arbitrary::Error::IncorrectFormat)
        }
        fn address(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Address> {
            Ok(Address::from(u.arbitrary::<[u8; 20]>()?))
        }

        Ok(match u.choose_index(7)? {
            0 => Deposit {
                account_id: u.arbitrary()?,
                token_id: u.arbitrary()?,
                amount: u.arbitrary()?,
                owner: address(u)?,
            }
            .into(),
            1 => TransferToNew {
                from_account_id: u.arbitrary()?,
                token_id: u.arbitrary()?,
                amount: packed_amount(u)?,
                to: address(u)?,
                to_account_id: u.arbitrary()?,
                fee: PackedFee::from_raw(u.arbitrary()?),
            }
            .into(),
            2 => Withdraw {
                account_id: u.arbitrary()?,
                token_id: u.arbitrary()?,
                amount: u.arbitrary()?,
                fee: PackedFee::from_raw(u.arbitrary()?),
                owner: address(u)?,
            }
            .into(),
            3 => Transfer {
                from_account_id: u.arbitrary()?,
                token_id: u.arbitrary()?,
                to_account_id: u.arbitrary()?,
                amount: packed_amount(u)?,
                fee: PackedFee::from_raw(u.arbitrary()?),
            }
            .into(),
            4 => FullExit {
                account_id: u.arbitrary()?,
                owner: address(u)?,
                token_id: u.arbitrary()?,
                amount: u.arbitrary()?,
                nft: NftExit {
                    creator_account_id: u.arbitrary()?,
                    creator_address: address(u)?,
                    serial_id: u.arbitrary()?,
                    content_hash: B256::from(u.arbitrary::<[u8; 32]>()?),
                },
            }
            .into(),
            5 => ChangePubKey {
                account_id: u.arbitrary()?,
                pub_key_hash: FixedBytes::from(u.arbitrary::<[u8; 20]>()?),
                owner: address(u)?,
                nonce: u.arbitrary()?,
                fee_token_id: u.arbitrary()?,
                fee: PackedFee::from_raw(u.arbitrary()?),
            }
            .into(),
            _ => ForcedExit {
                initiator_account_id: u.arbitrary()?,
                target_account_id: u.arbitrary()?,
                token_id: u.arbitrary()?,
                amount: u.arbitrary()?,
                fee: PackedFee::from_raw(u.arbitrary()?),
                target: address(u)?,
            }
            .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PackedAmount, PackedFee};

    use alloy_primitives::{address, b256, hex, FixedBytes};
    use strum::IntoEnumIterator;

    fn sample_records() -> Vec<OperationRecord> {
        let owner = address!("823B747710C5bC9b8A47243f2c3d1805F1aA00c5");
        vec![
            Deposit { account_id: 7, token_id: 1, amount: 500, owner }.into(),
            TransferToNew {
                from_account_id: 3,
                token_id: 2,
                amount: PackedAmount::pack(1_000_000).unwrap(),
                to: owner,
                to_account_id: 12,
                fee: PackedFee::pack(20).unwrap(),
            }
            .into(),
            Withdraw { account_id: 9, token_id: 0, amount: 1 << 100, fee: PackedFee::from_raw(3), owner }
                .into(),
            Transfer {
                from_account_id: 1,
                token_id: 4,
                to_account_id: 2,
                amount: PackedAmount::pack(42).unwrap(),
                fee: PackedFee::default(),
            }
            .into(),
            FullExit {
                account_id: 5,
                owner,
                token_id: 65_535,
                amount: 77,
                nft: NftExit {
                    creator_account_id: 8,
                    creator_address: owner,
                    serial_id: 3,
                    content_hash: b256!(
                        "0x1111111111111111111111111111111111111111111111111111111111111111"
                    ),
                },
            }
            .into(),
            ChangePubKey {
                account_id: 6,
                pub_key_hash: FixedBytes::repeat_byte(0xab),
                owner,
                nonce: 4,
                fee_token_id: 0,
                fee: PackedFee::from_raw(0x0101),
            }
            .into(),
            ForcedExit {
                initiator_account_id: 1,
                target_account_id: 2,
                token_id: 3,
                amount: 4,
                fee: PackedFee::from_raw(5),
                target: owner,
            }
            .into(),
        ]
    }

    #[test]
    fn test_should_decode_deposit_layout() -> eyre::Result<()> {
        let pubdata = hex!(
            "01010203040102101112131415161718191a1b1c1d1e1f823b747710c5bc9b8a47243f2c3d1805f1aa00c5"
        );
        let (record, offset) = decode(&pubdata, 0)?;

        assert_eq!(offset, 43);
        assert_eq!(
            record,
            OperationRecord::Deposit(Deposit {
                account_id: 0x01020304,
                token_id: 0x0102,
                amount: 0x101112131415161718191a1b1c1d1e1f,
                owner: address!("823B747710C5bC9b8A47243f2c3d1805F1aA00c5"),
            })
        );
        Ok(())
    }

    #[test]
    fn test_should_roundtrip_every_kind() -> eyre::Result<()> {
        for record in sample_records() {
            let encoded = record.encode();
            assert_eq!(encoded.len(), record.kind().required_length());
            assert_eq!(encoded[0], record.kind().tag());

            let (decoded, offset) = decode(&encoded, 0)?;
            assert_eq!(decoded, record);
            assert_eq!(offset, encoded.len());
        }
        Ok(())
    }

    #[test]
    fn test_should_decode_at_offset() -> eyre::Result<()> {
        let records = sample_records();
        let mut stream = vec![0xff; 3];
        for record in &records {
            stream.extend_from_slice(&record.encode());
        }

        let mut offset = 3;
        for record in &records {
            let (decoded, next) = decode(&stream, offset)?;
            assert_eq!(&decoded, record);
            offset = next;
        }
        assert_eq!(offset, stream.len());
        Ok(())
    }

    #[test]
    fn test_should_fail_on_every_truncation() {
        for kind in OperationKind::iter() {
            let mut buf = vec![0u8; kind.required_length()];
            buf[0] = kind.tag();
            for len in 0..kind.required_length() {
                let err = decode(&buf[..len], 0).unwrap_err();
                assert!(
                    matches!(err, DecodingError::OutOfRange { offset: 0, available, .. } if available == len),
                    "{kind} truncated to {len} bytes returned {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_should_fail_on_short_deposit() {
        let err = decode(&[0x01, 0x02, 0x03, 0x04], 0).unwrap_err();
        assert_eq!(err, DecodingError::OutOfRange { offset: 0, required: 43, available: 4 });
    }

    #[test]
    fn test_should_fail_on_unknown_tag() {
        for tag in [0x00, 0x04, 0x09, 0xff] {
            let buf = [tag; 128];
            assert_eq!(decode(&buf, 0).unwrap_err(), DecodingError::UnknownTag(tag));
        }
    }

    #[test]
    fn test_kind_layout_is_consistent() {
        for kind in OperationKind::iter() {
            assert_eq!(OperationKind::from_tag(kind.tag()), Some(kind));
            assert!(kind.onchain_footprint() >= kind.required_length(), "{kind}");
            assert_eq!(kind.priority_pubdata_length().is_some(), kind.is_priority());
        }
        assert_eq!(OperationKind::Deposit.required_length(), 43);
        assert_eq!(OperationKind::Withdraw.required_length(), 45);
        assert_eq!(OperationKind::ForcedExit.required_length(), 49);
        assert_eq!(OperationKind::ChangePubKey.required_length(), 53);
        assert_eq!(OperationKind::FullExit.required_length(), 103);
    }
}
