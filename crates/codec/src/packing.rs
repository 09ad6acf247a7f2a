//! Decimal floating point packing used for amounts and fees in layer-2 operations.
//!
//! A packed value holds a mantissa in its high bits and a base 10 exponent in its low bits, so
//! that `value = mantissa * 10^exponent`.

use crate::{bits::get_bits, PackingError};

/// The layout of a packed decimal floating point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    /// The bit width of the mantissa.
    mantissa_bits: u32,
    /// The bit width of the exponent.
    exponent_bits: u32,
}

impl FloatFormat {
    /// The packed amount format, 40 bits wide.
    pub const AMOUNT: Self = Self { mantissa_bits: 35, exponent_bits: 5 };

    /// The packed fee format, 16 bits wide.
    pub const FEE: Self = Self { mantissa_bits: 11, exponent_bits: 5 };

    /// The widest packed value a format can describe.
    pub const MAX_WIDTH: u32 = u64::BITS;

    /// Returns a new format, or [`None`] if either width is zero, the exponent is wider than 31
    /// bits or the packed value does not fit into [`Self::MAX_WIDTH`] bits.
    pub const fn new(mantissa_bits: u32, exponent_bits: u32) -> Option<Self> {
        if mantissa_bits == 0 ||
            exponent_bits == 0 ||
            exponent_bits >= u32::BITS ||
            mantissa_bits > Self::MAX_WIDTH - exponent_bits
        {
            return None
        }
        Some(Self { mantissa_bits, exponent_bits })
    }

    /// Returns the bit width of the mantissa.
    pub const fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    /// Returns the bit width of the exponent.
    pub const fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    /// Returns the total bit width of the format.
    pub const fn width(&self) -> u32 {
        self.mantissa_bits + self.exponent_bits
    }

    /// Returns the largest mantissa of the format.
    pub const fn max_mantissa(&self) -> u128 {
        (1u128 << self.mantissa_bits) - 1
    }

    /// Returns the largest exponent of the format.
    pub const fn max_exponent(&self) -> u32 {
        (1u32 << self.exponent_bits) - 1
    }

    /// Unpacks the packed value into its full value.
    pub fn unpack(&self, packed: u64) -> Result<u128, PackingError> {
        let packed_wide = u128::from(packed);
        if get_bits(packed_wide, self.width(), u128::BITS) != 0 {
            return Err(PackingError::InvalidPackedValue(packed))
        }
        let exponent = get_bits(packed_wide, 0, self.exponent_bits) as u32;
        let mantissa = get_bits(packed_wide, self.exponent_bits, self.width());
        10u128
            .checked_pow(exponent)
            .and_then(|power| mantissa.checked_mul(power))
            .ok_or(PackingError::InvalidPackedValue(packed))
    }

    /// Packs the value, failing if it cannot be represented without loss of precision.
    pub fn pack(&self, value: u128) -> Result<u64, PackingError> {
        let mut mantissa = value;
        let mut exponent = 0u32;
        while mantissa > self.max_mantissa() {
            if exponent == self.max_exponent() {
                return Err(PackingError::Overflow(value))
            }
            if mantissa % 10 != 0 {
                return Err(PackingError::NotPackable(value))
            }
            mantissa /= 10;
            exponent += 1;
        }
        Ok(((mantissa as u64) << self.exponent_bits) | u64::from(exponent))
    }

    /// Returns the largest packable value not greater than `value`.
    pub fn closest_packable(&self, value: u128) -> Result<u128, PackingError> {
        let mut mantissa = value;
        let mut exponent = 0u32;
        while mantissa > self.max_mantissa() {
            if exponent == self.max_exponent() {
                return Err(PackingError::Overflow(value))
            }
            mantissa /= 10;
            exponent += 1;
        }
        // mantissa * 10^exponent <= value, so only a zero mantissa can overflow the power.
        Ok(10u128.checked_pow(exponent).map_or(0, |power| mantissa * power))
    }

    /// Returns true if the value can be packed without loss of precision.
    pub fn is_packable(&self, value: u128) -> bool {
        self.pack(value).is_ok()
    }
}

/// A packed token amount, encoded on 5 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackedAmount(u64);

impl PackedAmount {
    /// The encoded length of the packed amount.
    pub const BYTES: usize = 5;

    /// Returns the packed amount from its raw 40 bits representation, or [`None`] if the raw value
    /// is wider than 40 bits.
    pub const fn from_raw(raw: u64) -> Option<Self> {
        if raw >> FloatFormat::AMOUNT.width() != 0 {
            return None
        }
        Some(Self(raw))
    }

    /// Packs the full amount exactly.
    pub fn pack(amount: u128) -> Result<Self, PackingError> {
        FloatFormat::AMOUNT.pack(amount).map(Self)
    }

    /// Returns the raw packed representation.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Unpacks into the full amount.
    pub fn unpack(&self) -> Result<u128, PackingError> {
        FloatFormat::AMOUNT.unpack(self.0)
    }

    pub(crate) fn to_be_bytes(self) -> [u8; Self::BYTES] {
        let bytes = self.0.to_be_bytes();
        let mut out = [0u8; Self::BYTES];
        out.copy_from_slice(&bytes[8 - Self::BYTES..]);
        out
    }
}

/// A packed fee, encoded on 2 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackedFee(u16);

impl PackedFee {
    /// The encoded length of the packed fee.
    pub const BYTES: usize = 2;

    /// Returns the packed fee from its raw representation.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Packs the full fee exactly.
    pub fn pack(fee: u128) -> Result<Self, PackingError> {
        FloatFormat::FEE.pack(fee).map(|raw| Self(raw as u16))
    }

    /// Returns the raw packed representation.
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Unpacks into the full fee.
    pub fn unpack(&self) -> Result<u128, PackingError> {
        FloatFormat::FEE.unpack(u64::from(self.0))
    }
}
