//! Bit range extraction.

/// Returns the bits of `value` in the half-open range `[first_bit, last_bit)`, shifted down so
/// that `first_bit` becomes bit 0. Bit 0 is the least significant bit.
///
/// Bits past 128 read as zero, so a range spanning the whole width selects the full value.
pub const fn get_bits(value: u128, first_bit: u32, last_bit: u32) -> u128 {
    if first_bit >= last_bit || first_bit >= u128::BITS {
        return 0
    }
    let width = if last_bit > u128::BITS { u128::BITS - first_bit } else { last_bit - first_bit };
    let shifted = value >> first_bit;
    if width >= u128::BITS {
        shifted
    } else {
        shifted & ((1u128 << width) - 1)
    }
}
