/// An error occurring during the decoding of pubdata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodingError {
    /// The buffer does not hold enough bytes at the requested offset.
    #[error("out of range: {required} bytes required at offset {offset}, {available} available")]
    OutOfRange {
        /// The offset of the read.
        offset: usize,
        /// The amount of bytes the read required.
        required: usize,
        /// The amount of bytes left in the buffer from the offset.
        available: usize,
    },
    /// The tag byte does not match any operation kind.
    #[error("unknown operation tag {0:#04x}")]
    UnknownTag(u8),
    /// The requested integer width is not a whole number of bytes up to 128 bits.
    #[error("invalid integer width of {0} bits")]
    InvalidWidth(u32),
}

/// An error occurring while packing or unpacking a floating point value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackingError {
    /// The value cannot be represented exactly in the packed format.
    #[error("value {0} is not packable")]
    NotPackable(u128),
    /// The value exceeds the largest value of the packed format.
    #[error("value {0} exceeds the packable range")]
    Overflow(u128),
    /// The packed value unpacks to a number which does not fit into 128 bits.
    #[error("packed value {0:#x} does not unpack into 128 bits")]
    InvalidPackedValue(u64),
}
