//! Equivalence between the pubdata of an onchain operation and the pubdata of a queued priority
//! request.
//!
//! The two encodings legitimately differ by trailing padding, and some fields of the onchain
//! encoding are only known once the operation executes on layer 2. Everything else must be
//! byte identical.

use crate::OperationKind;
use core::ops::Range;

/// The trailing bytes a comparison tolerates in the longer of two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixTolerance {
    /// The largest tolerated length difference between the buffers.
    pub max_len: usize,
    /// The value every tolerated trailing byte must hold.
    pub fill: u8,
}

/// Compares the buffers over their common length and requires every byte past it in the longer
/// buffer to equal the tolerated fill byte. Positions inside `ignored` are skipped entirely.
pub fn eq_with_tolerated_suffix(
    lhs: &[u8],
    rhs: &[u8],
    ignored: &[Range<usize>],
    tolerance: SuffixTolerance,
) -> bool {
    if lhs.len().abs_diff(rhs.len()) > tolerance.max_len {
        return false
    }

    let is_ignored = |index: usize| ignored.iter().any(|range| range.contains(&index));
    let common = lhs.len().min(rhs.len());
    let longer = if lhs.len() > rhs.len() { lhs } else { rhs };

    let prefix_matches = lhs[..common]
        .iter()
        .zip(&rhs[..common])
        .enumerate()
        .all(|(index, (left, right))| left == right || is_ignored(index));
    let suffix_is_padding = longer[common..]
        .iter()
        .enumerate()
        .all(|(index, byte)| *byte == tolerance.fill || is_ignored(common + index));

    prefix_matches && suffix_is_padding
}

/// Decides whether an onchain operation settles a priority request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PubdataMatcher {
    padding: u8,
}

impl PubdataMatcher {
    /// Returns a new matcher tolerating trailing `padding` bytes.
    pub const fn new(padding: u8) -> Self {
        Self { padding }
    }

    /// Returns true if the onchain pubdata of an operation of the provided kind is equivalent to
    /// the queued request pubdata.
    ///
    /// The onchain slice may extend up to the operation's chunk footprint. Fields the kind
    /// declares as ignored are not compared.
    pub fn matches(&self, kind: OperationKind, onchain: &[u8], request: &[u8]) -> bool {
        let request_len = kind.priority_pubdata_length().unwrap_or_else(|| kind.required_length());
        let tolerance = SuffixTolerance {
            max_len: kind.onchain_footprint().saturating_sub(request_len),
            fill: self.padding,
        };
        eq_with_tolerated_suffix(onchain, request, kind.ignored_ranges(), tolerance)
    }
}
