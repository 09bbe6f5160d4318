//! Prefix-masked byte comparison.
//!
//! Both operands always have the same width `N` (4 or 16); family dispatch
//! happens before any comparison, so mismatched lengths cannot reach here.

use std::cmp::Ordering;

/// Mask for byte `index` of an address under a `prefix_len`-bit prefix.
#[inline]
pub(crate) fn byte_mask(prefix_len: u8, index: usize) -> u8 {
    let prefix_len = prefix_len as usize;
    let end = (index + 1) * 8;
    if end <= prefix_len {
        0xff
    } else if index * 8 < prefix_len {
        0xff << (end - prefix_len)
    } else {
        0
    }
}

/// Compare the first `prefix_len` bits of `a` and `b`.
///
/// Bytes are compared from the most significant one, each ANDed with its
/// mask; the walk stops after the first byte whose mask is partial.
pub(crate) fn compare_masked<const N: usize>(
    prefix_len: u8,
    a: &[u8; N],
    b: &[u8; N],
) -> Ordering {
    for i in 0..N {
        let mask = byte_mask(prefix_len, i);
        match (a[i] & mask).cmp(&(b[i] & mask)) {
            Ordering::Equal => {}
            ord => return ord,
        }
        if mask != 0xff {
            break;
        }
    }
    Ordering::Equal
}

/// Clear every bit of `addr` past the first `prefix_len`.
pub(crate) fn mask_bytes<const N: usize>(prefix_len: u8, addr: &[u8; N]) -> [u8; N] {
    let mut out = [0u8; N];
    for (i, byte) in out.iter_mut().enumerate() {
        let mask = byte_mask(prefix_len, i);
        if mask == 0 {
            break;
        }
        *byte = addr[i] & mask;
    }
    out
}
