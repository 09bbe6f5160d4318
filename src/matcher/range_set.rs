use std::collections::BTreeMap;

use super::compare::{compare_masked, mask_bytes};

/// All ranges of one family sharing a prefix length, sorted by the masked
/// comparator so they can be binary searched.
#[derive(Debug, Clone)]
pub(crate) struct RangeBucket<const N: usize> {
    prefix_len: u8,
    entries: Vec<[u8; N]>,
}

impl<const N: usize> RangeBucket<N> {
    fn new(prefix_len: u8, mut entries: Vec<[u8; N]>) -> Self {
        entries.sort_unstable_by(|a, b| compare_masked(prefix_len, a, b));
        entries.dedup_by(|a, b| compare_masked(prefix_len, a, b).is_eq());
        Self {
            prefix_len,
            entries,
        }
    }

    #[inline]
    fn contains(&self, addr: &[u8; N]) -> bool {
        self.entries
            .binary_search_by(|probe| compare_masked(self.prefix_len, probe, addr))
            .is_ok()
    }

    pub(crate) fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub(crate) fn entries(&self) -> &[[u8; N]] {
        &self.entries
    }
}

/// Ranges of one family (`N` = 4 for IPv4, 16 for IPv6) grouped by prefix
/// length. Only non-empty buckets are kept, ordered by prefix length.
#[derive(Debug, Clone, Default)]
pub(crate) struct RangeSet<const N: usize> {
    buckets: Vec<RangeBucket<N>>,
}

impl<const N: usize> RangeSet<N> {
    /// Check whether `addr` falls inside any stored range.
    ///
    /// Every populated prefix length is probed; the first hit wins.
    pub(crate) fn contains(&self, addr: &[u8; N]) -> bool {
        self.buckets.iter().any(|bucket| bucket.contains(addr))
    }

    /// Number of distinct stored ranges.
    pub(crate) fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub(crate) fn buckets(&self) -> &[RangeBucket<N>] {
        &self.buckets
    }
}

/// Accumulates ranges for a [`RangeSet`]; sorting happens once in `build`.
#[derive(Debug, Default)]
pub(crate) struct RangeSetBuilder<const N: usize> {
    by_len: BTreeMap<u8, Vec<[u8; N]>>,
}

impl<const N: usize> RangeSetBuilder<N> {
    pub(crate) fn new() -> Self {
        Self {
            by_len: BTreeMap::new(),
        }
    }

    /// Add a prefix. The caller guarantees `prefix_len <= N * 8`.
    pub(crate) fn insert(&mut self, prefix_len: u8, network: [u8; N]) {
        debug_assert!(prefix_len as usize <= N * 8);
        self.by_len
            .entry(prefix_len)
            .or_default()
            .push(mask_bytes(prefix_len, &network));
    }

    pub(crate) fn build(self) -> RangeSet<N> {
        let buckets = self
            .by_len
            .into_iter()
            .map(|(prefix_len, entries)| RangeBucket::new(prefix_len, entries))
            .collect();
        RangeSet { buckets }
    }
}
