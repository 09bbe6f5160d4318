use std::net::IpAddr;

use ipnet::IpNet;

use super::range_set::{RangeSet, RangeSetBuilder};
use super::IpMatch;
use crate::error::{FilterError, Result};
use crate::types::{canonical_ip, canonical_net, net_from_v4_bytes, net_from_v6_bytes, IpFamily};

/// Parse one CIDR string into its canonical network.
///
/// Surrounding whitespace is ignored. Bare addresses without a prefix
/// length are rejected, as are leading zeros in IPv4 octets or in the
/// prefix length (`010.0.0.0/8`, `10.0.0.0/08`), which read as octal to
/// some tools.
pub fn parse_cidr(entry: &str) -> Result<IpNet> {
    let trimmed = entry.trim();
    if let Some((addr, len)) = trimmed.split_once('/') {
        if has_leading_zero(len) {
            return Err(FilterError::invalid_cidr(entry, "leading zero in prefix length"));
        }
        // dotted quad, possibly the tail of an IPv6 address
        let quad = addr.rsplit(':').next().unwrap_or(addr);
        if quad.contains('.') && quad.split('.').any(has_leading_zero) {
            return Err(FilterError::invalid_cidr(entry, "leading zero in IPv4 octet"));
        }
    }
    let net: IpNet = trimmed
        .parse()
        .map_err(|e| FilterError::invalid_cidr(entry, e))?;
    Ok(canonical_net(net))
}

fn has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0')
}

/// Immutable pair of IPv4 and IPv6 range sets.
///
/// This is the unit swapped by [`RangeMatcher`](super::RangeMatcher); a
/// table is never mutated after it is built.
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    v4: RangeSet<4>,
    v6: RangeSet<16>,
}

impl RangeTable {
    /// Build a table from CIDR strings.
    ///
    /// All-or-nothing: the first invalid entry aborts the build.
    pub fn from_ranges<I, S>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut v4 = RangeSetBuilder::<4>::new();
        let mut v6 = RangeSetBuilder::<16>::new();
        for entry in ranges {
            match parse_cidr(entry.as_ref())? {
                IpNet::V4(net) => v4.insert(net.prefix_len(), net.network().octets()),
                IpNet::V6(net) => v6.insert(net.prefix_len(), net.network().octets()),
            }
        }
        Ok(Self {
            v4: v4.build(),
            v6: v6.build(),
        })
    }

    /// Check whether `ip` falls inside any range of its own family.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match canonical_ip(ip) {
            IpAddr::V4(v4) => self.v4.contains(&v4.octets()),
            IpAddr::V6(v6) => self.v6.contains(&v6.octets()),
        }
    }

    /// Number of distinct ranges across both families.
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    /// Number of distinct ranges of one family.
    pub fn family_len(&self, family: IpFamily) -> usize {
        match family {
            IpFamily::V4 => self.v4.len(),
            IpFamily::V6 => self.v6.len(),
        }
    }

    /// Populated prefix lengths of one family, ascending.
    pub fn prefix_lengths(&self, family: IpFamily) -> Vec<u8> {
        match family {
            IpFamily::V4 => self.v4.buckets().iter().map(|b| b.prefix_len()).collect(),
            IpFamily::V6 => self.v6.buckets().iter().map(|b| b.prefix_len()).collect(),
        }
    }

    /// Stored ranges: IPv4 first, then IPv6, each by prefix length and
    /// then address.
    pub fn ranges(&self) -> impl Iterator<Item = IpNet> + '_ {
        let v4 = self.v4.buckets().iter().flat_map(|b| {
            b.entries()
                .iter()
                .filter_map(move |e| net_from_v4_bytes(*e, b.prefix_len()))
        });
        let v6 = self.v6.buckets().iter().flat_map(|b| {
            b.entries()
                .iter()
                .filter_map(move |e| net_from_v6_bytes(*e, b.prefix_len()))
        });
        v4.chain(v6)
    }
}

impl IpMatch for RangeTable {
    fn matches(&self, ip: IpAddr) -> bool {
        self.contains(ip)
    }
}
