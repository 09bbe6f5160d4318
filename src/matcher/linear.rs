use std::net::IpAddr;

use ipnet::IpNet;

use super::table::parse_cidr;
use super::IpMatch;
use crate::error::Result;
use crate::types::canonical_ip;

/// Linear-scan matcher - checks every range with `IpNet::contains`.
///
/// O(n) per lookup. Kept as the reference semantics for [`RangeTable`]
/// (the bucketed matcher must always agree with it) and for tiny lists.
///
/// [`RangeTable`]: super::RangeTable
#[derive(Debug, Clone, Default)]
pub struct LinearMatcher {
    networks: Vec<IpNet>,
}

impl LinearMatcher {
    pub fn new(networks: Vec<IpNet>) -> Self {
        Self { networks }
    }

    /// Build from CIDR strings with the same parsing rules as `RangeTable`.
    pub fn from_ranges<I, S>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let networks = ranges
            .into_iter()
            .map(|r| parse_cidr(r.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { networks })
    }
}

impl IpMatch for LinearMatcher {
    fn matches(&self, ip: IpAddr) -> bool {
        let ip = canonical_ip(ip);
        // IpNet::contains is false across families
        self.networks.iter().any(|net| net.contains(&ip))
    }
}
