use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

/// Address family. Ranges and queries are never compared across families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    /// Family of an address after [`canonical_ip`] is applied.
    pub fn of(ip: IpAddr) -> Self {
        match canonical_ip(ip) {
            IpAddr::V4(_) => IpFamily::V4,
            IpAddr::V6(_) => IpFamily::V6,
        }
    }

    /// Address width in bits.
    pub fn bits(&self) -> u8 {
        match self {
            IpFamily::V4 => 32,
            IpFamily::V6 => 128,
        }
    }
}

/// Rewrite an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`) to plain IPv4.
///
/// Any address representable in 4 bytes is treated as IPv4.
pub fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => ip,
        },
        v4 => v4,
    }
}

/// Length of the `::ffff:0:0/96` prefix.
const MAPPED_PREFIX_LEN: u8 = 96;

/// Truncate a network to its prefix and fold IPv4-mapped IPv6 ranges that
/// lie entirely inside `::ffff:0:0/96` into their IPv4 equivalent.
pub fn canonical_net(net: IpNet) -> IpNet {
    match net.trunc() {
        IpNet::V6(v6) if v6.prefix_len() >= MAPPED_PREFIX_LEN => {
            match v6.network().to_ipv4_mapped() {
                Some(v4) => {
                    // prefix_len - 96 is at most 32, always valid
                    Ipv4Net::new(v4, v6.prefix_len() - MAPPED_PREFIX_LEN)
                        .map(IpNet::V4)
                        .unwrap_or(IpNet::V6(v6))
                }
                None => IpNet::V6(v6),
            }
        }
        other => other,
    }
}

pub(crate) fn net_from_v4_bytes(bytes: [u8; 4], prefix_len: u8) -> Option<IpNet> {
    Ipv4Net::new(Ipv4Addr::from(bytes), prefix_len)
        .ok()
        .map(IpNet::V4)
}

pub(crate) fn net_from_v6_bytes(bytes: [u8; 16], prefix_len: u8) -> Option<IpNet> {
    Ipv6Net::new(Ipv6Addr::from(bytes), prefix_len)
        .ok()
        .map(IpNet::V6)
}
