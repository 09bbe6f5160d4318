//! IP Filter - concurrent IP range matching for allow/deny lists
//!
//! This library answers "is this address inside any of my ranges?" for:
//! - IPv4 and IPv6 CIDR ranges, kept strictly apart by address family
//! - Large lists (tens of thousands of entries) via per-prefix-length
//!   binary search
//! - Lock-protected whole-set replacement for configuration reloads
//! - Allow-list and deny-list policies
//!
//! # Example
//!
//! ```rust
//! use ipfilter_r::RangeMatcher;
//!
//! let matcher = RangeMatcher::new([
//!     "192.168.0.0/24",
//!     "192.168.100.0/24",
//!     "2001:db8::/64",
//! ])
//! .unwrap();
//!
//! assert!(matcher.matches("192.168.100.1".parse().unwrap()));
//! assert!(!matcher.matches("192.168.50.1".parse().unwrap()));
//!
//! // A bad reload is rejected and the old ranges stay active
//! assert!(matcher.replace(["10.0.0.0/8", "not-a-cidr"]).is_err());
//! assert!(matcher.matches("192.168.100.1".parse().unwrap()));
//! ```
//!
//! # Range List Syntax
//!
//! ```text
//! # comment
//! 10.0.0.0/8
//! 2001:db8::/32        # trailing comment
//! file: /etc/ipfilter/extra.txt
//! ```
//!
//! Every entry must carry a prefix length. IPv4-mapped IPv6 addresses and
//! ranges (`::ffff:a.b.c.d`) are treated as IPv4.

#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod parser;
pub mod types;

// Re-export commonly used items
#[cfg(feature = "config")]
pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use filter::{FilterPolicy, IpFilter};
pub use matcher::{parse_cidr, IpMatch, LinearMatcher, RangeMatcher, RangeTable};
pub use parser::{parse_ranges, parse_ranges_from_file};
pub use types::{canonical_ip, canonical_net, IpFamily};
