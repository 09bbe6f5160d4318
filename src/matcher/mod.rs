mod compare;
mod linear;
mod range_set;
mod table;

pub use linear::LinearMatcher;
pub use table::{parse_cidr, RangeTable};

use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::Result;
use crate::parser::parse_ranges_from_file;
use crate::types::IpFamily;

/// Trait for IP membership matchers
pub trait IpMatch: Send + Sync {
    /// Check if the address falls inside any configured range
    fn matches(&self, ip: IpAddr) -> bool;
}

/// Range matcher with atomic whole-set replacement.
///
/// Lookups take a shared read lock and run concurrently. A replacement
/// builds a new [`RangeTable`] without holding the lock and only takes the
/// write lock to swap it in, so readers see either the old pair or the new
/// pair, never a mix.
#[derive(Debug, Default)]
pub struct RangeMatcher {
    table: RwLock<Arc<RangeTable>>,
}

impl RangeMatcher {
    /// Create a matcher from a list of CIDR strings.
    pub fn new<I, S>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = RangeTable::from_ranges(ranges)?;
        log_table("built", &table);
        Ok(Self::from_table(table))
    }

    /// Wrap an already-built table.
    pub fn from_table(table: RangeTable) -> Self {
        Self {
            table: RwLock::new(Arc::new(table)),
        }
    }

    /// Create a matcher from a range list file (see [`parse_ranges`]).
    ///
    /// [`parse_ranges`]: crate::parser::parse_ranges
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let ranges = parse_ranges_from_file(path)?;
        Self::new(&ranges)
    }

    /// Check whether `ip` falls inside any range of its own family.
    pub fn matches(&self, ip: IpAddr) -> bool {
        self.table.read().contains(ip)
    }

    /// Replace every range with a new list.
    ///
    /// On error the current ranges stay in effect and the error is returned.
    pub fn replace<I, S>(&self, ranges: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = match RangeTable::from_ranges(ranges) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "rejected range replacement, keeping current ranges");
                return Err(e);
            }
        };
        log_table("replaced", &table);
        self.swap(table);
        Ok(())
    }

    /// Replace every range with the contents of a range list file.
    pub fn replace_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ranges = match parse_ranges_from_file(path) {
            Ok(ranges) => ranges,
            Err(e) => {
                warn!(error = %e, "rejected range file, keeping current ranges");
                return Err(e);
            }
        };
        self.replace(&ranges)
    }

    /// Swap in a prebuilt table, returning the previous one.
    pub fn swap(&self, table: RangeTable) -> Arc<RangeTable> {
        let table = Arc::new(table);
        std::mem::replace(&mut *self.table.write(), table)
    }

    /// Current table. Stays consistent even if a replacement happens later.
    pub fn snapshot(&self) -> Arc<RangeTable> {
        Arc::clone(&self.table.read())
    }

    /// Number of distinct ranges currently loaded.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}

impl IpMatch for RangeMatcher {
    fn matches(&self, ip: IpAddr) -> bool {
        RangeMatcher::matches(self, ip)
    }
}

fn log_table(action: &str, table: &RangeTable) {
    debug!(
        action,
        ipv4_ranges = table.family_len(IpFamily::V4),
        ipv4_prefix_lengths = table.prefix_lengths(IpFamily::V4).len(),
        ipv6_ranges = table.family_len(IpFamily::V6),
        ipv6_prefix_lengths = table.prefix_lengths(IpFamily::V6).len(),
        "range table ready"
    );
}
