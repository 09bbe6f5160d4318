//! Allow/deny decisions on top of a [`RangeMatcher`].

use std::net::IpAddr;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::matcher::RangeMatcher;

/// What a range match means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FilterPolicy {
    /// Only addresses inside a listed range pass (admin gates, bypass lists)
    Allow,
    /// Addresses inside a listed range are rejected (block lists)
    #[default]
    Deny,
}

/// IP filter - turns range membership into an allow/deny decision.
///
/// The matcher is shared through an `Arc` so the owning service can hand the
/// same instance to several filters or reload it from elsewhere.
#[derive(Debug, Clone)]
pub struct IpFilter {
    matcher: Arc<RangeMatcher>,
    policy: FilterPolicy,
}

impl IpFilter {
    /// Create a filter from CIDR strings.
    pub fn new<I, S>(policy: FilterPolicy, ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_matcher(policy, Arc::new(RangeMatcher::new(ranges)?)))
    }

    /// Create a filter around an existing matcher.
    pub fn with_matcher(policy: FilterPolicy, matcher: Arc<RangeMatcher>) -> Self {
        Self { matcher, policy }
    }

    /// Create a filter from configuration, reading any range files it names.
    #[cfg(feature = "config")]
    pub fn from_config(config: &crate::config::FilterConfig) -> Result<Self> {
        let ranges = config.collect_ranges()?;
        Self::new(config.policy, &ranges)
    }

    /// Decide whether traffic from `ip` may pass.
    pub fn is_allowed(&self, ip: IpAddr) -> bool {
        let listed = self.matcher.matches(ip);
        match self.policy {
            FilterPolicy::Allow => listed,
            FilterPolicy::Deny => !listed,
        }
    }

    /// Atomically replace the ranges. On error the old ranges stay active.
    pub fn reload<I, S>(&self, ranges: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.matcher.replace(ranges)?;
        info!(policy = ?self.policy, ranges = self.matcher.len(), "ip filter reloaded");
        Ok(())
    }

    /// Re-read the configuration's ranges and swap them in.
    ///
    /// The policy is fixed at construction and is not changed by a reload.
    #[cfg(feature = "config")]
    pub fn reload_config(&self, config: &crate::config::FilterConfig) -> Result<()> {
        let ranges = config.collect_ranges()?;
        self.reload(&ranges)
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn matcher(&self) -> &Arc<RangeMatcher> {
        &self.matcher
    }
}
