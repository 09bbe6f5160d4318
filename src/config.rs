//! Filter configuration.
//!
//! ```json
//! {
//!   "policy": "allow",
//!   "ranges": ["10.0.0.0/8", "2001:db8::/32"],
//!   "range_files": ["/etc/ipfilter/admins.txt"]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::filter::FilterPolicy;
use crate::parser::parse_ranges_from_file;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// What a range match means for the caller
    pub policy: FilterPolicy,
    /// Inline CIDR entries
    pub ranges: Vec<String>,
    /// Range list files, appended after the inline entries
    pub range_files: Vec<PathBuf>,
}

impl FilterConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| FilterError::ConfigError(e.to_string()))
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| FilterError::io_at(path, e))?;
        Self::from_json(&text)
    }

    /// Every configured range: inline entries first, then each file in order.
    pub fn collect_ranges(&self) -> Result<Vec<String>> {
        let mut ranges = self.ranges.clone();
        for path in &self.range_files {
            ranges.extend(parse_ranges_from_file(path)?);
        }
        Ok(ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let config = FilterConfig::from_json(
            r#"{"policy": "allow", "ranges": ["10.0.0.0/8", "2001:db8::/32"]}"#,
        )
        .unwrap();
        assert_eq!(config.policy, FilterPolicy::Allow);
        assert_eq!(config.ranges, vec!["10.0.0.0/8", "2001:db8::/32"]);
        assert!(config.range_files.is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = FilterConfig::from_json("{}").unwrap();
        assert_eq!(config, FilterConfig::default());
        assert_eq!(config.policy, FilterPolicy::Deny);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = FilterConfig::from_json(r#"{"rangez": []}"#).unwrap_err();
        assert!(matches!(err, FilterError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = FilterConfig::from_json(r#"{"policy": "maybe"}"#).unwrap_err();
        assert!(matches!(err, FilterError::ConfigError(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = FilterConfig::from_file("/nonexistent/ipfilter/config.json").unwrap_err();
        assert!(matches!(err, FilterError::IoError(_)));
    }

    #[test]
    fn test_collect_ranges_with_files() {
        let path = std::env::temp_dir().join(format!(
            "ipfilter_config_{}_ranges.txt",
            std::process::id()
        ));
        fs::write(&path, "# blocklist\n203.0.113.0/24\n").unwrap();

        let config = FilterConfig {
            policy: FilterPolicy::Deny,
            ranges: vec!["198.51.100.0/24".to_string()],
            range_files: vec![path.clone()],
        };
        let ranges = config.collect_ranges().unwrap();
        assert_eq!(ranges, vec!["198.51.100.0/24", "203.0.113.0/24"]);
        let _ = fs::remove_file(path);
    }
}
