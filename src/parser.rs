use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FilterError, Result};
use crate::matcher::parse_cidr;

/// Maximum nesting depth for `file:` include directives.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Parse a range list from text.
///
/// One CIDR per line; `#` starts a comment and blank lines are skipped.
/// A `file: /path/to/list` line includes another list in place; relative
/// include paths are resolved against the working directory. Every entry
/// is validated, so a list that parses here always builds a matcher.
pub fn parse_ranges(text: &str) -> Result<Vec<String>> {
    parse_ranges_inner(text, None, 0)
}

fn parse_ranges_inner(text: &str, origin: Option<&Path>, depth: usize) -> Result<Vec<String>> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(FilterError::ParseError(format!(
            "file include depth exceeds maximum ({MAX_INCLUDE_DEPTH}), possible circular include"
        )));
    }

    let mut ranges = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1;

        let line = match line.find('#') {
            Some(comment_pos) => &line[..comment_pos],
            None => line,
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(path) = line.strip_prefix("file:") {
            let path = resolve_include(origin, Path::new(path.trim()));
            ranges.extend(parse_ranges_from_file_inner(&path, depth + 1)?);
            continue;
        }

        parse_cidr(line).map_err(|e| FilterError::ParseErrorAtLine {
            file: origin.map(Path::to_path_buf),
            line: line_num,
            source: Box::new(e),
        })?;
        ranges.push(line.to_string());
    }

    Ok(ranges)
}

/// Relative includes inside a file are relative to that file's directory.
fn resolve_include(origin: Option<&Path>, include: &Path) -> PathBuf {
    match origin.and_then(Path::parent) {
        Some(dir) if include.is_relative() => dir.join(include),
        _ => include.to_path_buf(),
    }
}

/// Parse a range list from a file.
///
/// Relative `file:` includes inside it are resolved against its directory.
pub fn parse_ranges_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    parse_ranges_from_file_inner(path.as_ref(), 0)
}

fn parse_ranges_from_file_inner(path: &Path, depth: usize) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| FilterError::io_at(path, e))?;
    parse_ranges_inner(&text, Some(path), depth)
}
