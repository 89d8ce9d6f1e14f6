//! Newline-delimited URL list input.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Reads a URL list: one URL per line, surrounding whitespace stripped, blank
/// lines ignored, duplicates dropped (first occurrence kept).
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read url list {}", path.display()))?;
    Ok(parse_url_list(&data))
}

pub fn parse_url_list(data: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}
