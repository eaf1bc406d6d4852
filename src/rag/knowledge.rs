//! The shop's knowledge base.

use std::fs;
use std::path::Path;

use anyhow::Context;

pub const FLAVOURS: [&str; 5] = [
    "We sell Vanilla ice cream. classic flavour, smooth and creamy.",
    "We sell Chocolate ice cream. is rich and sweet, made from cocoa.",
    "We sell Strawberry ice cream. has a fruity taste, usually pink in colour.",
    "We sell Mint chocolate chip ice cream. it is green, flavoured with mint and chocolate chips.",
    "We sell Cookies and cream ice cream. it is made with chunks of oreo in vanilla ice cream.",
];

pub fn default_entries() -> Vec<String> {
    FLAVOURS.iter().map(|entry| entry.to_string()).collect()
}

/// Reads one entry per non-blank line of a UTF-8 text file.
pub fn load_entries(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read knowledge file {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
