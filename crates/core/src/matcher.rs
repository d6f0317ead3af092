use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SUFFIXES: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "mp4", "avi", "mov", "mkv", "heic",
];

// Immutable snapshot of the configured file-type suffixes, built once per
// walk and passed down explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuffixSet {
    suffixes: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuffixSetError {
    #[error("suffix list is empty")]
    Empty,
}

impl Default for SuffixSet {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SuffixSet {
    // Accepts user input like "JPG, Png ,mp4"; both "," and the
    // full-width "，" separate entries. Input that normalizes to nothing
    // yields an empty set, which simply matches no files.
    pub fn parse(input: &str) -> Result<Self, SuffixSetError> {
        if input.trim().is_empty() {
            return Err(SuffixSetError::Empty);
        }

        let mut cleaned = String::with_capacity(input.len());
        for ch in input.chars() {
            if ch.is_whitespace() {
                continue;
            }
            if ch == ',' || ch == '，' {
                cleaned.push(',');
            } else if ch.is_ascii_alphabetic() {
                cleaned.push(ch.to_ascii_lowercase());
            }
        }

        Ok(Self::from_normalized(cleaned.split(',')))
    }

    pub fn from_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: Vec<String> = values
            .into_iter()
            .map(|value| {
                value
                    .as_ref()
                    .chars()
                    .filter(char::is_ascii_alphabetic)
                    .map(|ch| ch.to_ascii_lowercase())
                    .collect::<String>()
            })
            .collect();
        Self::from_normalized(normalized.iter().map(String::as_str))
    }

    fn from_normalized<'a>(parts: impl Iterator<Item = &'a str>) -> Self {
        let mut suffixes = Vec::new();
        for part in parts {
            if part.is_empty() || suffixes.iter().any(|s| s == part) {
                continue;
            }
            suffixes.push(part.to_string());
        }
        Self { suffixes }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|v| v.to_str()) else {
            return false;
        };
        self.suffixes.iter().any(|s| ext.eq_ignore_ascii_case(s))
    }
}

// Non-recursive: direct children only, recursion is the walker's job.
pub fn match_files(dir: &Path, suffixes: &SuffixSet) -> Result<Vec<PathBuf>> {
    if suffixes.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("could not read directory: {}", dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("could not read entry in: {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if suffixes.matches(&path) {
            out.push(path);
        }
    }
    out.sort();

    Ok(out)
}
