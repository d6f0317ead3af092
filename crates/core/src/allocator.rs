use crate::timestamp::{ResolvedTimestamp, TimestampSource};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedFile {
    pub path: PathBuf,
    pub timestamp: DateTime<Local>,
    pub source: TimestampSource,
}

impl MatchedFile {
    pub fn new(path: PathBuf, resolved: ResolvedTimestamp) -> Self {
        Self {
            path,
            timestamp: resolved.instant,
            source: resolved.source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameAction {
    pub from: PathBuf,
    pub to: PathBuf,
}

// Computed before any filesystem mutation; actions are ordered, compaction
// of existing numbers first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub dir: PathBuf,
    pub prefix: String,
    pub actions: Vec<RenameAction>,
    pub modified: usize,
    pub unmodified: usize,
}

impl RenamePlan {
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty() && self.unmodified == 0
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DirectoryOutcome {
    pub modified: usize,
    pub unmodified: usize,
}

// `<prefix>_<digits>`: leading zeros do not change the value, anything
// after the digits is ignored.
pub fn parse_sequence_number(file_name: &str, prefix: &str) -> Option<u32> {
    let rest = file_name.strip_prefix(prefix)?.strip_prefix('_')?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u32>().ok()
}

// Pure: touches no filesystem state. Existing numbers compact ascending
// onto the counter sequence 1, 2, ...; the counter never overtakes them,
// so a compaction target is always vacant. Unnumbered files then take the
// following counter values in timestamp order.
pub fn plan_directory(dir: &Path, prefix: &str, mut files: Vec<MatchedFile>) -> RenamePlan {
    files.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut numbered: Vec<(u32, &MatchedFile)> = Vec::new();
    let mut unnumbered: Vec<&MatchedFile> = Vec::new();
    let mut seen = HashSet::<u32>::new();

    for file in &files {
        let name = file
            .path
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default();
        match parse_sequence_number(&name, prefix) {
            // On a duplicate number the earliest file keeps it; the later
            // one is demoted and renumbered below.
            Some(seq) if seen.insert(seq) => numbered.push((seq, file)),
            _ => unnumbered.push(file),
        }
    }

    numbered.sort_by_key(|(seq, _)| *seq);

    let mut actions = Vec::new();
    let mut modified = 0usize;
    let mut unmodified = 0usize;
    let mut next_seq = 1u32;

    for (seq, file) in numbered {
        if seq == next_seq {
            unmodified += 1;
        } else {
            actions.push(rename_action(dir, prefix, next_seq, &file.path));
            modified += 1;
        }
        next_seq += 1;
    }

    for file in unnumbered {
        let action = rename_action(dir, prefix, next_seq, &file.path);
        if action.to == file.path {
            // A demoted duplicate can land on the number it already
            // carries; it is already in place.
            unmodified += 1;
        } else {
            actions.push(action);
            modified += 1;
        }
        next_seq += 1;
    }

    RenamePlan {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
        actions,
        modified,
        unmodified,
    }
}

fn rename_action(dir: &Path, prefix: &str, seq: u32, from: &Path) -> RenameAction {
    let extension = from
        .extension()
        .map(|v| format!(".{}", v.to_string_lossy()))
        .unwrap_or_default();
    RenameAction {
        from: from.to_path_buf(),
        to: dir.join(format!("{prefix}_{seq:03}{extension}")),
    }
}

// The first failure aborts the rest of the directory's plan so the counter
// invariant is never half-applied.
pub fn apply_plan(plan: &RenamePlan) -> Result<DirectoryOutcome> {
    for action in &plan.actions {
        if action.to.exists() {
            bail!(
                "rename target already exists: {} -> {}",
                action.from.display(),
                action.to.display()
            );
        }
        fs::rename(&action.from, &action.to).with_context(|| {
            format!(
                "rename failed: {} -> {}",
                action.from.display(),
                action.to.display()
            )
        })?;
    }

    Ok(DirectoryOutcome {
        modified: plan.modified,
        unmodified: plan.unmodified,
    })
}
