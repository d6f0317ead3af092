use crate::allocator::{apply_plan, plan_directory, MatchedFile, RenamePlan};
use crate::matcher::{match_files, SuffixSet};
use crate::sanitize::sanitize_prefix;
use crate::timestamp::resolve_timestamp;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub root: PathBuf,
    pub suffixes: SuffixSet,
    // false = dry-run: plans are computed and counted, nothing is renamed
    pub apply: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkSummary {
    pub suffixes: SuffixSet,
    pub directories: usize,
    pub modified: usize,
    pub unmodified: usize,
    // Directories without any matched file are omitted here.
    pub plans: Vec<RenamePlan>,
}

// Each directory is planned and applied independently, in lexicographic
// order. The first fatal rename error aborts the remainder of the walk;
// directories already processed keep their renames.
pub fn walk_tree(options: &WalkOptions) -> Result<WalkSummary> {
    if !options.root.is_dir() {
        anyhow::bail!("root folder does not exist: {}", options.root.display());
    }

    let mut summary = WalkSummary {
        suffixes: options.suffixes.clone(),
        ..WalkSummary::default()
    };

    for entry in WalkDir::new(&options.root).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("failed to walk tree under {}", options.root.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        summary.directories += 1;

        let basename = dir
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default();
        let prefix = sanitize_prefix(&basename);

        let matched = match_files(dir, &options.suffixes)?;
        let files: Vec<MatchedFile> = matched
            .into_iter()
            .map(|path| {
                let resolved = resolve_timestamp(&path);
                MatchedFile::new(path, resolved)
            })
            .collect();

        let plan = plan_directory(dir, &prefix, files);
        if plan.is_noop() {
            continue;
        }

        if options.apply {
            let outcome = apply_plan(&plan).with_context(|| {
                format!("renaming aborted in directory: {}", dir.display())
            })?;
            summary.modified += outcome.modified;
            summary.unmodified += outcome.unmodified;
        } else {
            summary.modified += plan.modified;
            summary.unmodified += plan.unmodified;
        }

        debug!(
            "{}: prefix={:?} modified={} unmodified={}",
            dir.display(),
            plan.prefix,
            plan.modified,
            plan.unmodified
        );
        summary.plans.push(plan);
    }

    Ok(summary)
}
