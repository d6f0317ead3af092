mod allocator;
mod config;
mod matcher;
mod sanitize;
mod timestamp;
mod walker;

pub use allocator::{
    apply_plan, parse_sequence_number, plan_directory, DirectoryOutcome, MatchedFile,
    RenameAction, RenamePlan,
};
pub use config::{app_paths, load_config, save_config, AppConfig, AppPaths};
pub use matcher::{match_files, SuffixSet, SuffixSetError, DEFAULT_SUFFIXES};
pub use sanitize::sanitize_prefix;
pub use timestamp::{
    read_capture_time, resolve_timestamp, ResolvedTimestamp, TimestampSource,
};
pub use walker::{walk_tree, WalkOptions, WalkSummary};
