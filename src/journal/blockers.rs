use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::ProjectSettings;

/// The single entry reported when no check finds anything.
pub const NO_BLOCKERS: &str = "no blockers detected";

pub const LARGE_FILE_THRESHOLD: u64 = 50 * 1024 * 1024;

/// Directory names that are never scanned for large files.
const SKIPPED_DIRS: [&str; 3] = [".git", "node_modules", "Library"];

/// Keyword scan of the TODO document.
pub fn todo_blockers(todo: &str) -> Vec<String> {
    let upper = todo.to_uppercase();
    let mut blockers = vec![];
    if upper.contains("BLOCKER") {
        blockers.push("Critical blockers in TODO.md".to_string());
    }
    if upper.contains("CRITICAL") {
        blockers.push("Critical issues in TODO.md".to_string());
    }
    blockers
}

/// Keyword scan of the latest commit summary.
pub fn commit_blocker(last_commit: &str) -> Option<String> {
    last_commit
        .to_lowercase()
        .contains("fix")
        .then(|| "Recent bug fixes in progress".to_string())
}

pub fn large_file_blocker(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string_lossy().to_string());
    format!("Large file warning: {name}")
}

/// First file under `root` bigger than `threshold` bytes. Unreadable entries are skipped.
pub fn find_large_file(root: &Path, threshold: u64) -> Option<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_str().unwrap_or("");
            entry.depth() == 0 || !SKIPPED_DIRS.contains(&name)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            entry
                .metadata()
                .map(|metadata| metadata.len() > threshold)
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
}

/// Combines the independent checks, in order. Never returns an empty list.
pub fn detect_blockers(
    todo: Option<&str>,
    last_commit: &str,
    large_file: Option<&Path>,
) -> Vec<String> {
    let mut blockers = todo.map(todo_blockers).unwrap_or_default();
    blockers.extend(commit_blocker(last_commit));
    blockers.extend(large_file.map(large_file_blocker));

    if blockers.is_empty() {
        blockers.push(NO_BLOCKERS.to_string());
    }
    blockers
}

/// Runs every check against the project on disk.
pub fn scan_blockers(settings: &ProjectSettings, last_commit: &str) -> Vec<String> {
    let todo = std::fs::read_to_string(settings.todo_path())
        .inspect_err(|e| debug!("TODO document not read {e}"))
        .ok();
    let large_file = find_large_file(&settings.root, LARGE_FILE_THRESHOLD);
    detect_blockers(todo.as_deref(), last_commit, large_file.as_deref())
}
