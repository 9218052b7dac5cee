//! Contains the contract daybook uses to talk to version control.
//! [git::GitCli] is the only implementation; it shells out to `git` and keeps every bit of output
//! parsing to itself.

pub mod git;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;
use tracing::warn;

/// Outcome of [VersionControl::commit].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created,
    NothingToCommit,
}

/// Outcome of [VersionControl::pull].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    AlreadyUpToDate,
    Updated,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Whether the project root is a repository at all.
    fn is_repository(&self) -> bool;

    /// One line describing HEAD, `None` for a repository without commits.
    async fn head_summary(&self) -> Result<Option<String>>;

    /// Tracked files with unstaged modifications.
    async fn modified_files(&self) -> Result<Vec<String>>;

    async fn untracked_files(&self) -> Result<Vec<String>>;

    /// Files touched by commits within `window`, newest first, may contain duplicates.
    async fn recently_edited(&self, window: Duration) -> Result<Vec<String>>;

    /// `None` when HEAD is detached.
    async fn current_branch(&self) -> Result<Option<String>>;

    async fn commits_since(&self, window: Duration) -> Result<usize>;

    async fn stage_all(&self) -> Result<()>;

    async fn commit(&self, message: &str) -> Result<CommitOutcome>;

    async fn push(&self, remote: &str) -> Result<()>;

    async fn pull(&self) -> Result<PullOutcome>;
}

pub const NO_REPOSITORY: &str = "No git repository";
pub const NO_COMMITS: &str = "No commits yet";
pub const GIT_ERROR: &str = "Git error";
pub const NO_BRANCH: &str = "none";
pub const UNKNOWN_BRANCH: &str = "unknown";
pub const DEFAULT_BRANCH: &str = "main";

const HOT_FILES_LIMIT: usize = 5;
const HOT_FILES_WINDOW: Duration = Duration::hours(24);

/// State of the working tree as shown in the reports. Never fails to build: anything that can't be
/// queried is replaced with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSnapshot {
    pub last_commit: String,
    pub current_branch: String,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
    pub recently_edited: Vec<String>,
}

impl GitSnapshot {
    pub fn unavailable() -> Self {
        Self {
            last_commit: NO_REPOSITORY.into(),
            current_branch: NO_BRANCH.into(),
            modified: vec![],
            untracked: vec![],
            recently_edited: vec![],
        }
    }

    pub async fn collect(vcs: &dyn VersionControl) -> Self {
        if !vcs.is_repository() {
            return Self::unavailable();
        }

        let last_commit = match vcs.head_summary().await {
            Ok(Some(summary)) => summary,
            Ok(None) => NO_COMMITS.into(),
            Err(e) => {
                warn!("Failed to read last commit {e:?}");
                GIT_ERROR.into()
            }
        };

        let current_branch = match vcs.current_branch().await {
            Ok(Some(branch)) => branch,
            Ok(None) => DEFAULT_BRANCH.into(),
            Err(e) => {
                warn!("Failed to read current branch {e:?}");
                UNKNOWN_BRANCH.into()
            }
        };

        let modified = vcs
            .modified_files()
            .await
            .inspect_err(|e| warn!("Failed to list modified files {e:?}"))
            .unwrap_or_default();

        let untracked = vcs
            .untracked_files()
            .await
            .inspect_err(|e| warn!("Failed to list untracked files {e:?}"))
            .unwrap_or_default();

        let recently_edited = vcs
            .recently_edited(HOT_FILES_WINDOW)
            .await
            .inspect_err(|e| warn!("Failed to list recently edited files {e:?}"))
            .map(|files| hot_files(files, HOT_FILES_LIMIT))
            .unwrap_or_default();

        Self {
            last_commit,
            current_branch,
            modified,
            untracked,
            recently_edited,
        }
    }
}

/// First `limit` distinct files, keeping their order.
fn hot_files(files: Vec<String>, limit: usize) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(limit);
    for file in files {
        if unique.len() == limit {
            break;
        }
        if !unique.contains(&file) {
            unique.push(file);
        }
    }
    unique
}
