use std::{
    path::PathBuf,
    process::{Output, Stdio},
};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::{CommitOutcome, PullOutcome, VersionControl};

/// [VersionControl] backed by the `git` executable. Commands run in the project root and block
/// until git exits; there is no timeout.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[instrument(skip(self))]
    async fn run(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        debug!("git {} exited with {}", args.join(" "), output.status);
        Ok(output)
    }

    /// Runs git and returns stdout, failing on a non-zero exit.
    async fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args).await?;
        if !output.status.success() {
            bail!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VersionControl for GitCli {
    fn is_repository(&self) -> bool {
        self.root.join(".git").exists()
    }

    async fn head_summary(&self) -> Result<Option<String>> {
        let output = self
            .run(&["log", "-1", "--pretty=format:%h - %s (%cr)"])
            .await?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            if has_no_commits(&stderr) {
                return Ok(None);
            }
            bail!("git log exited with {}: {}", output.status, stderr.trim());
        }
        Ok(first_line(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn modified_files(&self) -> Result<Vec<String>> {
        Ok(non_empty_lines(
            &self.run_checked(&["diff", "--name-only"]).await?,
        ))
    }

    async fn untracked_files(&self) -> Result<Vec<String>> {
        Ok(non_empty_lines(
            &self
                .run_checked(&["ls-files", "--others", "--exclude-standard"])
                .await?,
        ))
    }

    async fn recently_edited(&self, window: Duration) -> Result<Vec<String>> {
        let since = since_argument(window);
        Ok(non_empty_lines(
            &self
                .run_checked(&["log", &since, "--name-only", "--pretty=format:"])
                .await?,
        ))
    }

    async fn current_branch(&self) -> Result<Option<String>> {
        Ok(first_line(
            &self.run_checked(&["branch", "--show-current"]).await?,
        ))
    }

    async fn commits_since(&self, window: Duration) -> Result<usize> {
        let since = since_argument(window);
        let output = self.run(&["log", &since, "--oneline"]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if has_no_commits(&stderr) {
                return Ok(0);
            }
            bail!("git log exited with {}: {}", output.status, stderr.trim());
        }
        Ok(non_empty_lines(&String::from_utf8_lossy(&output.stdout)).len())
    }

    async fn stage_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"]).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<CommitOutcome> {
        let output = self.run(&["commit", "-m", message]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() {
            return Ok(CommitOutcome::Created);
        }
        if is_nothing_to_commit(&stdout) {
            return Ok(CommitOutcome::NothingToCommit);
        }
        bail!(
            "git commit exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )
    }

    async fn push(&self, remote: &str) -> Result<()> {
        self.run_checked(&["push", remote]).await?;
        Ok(())
    }

    async fn pull(&self) -> Result<PullOutcome> {
        let stdout = self.run_checked(&["pull"]).await?;
        Ok(if is_up_to_date(&stdout) {
            PullOutcome::AlreadyUpToDate
        } else {
            PullOutcome::Updated
        })
    }
}

fn since_argument(window: Duration) -> String {
    format!("--since={} seconds ago", window.num_seconds().max(0))
}

fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn first_line(output: &str) -> Option<String> {
    non_empty_lines(output).into_iter().next()
}

fn has_no_commits(stderr: &str) -> bool {
    stderr.contains("does not have any commits yet") || stderr.contains("bad default revision")
}

fn is_nothing_to_commit(stdout: &str) -> bool {
    stdout.contains("nothing to commit") || stdout.contains("nothing added to commit")
}

fn is_up_to_date(stdout: &str) -> bool {
    stdout.contains("Already up to date") || stdout.contains("Already up-to-date")
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use tempfile::tempdir;

    use crate::vcs::VersionControl;

    use super::{
        first_line, has_no_commits, is_nothing_to_commit, is_up_to_date, non_empty_lines,
        since_argument, GitCli,
    };

    #[test]
    fn test_non_empty_lines() {
        let output = "src/main.rs\n\n  docs/notes.md \n\n";
        assert_eq!(
            non_empty_lines(output),
            vec!["src/main.rs".to_string(), "docs/notes.md".to_string()]
        );
        assert!(non_empty_lines("").is_empty());
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("main\n"), Some("main".into()));
        assert_eq!(first_line("\n"), None);
    }

    #[test]
    fn test_since_argument() {
        assert_eq!(since_argument(Duration::hours(24)), "--since=86400 seconds ago");
        assert_eq!(since_argument(Duration::seconds(-5)), "--since=0 seconds ago");
    }

    #[test]
    fn test_output_markers() {
        assert!(is_nothing_to_commit(
            "On branch main\nnothing to commit, working tree clean\n"
        ));
        assert!(!is_nothing_to_commit("[main 1a2b3c4] Day 3: pipeline\n"));
        assert!(is_up_to_date("Already up to date.\n"));
        assert!(!is_up_to_date("Fast-forward\n README.md | 2 +-\n"));
        assert!(has_no_commits(
            "fatal: your current branch 'main' does not have any commits yet\n"
        ));
    }

    #[test]
    fn test_is_repository() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let git = GitCli::new(dir.path().to_owned());
        assert!(!git.is_repository());
        std::fs::create_dir(dir.path().join(".git"))?;
        assert!(git.is_repository());
        Ok(())
    }
}
