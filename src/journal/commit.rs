use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

use crate::{
    utils::prompt::Prompter,
    vcs::{CommitOutcome, VersionControl},
};

use super::{report::bullet_list, session::SessionSummary};

/// `Day N: <title>`, followed by the completed items when there are any.
pub fn commit_message(day: u32, summary: &SessionSummary) -> String {
    let mut message = format!("Day {day}: {}", summary.title());
    if !summary.completed().is_empty() {
        message.push_str("\n\nCompleted:\n");
        message.push_str(&bullet_list(summary.completed()));
    }
    message
}

/// Stages the whole working tree and commits it. A clean tree, or git reporting nothing to commit,
/// is a no-op. When the tree can't be inspected at all the error is returned.
pub async fn commit_changes(
    vcs: &dyn VersionControl,
    day: u32,
    summary: &SessionSummary,
) -> Result<CommitOutcome> {
    let (modified, untracked) = match (vcs.modified_files().await, vcs.untracked_files().await) {
        (Err(modified), Err(untracked)) => {
            warn!("Failed to list untracked files {untracked:?}");
            return Err(modified.context("Failed to inspect the working tree"));
        }
        (modified, untracked) => (
            modified
                .inspect_err(|e| warn!("Failed to list modified files {e:?}"))
                .unwrap_or_default(),
            untracked
                .inspect_err(|e| warn!("Failed to list untracked files {e:?}"))
                .unwrap_or_default(),
        ),
    };
    if modified.is_empty() && untracked.is_empty() {
        info!("Working tree is clean, skipping commit");
        return Ok(CommitOutcome::NothingToCommit);
    }

    vcs.stage_all().await?;
    let outcome = vcs.commit(&commit_message(day, summary)).await?;
    info!("Commit for day {day} finished with {outcome:?}");
    Ok(outcome)
}

/// Whether the new commit should be pushed. `auto_push` skips the question.
pub async fn push_approved<R, W>(auto_push: bool, prompter: &mut Prompter<R, W>) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if auto_push {
        return Ok(true);
    }
    prompter.confirm("\nPush to remote? (y/n): ").await
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};

    use crate::{
        journal::session::SessionSummary,
        utils::prompt::Prompter,
        vcs::{CommitOutcome, MockVersionControl},
    };

    use super::{commit_changes, commit_message, push_approved};

    fn summary(completed: Vec<String>) -> SessionSummary {
        SessionSummary::new("Brush", completed, "", "", "", vec![], None)
    }

    #[test]
    fn test_commit_message() {
        assert_eq!(commit_message(3, &summary(vec![])), "Day 3: Brush");
        assert_eq!(
            commit_message(3, &summary(vec!["a".into(), "b".into()])),
            "Day 3: Brush\n\nCompleted:\n- a\n- b"
        );
    }

    #[tokio::test]
    async fn test_clean_tree_is_a_no_op() -> Result<()> {
        let mut vcs = MockVersionControl::new();
        vcs.expect_modified_files().returning(|| Ok(vec![]));
        vcs.expect_untracked_files().returning(|| Ok(vec![]));
        vcs.expect_stage_all().never();
        vcs.expect_commit().never();

        let outcome = commit_changes(&vcs, 3, &summary(vec![])).await?;
        assert_eq!(outcome, CommitOutcome::NothingToCommit);
        Ok(())
    }

    #[tokio::test]
    async fn test_changes_are_staged_and_committed() -> Result<()> {
        let mut vcs = MockVersionControl::new();
        vcs.expect_modified_files()
            .returning(|| Err(anyhow!("diff failed")));
        vcs.expect_untracked_files()
            .returning(|| Ok(vec!["research/daily_notes.md".into()]));
        vcs.expect_stage_all().times(1).returning(|| Ok(()));
        vcs.expect_commit()
            .withf(|message: &str| message == "Day 3: Brush")
            .times(1)
            .returning(|_| Ok(CommitOutcome::Created));

        let outcome = commit_changes(&vcs, 3, &summary(vec![])).await?;
        assert_eq!(outcome, CommitOutcome::Created);
        Ok(())
    }

    #[tokio::test]
    async fn test_uninspectable_tree_is_an_error() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_modified_files()
            .returning(|| Err(anyhow!("git: command not found")));
        vcs.expect_untracked_files()
            .returning(|| Err(anyhow!("git: command not found")));
        vcs.expect_stage_all().never();
        vcs.expect_commit().never();

        let error = commit_changes(&vcs, 3, &summary(vec![])).await.unwrap_err();
        assert!(format!("{error:#}").contains("command not found"));
    }

    #[tokio::test]
    async fn test_nothing_to_commit_from_git_is_passed_through() -> Result<()> {
        let mut vcs = MockVersionControl::new();
        vcs.expect_modified_files()
            .returning(|| Ok(vec!["a.cs".into()]));
        vcs.expect_untracked_files().returning(|| Ok(vec![]));
        vcs.expect_stage_all().returning(|| Ok(()));
        vcs.expect_commit()
            .returning(|_| Ok(CommitOutcome::NothingToCommit));

        let outcome = commit_changes(&vcs, 3, &summary(vec![])).await?;
        assert_eq!(outcome, CommitOutcome::NothingToCommit);
        Ok(())
    }

    #[tokio::test]
    async fn test_push_gate() -> Result<()> {
        let input: &[u8] = b"n\ny\n";
        let mut prompter = Prompter::new(input, Vec::new());

        assert!(push_approved(true, &mut prompter).await?);
        assert!(!push_approved(false, &mut prompter).await?);
        assert!(push_approved(false, &mut prompter).await?);
        Ok(())
    }
}
