use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{error, info, warn};

use crate::{
    config::ProjectSettings,
    fs::operations::write_document,
    journal::{
        archive::archive_daily_context,
        calendar::ProjectClock,
        commit::{commit_changes, push_approved},
        log::{append_session, last_session_summary, record_insight, AppendLog, SessionStats},
        report::{render_daily_context, render_report},
        session::{collect_session_summary, SessionSummary},
        status::{compute_status, ProjectStatus},
    },
    utils::{clock::Clock, console, prompt::Prompter, time::since_start_of_day},
    vcs::{CommitOutcome, GitSnapshot, PullOutcome, VersionControl},
};

/// The four routines of the CLI. Every step catches its own failures and reports them as warnings,
/// so a routine always runs to the end.
pub struct Journal {
    settings: ProjectSettings,
    vcs: Box<dyn VersionControl>,
    clock: Box<dyn Clock>,
}

impl Journal {
    pub fn new(
        settings: ProjectSettings,
        vcs: Box<dyn VersionControl>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            vcs,
            clock,
        }
    }

    fn project_clock(&self) -> ProjectClock {
        ProjectClock::clamped(self.settings.epoch, self.clock.time())
    }

    async fn current_status(&self) -> (ProjectStatus, GitSnapshot) {
        let snapshot = GitSnapshot::collect(self.vcs.as_ref()).await;
        let status = compute_status(&self.settings, self.clock.time(), &snapshot.last_commit);
        (status, snapshot)
    }

    /// Rewrites the project master and the daily context, archiving the previous context first.
    pub async fn update_contexts(&self) -> ProjectStatus {
        let (status, snapshot) = self.current_status().await;
        let now = self.clock.time();

        let report = render_report(&status, &snapshot, &self.settings, now);
        match write_document(&self.settings.project_master_path(), &report).await {
            Ok(()) => console::success(&format!("Project master updated (Day {})", status.day)),
            Err(e) => {
                error!("Failed to write project master {e:?}");
                console::warning(&format!("Project master not updated: {e:#}"));
            }
        }

        if self.settings.config.archive_daily_contexts {
            let archive_dirs = self.settings.archive_dirs();
            match archive_daily_context(&self.settings.daily_context_path(), &archive_dirs).await {
                Ok(written) => {
                    for path in written {
                        console::info(&format!("Archived to {}", path.display()));
                    }
                }
                Err(e) => {
                    warn!("Failed to archive daily context {e:?}");
                    console::warning(&format!("Daily context not archived: {e:#}"));
                }
            }
        }

        let journal = AppendLog::journal(&self.settings)
            .read()
            .await
            .inspect_err(|e| warn!("Failed to read journal {e:?}"))
            .ok()
            .flatten();
        let previous_session = last_session_summary(journal.as_deref());

        let context = render_daily_context(&status, &snapshot, &previous_session, &self.settings);
        match write_document(&self.settings.daily_context_path(), &context).await {
            Ok(()) => console::success(&format!("Daily context created for Day {}", status.day)),
            Err(e) => {
                error!("Failed to write daily context {e:?}");
                console::warning(&format!("Daily context not created: {e:#}"));
            }
        }

        status
    }

    pub async fn morning(&self) {
        let clock = self.project_clock();
        console::heading("Temporal VR - Morning Routine");
        println!("{}", clock.now().format("%Y-%m-%d %A"));
        println!("Day {} of {}", clock.day(), self.settings.total_days);
        console::rule();

        println!("\n[1/3] Pulling latest changes...");
        if !self.vcs.is_repository() {
            console::warning("Not a git repository, skipping pull");
        } else {
            match self.vcs.pull().await {
                Ok(PullOutcome::AlreadyUpToDate) => console::success("Already up to date"),
                Ok(PullOutcome::Updated) => console::success("Updated from remote"),
                Err(e) => {
                    warn!("Pull failed {e:?}");
                    console::warning("Git pull failed - check connection");
                }
            }
        }

        println!("\n[2/3] Updating contexts...");
        let status = self.update_contexts().await;

        println!("\n[3/3] Today's Focus");
        console::rule();
        println!("Focus: {}", status.focus);
        println!("Research: {}", status.research_focus);
        println!("Expected output: {}", status.expected_output);

        println!();
        console::success("Morning setup complete!");
        console::info("Check daily_context.md for full details");
    }

    pub async fn update(&self) {
        console::info("Updating contexts only...");
        self.update_contexts().await;
        console::success("Contexts updated!");
    }

    /// Prints the status without touching any file.
    pub async fn status(&self) {
        let (status, _) = self.current_status().await;
        println!("{}", render_status(&status));
    }

    pub async fn evening<R, W>(&self, prompter: &mut Prompter<R, W>)
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let clock = self.project_clock();
        console::heading("Temporal VR - Evening Routine");
        println!("Completing Day {}", clock.day());
        console::rule();

        let summary = match collect_session_summary(clock.day(), prompter).await {
            Ok(summary) => summary,
            Err(e) => {
                error!("Failed to read the session summary {e:?}");
                console::warning(&format!("Session summary could not be read: {e:#}"));
                return;
            }
        };

        println!("\nProcessing your summary...");
        let (status, snapshot) = self.current_status().await;

        let commits_today = self
            .vcs
            .commits_since(since_start_of_day(clock.now()))
            .await
            .inspect_err(|e| warn!("Failed to count today's commits {e:?}"))
            .unwrap_or(0);
        let stats = SessionStats {
            commits_today,
            modified_files: snapshot.modified.len(),
            progress: status.progress,
        };

        match append_session(&AppendLog::journal(&self.settings), &summary, &status, &stats).await {
            Ok(()) => console::success("Research notes updated"),
            Err(e) => {
                error!("Failed to append session {e:?}");
                console::warning(&format!("Research notes not updated: {e:#}"));
            }
        }

        let knowledge = AppendLog::knowledge(&self.settings);
        match record_insight(&knowledge, summary.insight(), &status).await {
            Ok(true) => console::success("Knowledge base updated"),
            Ok(false) => {}
            Err(e) => {
                error!("Failed to record insight {e:?}");
                console::warning(&format!("Knowledge base not updated: {e:#}"));
            }
        }

        if self.vcs.is_repository() {
            self.commit_session(status.day, &summary, prompter).await;
        } else {
            console::warning("Not a git repository, skipping commit");
        }

        console::heading("Today's Statistics");
        println!("- Day completed: {}/{}", status.day, status.total_days);
        println!("- Overall progress: {}", status.progress);
        println!("- Days remaining: {}", status.days_remaining);
        println!();
        console::success("Great work today!");
        println!("See you tomorrow for Day {}!", status.day + 1);
    }

    async fn commit_session<R, W>(
        &self,
        day: u32,
        summary: &SessionSummary,
        prompter: &mut Prompter<R, W>,
    ) where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match commit_changes(self.vcs.as_ref(), day, summary).await {
            Ok(CommitOutcome::Created) => {
                console::success(&format!("Committed: {}", summary.title()));
            }
            Ok(CommitOutcome::NothingToCommit) => {
                console::info("No changes to commit");
                return;
            }
            Err(e) => {
                error!("Commit failed {e:?}");
                console::warning(&format!("Git error: {e:#}"));
                return;
            }
        }

        let approved = push_approved(self.settings.config.auto_push, prompter)
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to read push confirmation {e:?}");
                false
            });
        if !approved {
            return;
        }

        match self.vcs.push(&self.settings.config.git_remote).await {
            Ok(()) => console::success("Pushed to remote"),
            Err(e) => {
                error!("Push failed {e:?}");
                console::warning(&format!("Push failed, the commit is kept locally: {e:#}"));
            }
        }
        info!("Evening commit for day {day} done");
    }
}

/// Everything [compute_status] returns, as printed by `status`.
pub fn render_status(status: &ProjectStatus) -> String {
    format!(
        "Project Status
- Day: {day}/{total}
- Progress: {progress}
- Phase: {phase}
- Days remaining: {remaining}
- Focus: {focus}
- Research: {research}
- Blockers: {blockers}",
        day = status.day,
        total = status.total_days,
        progress = status.progress,
        phase = status.phase,
        remaining = status.days_remaining,
        focus = status.focus,
        research = status.research_focus,
        blockers = status.blockers.join("; "),
    )
}
