//! The two append-only documents: the research journal (one section per session) and the knowledge
//! base (one section per recorded insight). Sections are only ever added at the end.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::{
    config::ProjectSettings,
    fs::operations::{append_exclusive, read_optional},
    utils::{percentage::Percentage, time::date_to_record_name},
};

use super::{report::bullet_list, session::SessionSummary, status::ProjectStatus};

pub const JOURNAL_HEADER: &str = "# Temporal VR Research Notebook\n\n";
pub const KNOWLEDGE_HEADER: &str = "# Temporal VR - Knowledge Base\n\n";

pub const NO_PREVIOUS_WORK: &str = "No previous work recorded";
pub const NO_SUMMARY: &str = "No summary found";

/// An append-only Markdown document created lazily with a fixed header.
#[derive(Debug, Clone)]
pub struct AppendLog {
    path: PathBuf,
    header: &'static str,
}

impl AppendLog {
    pub fn new(path: PathBuf, header: &'static str) -> Self {
        Self { path, header }
    }

    pub fn journal(settings: &ProjectSettings) -> Self {
        Self::new(settings.journal_log_path(), JOURNAL_HEADER)
    }

    pub fn knowledge(settings: &ProjectSettings) -> Self {
        Self::new(settings.knowledge_log_path(), KNOWLEDGE_HEADER)
    }

    pub async fn append(&self, section: &str) -> Result<()> {
        append_exclusive(&self.path, self.header, section).await
    }

    pub async fn read(&self) -> Result<Option<String>> {
        read_optional(&self.path).await
    }
}

/// Numbers recorded next to each session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    pub commits_today: usize,
    pub modified_files: usize,
    pub progress: Percentage,
}

pub fn render_session_entry(
    summary: &SessionSummary,
    status: &ProjectStatus,
    stats: &SessionStats,
) -> String {
    let reflection = summary
        .reflection()
        .map(|reflection| format!("### Reflection\n{reflection}\n"))
        .unwrap_or_default();

    format!(
        "
## {date} ({weekday}) - Day {day}: {title}

### Completed Tasks
{completed}

### Technical Progress
{technical}

### Research Insights
{insight}

### Issues & Blockers
{issue}

### Statistics
- Git commits today: {commits}
- Files modified: {modified}
- Progress: {progress}

### Next Steps
{next_steps}

{reflection}
---
",
        date = date_to_record_name(status.date),
        weekday = status.date.format("%a"),
        day = status.day,
        title = summary.title(),
        completed = bullet_list(summary.completed()),
        technical = or_placeholder(summary.technical(), "No technical updates"),
        insight = or_placeholder(summary.insight(), "No new insights today"),
        issue = or_placeholder(summary.issue(), "No issues encountered"),
        commits = stats.commits_today,
        modified = stats.modified_files,
        progress = stats.progress,
        next_steps = bullet_list(summary.next_steps()),
    )
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() {
        placeholder
    } else {
        text
    }
}

/// Adds exactly one section for the session.
pub async fn append_session(
    log: &AppendLog,
    summary: &SessionSummary,
    status: &ProjectStatus,
    stats: &SessionStats,
) -> Result<()> {
    log.append(&render_session_entry(summary, status, stats)).await?;
    info!("Appended session for day {}", status.day);
    Ok(())
}

pub fn render_insight_entry(insight: &str, status: &ProjectStatus) -> String {
    format!(
        "
## {date} - Day {day}

### Insight
{insight}

### Context
- Phase: {phase}
- Research Focus: {research_focus}

### Tags
#insight #day{day}

---
",
        date = date_to_record_name(status.date),
        day = status.day,
        phase = status.phase,
        research_focus = status.research_focus,
    )
}

/// Adds one section to the knowledge base. Blank insights are skipped; returns whether anything
/// was written.
pub async fn record_insight(
    log: &AppendLog,
    insight: &str,
    status: &ProjectStatus,
) -> Result<bool> {
    let insight = insight.trim();
    if insight.is_empty() {
        return Ok(false);
    }
    log.append(&render_insight_entry(insight, status)).await?;
    info!("Recorded insight for day {}", status.day);
    Ok(true)
}

/// Lines following a session heading that are searched for its summary.
const SUMMARY_WINDOW: usize = 9;
const SUMMARY_LINES: usize = 3;

/// Short summary of the newest dated session in the journal: up to three content lines following
/// its heading.
pub fn last_session_summary(journal: Option<&str>) -> String {
    let Some(journal) = journal else {
        return NO_PREVIOUS_WORK.into();
    };

    let lines = journal.lines().collect::<Vec<_>>();
    let Some(heading) = lines.iter().rposition(|line| is_dated_heading(line)) else {
        return NO_PREVIOUS_WORK.into();
    };

    let summary = lines[heading + 1..]
        .iter()
        .take(SUMMARY_WINDOW)
        .take_while(|line| !line.starts_with("## "))
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(SUMMARY_LINES)
        .collect::<Vec<_>>();

    if summary.is_empty() {
        NO_SUMMARY.into()
    } else {
        summary.join(" ")
    }
}

/// `## YYYY-...`
fn is_dated_heading(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("## ") else {
        return false;
    };
    let bytes = rest.as_bytes();
    bytes.len() >= 5 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}
