//! Rendering of the two current-state documents. Both are plain template substitution and are
//! fully rewritten on every run.

use chrono::{DateTime, Local};

use crate::{
    config::{ProjectSettings, JOURNAL_LOG_FILE, KNOWLEDGE_LOG_FILE, TOTAL_WEEKS},
    utils::time::date_to_record_name,
    vcs::GitSnapshot,
};

use super::status::ProjectStatus;

/// Markdown bullets, `- None` for an empty list.
pub fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "- None".into();
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn active_files(snapshot: &GitSnapshot) -> String {
    if snapshot.modified.is_empty() {
        return "No pending changes".into();
    }
    snapshot
        .modified
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn hot_files(snapshot: &GitSnapshot) -> String {
    if snapshot.recently_edited.is_empty() {
        return "- No recent activity".into();
    }
    snapshot
        .recently_edited
        .iter()
        .map(|file| format!("- `{file}`"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The project master document: overall status, recent activity and today's priorities.
pub fn render_report(
    status: &ProjectStatus,
    snapshot: &GitSnapshot,
    settings: &ProjectSettings,
    now: DateTime<Local>,
) -> String {
    format!(
        "# TEMPORAL VR PROJECT MASTER
Last Updated: {updated} (Day {day})

## Project Overview
**Goal**: Create a VR system where users can model 3D objects by manipulating time as a 4th dimension
**Target**: SIGGRAPH Asia 2026 Paper Submission
**Duration**: 11 months (June 2025 - May 2026)

## Current Status
- **Phase**: Day {day} - {phase}
- **Days to Deadline**: {remaining} days
- **Progress**: {progress}
- **Week**: {week} of {total_weeks}

## Tech Stack
- **Blender 4.4**: Procedural modeling backend
- **Unity 2023.3 LTS**: VR frontend
- **OpenXR**: Cross-platform VR support
- **Cursor AI**: Development assistant

## Recent Activity
- **Last Commit**: {last_commit}
- **Current Branch**: {branch}
- **Modified Files**: {modified}
- **Active Files**: {active}

## Current Focus
- **Primary**: {focus}
- **Research Question**: {research}
- **Paper Section**: {paper}

## Active Issues
{blockers}

## Quick Links
- Research Notes: `{journal}`
- Blender Scripts: `blender/scripts/`
- Unity Project: `{unity}/`
- Knowledge Base: `{knowledge}`
- Experiments: `research/experiments/`

## Today's Priorities
1. {focus}
2. Update research notes with findings
3. Commit progress with meaningful message
",
        updated = now.format("%Y-%m-%d %H:%M"),
        day = status.day,
        phase = status.phase,
        remaining = status.days_remaining,
        progress = status.progress,
        week = status.week,
        total_weeks = TOTAL_WEEKS,
        last_commit = snapshot.last_commit,
        branch = snapshot.current_branch,
        modified = snapshot.modified.len(),
        active = active_files(snapshot),
        focus = status.focus,
        research = status.research_focus,
        paper = status.paper_focus,
        blockers = bullet_list(&status.blockers),
        journal = JOURNAL_LOG_FILE,
        unity = settings.config.unity_project_path,
        knowledge = KNOWLEDGE_LOG_FILE,
    )
}

/// The daily context document: what to do today and where yesterday ended.
pub fn render_daily_context(
    status: &ProjectStatus,
    snapshot: &GitSnapshot,
    previous_session: &str,
    settings: &ProjectSettings,
) -> String {
    format!(
        "# Daily Context - {date} (Day {day})

## Today's Focus
**{focus}**

## Project Status
- **Progress**: {progress} complete
- **Phase**: {phase}
- **Week**: {week} of {total_weeks}

## Yesterday's Summary
{previous_session}

## Git Status
- **Modified files**: {modified}
- **Current branch**: {branch}
- **Last commit**: {last_commit}

## Hot Files (Recently Active)
{hot_files}

## Current Blockers
{blockers}

## Today's Checklist
- [ ] Review yesterday's work
- [ ] {focus}
- [ ] Test changes in VR if applicable
- [ ] Update `{journal}`
- [ ] Commit with descriptive message
- [ ] Run `daybook evening`

## Research Focus
**Current RQ**: {research}
**Expected Output**: {expected}

## Quick Commands
```bash
# Test Blender script
\"{blender}\" -b -P blender/scripts/temporal_base.py

# Open Unity project
\"{unity}\" -projectPath \"{unity_project}\"

# Open the project in the editor
{cursor} .

# Evening routine
daybook evening
```

## References
- Blender 4.4 API: https://docs.blender.org/api/4.4/
- Unity 2023.3 Docs: https://docs.unity3d.com/2023.3/Documentation/Manual/
- OpenXR Spec: https://www.khronos.org/openxr/
",
        date = date_to_record_name(status.date),
        day = status.day,
        focus = status.focus,
        progress = status.progress,
        phase = status.phase,
        week = status.week,
        total_weeks = TOTAL_WEEKS,
        modified = snapshot.modified.len(),
        branch = snapshot.current_branch,
        last_commit = snapshot.last_commit,
        hot_files = hot_files(snapshot),
        blockers = bullet_list(&status.blockers),
        journal = JOURNAL_LOG_FILE,
        research = status.research_focus,
        expected = status.expected_output,
        blender = settings.config.blender_path,
        unity = settings.config.unity_path,
        unity_project = settings.config.unity_project_path,
        cursor = settings.config.cursor_path,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone};

    use crate::{
        config::{Config, ProjectSettings},
        journal::{calendar::ProjectClock, status::ProjectStatus},
        vcs::GitSnapshot,
    };

    use super::{bullet_list, render_daily_context, render_report};

    fn fixture() -> (ProjectStatus, GitSnapshot, ProjectSettings) {
        let now = Local.with_ymd_and_hms(2025, 8, 24, 9, 30, 0).unwrap();
        let clock = ProjectClock::new(NaiveDate::from_ymd_opt(2025, 6, 26).unwrap(), now).unwrap();
        let status = ProjectStatus::from_parts(
            &clock,
            330,
            0,
            vec!["Critical issues in TODO.md".into()],
        );
        let snapshot = GitSnapshot {
            last_commit: "a1b2c3d - Add scrubber (3 hours ago)".into(),
            current_branch: "main".into(),
            modified: vec!["a.cs".into(), "b.cs".into(), "c.cs".into(), "d.cs".into()],
            untracked: vec![],
            recently_edited: vec!["a.cs".into()],
        };
        let settings = ProjectSettings::new("/tmp/project".into(), Config::default());
        (status, snapshot, settings)
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(&[]), "- None");
        assert_eq!(bullet_list(&["a".into(), "b".into()]), "- a\n- b");
    }

    #[test]
    fn test_report_contents() {
        let (status, snapshot, settings) = fixture();
        let now = Local.with_ymd_and_hms(2025, 8, 24, 9, 30, 0).unwrap();

        let report = render_report(&status, &snapshot, &settings, now);

        assert!(report.starts_with(
            "# TEMPORAL VR PROJECT MASTER\nLast Updated: 2025-08-24 09:30 (Day 60)"
        ));
        assert!(report.contains("- **Phase**: Day 60 - Core Development"));
        assert!(report.contains("- **Days to Deadline**: 270 days"));
        assert!(report.contains("- **Progress**: 18.2%"));
        assert!(report.contains("- **Week**: 9 of 47"));
        assert!(report.contains("- **Active Files**: a.cs, b.cs, c.cs\n"));
        assert!(report.contains("- **Modified Files**: 4"));
        assert!(report.contains("## Active Issues\n- Critical issues in TODO.md\n"));
        assert!(report.contains("Unity Project: `unity/TemporalVR/`"));
        assert!(report.contains("1. Planning & paper writing"));
    }

    #[test]
    fn test_report_is_deterministic() {
        let (status, snapshot, settings) = fixture();
        let now = Local.with_ymd_and_hms(2025, 8, 24, 9, 30, 0).unwrap();
        assert_eq!(
            render_report(&status, &snapshot, &settings, now),
            render_report(&status, &snapshot, &settings, now)
        );
    }

    #[test]
    fn test_daily_context_contents() {
        let (status, mut snapshot, settings) = fixture();

        let context = render_daily_context(&status, &snapshot, "- exporter", &settings);
        assert!(context.starts_with("# Daily Context - 2025-08-24 (Day 60)"));
        assert!(context.contains("## Yesterday's Summary\n- exporter\n"));
        assert!(context.contains("## Hot Files (Recently Active)\n- `a.cs`\n"));
        assert!(context.contains("**Expected Output**: Weekly summary and next week plan"));

        snapshot.recently_edited.clear();
        let context = render_daily_context(&status, &snapshot, "- exporter", &settings);
        assert!(context.contains("- No recent activity"));
    }
}
