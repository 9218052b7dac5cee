use chrono::{DateTime, Local, NaiveDate};

use crate::{config::ProjectSettings, utils::percentage::Percentage};

use super::{
    blockers::scan_blockers,
    calendar::ProjectClock,
    progress::{bonus_sources, count_bonus_files, estimate_progress},
    tables::{expected_output, focus_label, paper_focus, phase_label, research_focus},
};

/// Everything the reports say about "where are we today".
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectStatus {
    pub date: NaiveDate,
    pub day: u32,
    pub week: u32,
    pub total_days: u32,
    pub days_remaining: u32,
    pub progress: Percentage,
    pub phase: &'static str,
    pub focus: &'static str,
    pub research_focus: &'static str,
    pub paper_focus: &'static str,
    pub expected_output: &'static str,
    pub blockers: Vec<String>,
}

impl ProjectStatus {
    /// Pure part of the computation: the file count and the blockers are already known.
    pub fn from_parts(
        clock: &ProjectClock,
        total_days: u32,
        bonus_files: usize,
        blockers: Vec<String>,
    ) -> Self {
        let day = clock.day();
        let progress = estimate_progress(day, total_days, bonus_files);
        Self {
            date: clock.today(),
            day,
            week: clock.week(),
            total_days,
            days_remaining: total_days.saturating_sub(day),
            progress,
            phase: phase_label(day),
            focus: focus_label(day, clock.weekday()),
            research_focus: research_focus(day),
            paper_focus: paper_focus(progress),
            expected_output: expected_output(clock.weekday()),
            blockers,
        }
    }
}

/// Status for `now`, reading artifact counts and blockers from the project on disk. Has no failure
/// modes: a moment before the epoch counts as day 1.
pub fn compute_status(
    settings: &ProjectSettings,
    now: DateTime<Local>,
    last_commit: &str,
) -> ProjectStatus {
    let clock = ProjectClock::clamped(settings.epoch, now);
    let bonus_files = count_bonus_files(&bonus_sources(settings));
    let blockers = scan_blockers(settings, last_commit);
    ProjectStatus::from_parts(&clock, settings.total_days, bonus_files, blockers)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{DateTime, Duration, Local, TimeZone};
    use tempfile::tempdir;

    use crate::{
        config::{Config, ProjectSettings, PROJECT_EPOCH},
        journal::blockers::NO_BLOCKERS,
    };

    use super::compute_status;

    fn days_after_epoch(days: i64) -> DateTime<Local> {
        let date = PROJECT_EPOCH + Duration::days(days);
        Local
            .from_local_datetime(&date.and_hms_opt(10, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_first_day() -> Result<()> {
        let dir = tempdir()?;
        let settings = ProjectSettings::new(dir.path().to_owned(), Config::default());

        let status = compute_status(&settings, days_after_epoch(0), "No commits yet");

        assert_eq!(status.day, 1);
        assert_eq!(status.week, 1);
        assert_eq!(status.phase, "Foundation & Setup");
        assert_eq!(status.focus, "Project setup and environment configuration");
        assert_eq!(status.days_remaining, 329);
        assert_eq!(status.blockers, vec![NO_BLOCKERS]);
        Ok(())
    }

    #[test]
    fn test_last_early_day() -> Result<()> {
        let dir = tempdir()?;
        let settings = ProjectSettings::new(dir.path().to_owned(), Config::default());

        let status = compute_status(&settings, days_after_epoch(13), "No commits yet");

        assert_eq!(status.day, 14);
        assert_eq!(status.focus, "Week 2 review and planning");
        Ok(())
    }

    #[test]
    fn test_progress_without_artifacts() -> Result<()> {
        let dir = tempdir()?;
        let settings = ProjectSettings::new(dir.path().to_owned(), Config::default());

        let status = compute_status(&settings, days_after_epoch(59), "No commits yet");

        assert_eq!(status.day, 60);
        assert_eq!(status.progress.rounded_tenths(), 18.2);
        assert_eq!(status.phase, "Core Development");
        Ok(())
    }

    #[test]
    fn test_out_of_range_moments_are_clamped() -> Result<()> {
        let dir = tempdir()?;
        let settings = ProjectSettings::new(dir.path().to_owned(), Config::default());

        let early = compute_status(&settings, days_after_epoch(-100), "No commits yet");
        assert_eq!(early.day, 1);

        let late = compute_status(&settings, days_after_epoch(1000), "No commits yet");
        assert_eq!(late.day, 1001);
        assert_eq!(late.days_remaining, 0);
        assert_eq!(*late.progress, 100.);
        assert_eq!(late.phase, "Final Preparation");
        Ok(())
    }
}
