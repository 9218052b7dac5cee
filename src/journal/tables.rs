//! Fixed lookup tables that turn the project day into suggestions. Each lookup is total: every day
//! maps to exactly one label.

use chrono::Weekday;

use crate::utils::percentage::Percentage;

/// Days covered by [EARLY_FOCUS] before the weekday rotation takes over.
pub const EARLY_PHASE_DAYS: u32 = 14;

const EARLY_FOCUS: [&str; EARLY_PHASE_DAYS as usize] = [
    "Project setup and environment configuration",
    "Unity VR project initialization and XR setup",
    "Blender-Unity pipeline establishment",
    "Basic temporal data structure design",
    "First VR controller interaction",
    "Temporal visualization prototype",
    "Week 1 review and documentation",
    "Temporal brush concept implementation",
    "VR hand tracking refinement",
    "Time dimension visualization tests",
    "Performance baseline measurement",
    "User interaction patterns design",
    "Integration testing",
    "Week 2 review and planning",
];

/// Upper day bound (inclusive) of each phase.
const PHASES: [(u32, &str); 6] = [
    (14, "Foundation & Setup"),
    (60, "Core Development"),
    (120, "Feature Implementation"),
    (180, "Testing & Optimization"),
    (240, "User Studies"),
    (300, "Paper Writing"),
];
const FINAL_PHASE: &str = "Final Preparation";

const RESEARCH_QUESTIONS: [&str; 3] = [
    "RQ1: Intuitive time dimension representation in VR",
    "RQ2: Efficient temporal manipulation paradigms",
    "RQ3: Creative workflow enhancements",
];

/// Upper progress bound (exclusive) of each paper section.
const PAPER_SECTIONS: [(f64, &str); 4] = [
    (20., "Literature review collection"),
    (40., "Method section outline"),
    (60., "Implementation details"),
    (80., "Evaluation design"),
];
const FINAL_PAPER_SECTION: &str = "Results and discussion";

pub fn phase_label(day: u32) -> &'static str {
    PHASES
        .iter()
        .find(|(last_day, _)| day <= *last_day)
        .map(|(_, label)| *label)
        .unwrap_or(FINAL_PHASE)
}

/// The first [EARLY_PHASE_DAYS] days have a dedicated plan, afterwards the weekday decides.
pub fn focus_label(day: u32, weekday: Weekday) -> &'static str {
    let early = day
        .checked_sub(1)
        .and_then(|index| EARLY_FOCUS.get(index as usize).copied());
    match early {
        Some(label) => label,
        None => weekday_focus(weekday),
    }
}

fn weekday_focus(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Core feature development",
        Weekday::Tue => "Blender scripting & algorithms",
        Weekday::Wed => "Unity VR implementation",
        Weekday::Thu => "Integration & testing",
        Weekday::Fri => "Documentation & review",
        Weekday::Sat => "Experimentation & research",
        Weekday::Sun => "Planning & paper writing",
    }
}

/// Research questions rotate weekly.
pub fn research_focus(day: u32) -> &'static str {
    let week = day.saturating_sub(1) / 7;
    RESEARCH_QUESTIONS[(week % RESEARCH_QUESTIONS.len() as u32) as usize]
}

pub fn paper_focus(progress: Percentage) -> &'static str {
    PAPER_SECTIONS
        .iter()
        .find(|(limit, _)| *progress < *limit)
        .map(|(_, label)| *label)
        .unwrap_or(FINAL_PAPER_SECTION)
}

pub fn expected_output(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "New feature implementation or algorithm",
        Weekday::Tue => "Blender script with temporal functionality",
        Weekday::Wed => "Unity VR interaction improvement",
        Weekday::Thu => "Integration test results",
        Weekday::Fri => "Documentation or research notes",
        Weekday::Sat => "Experimental prototype or demo",
        Weekday::Sun => "Weekly summary and next week plan",
    }
}
