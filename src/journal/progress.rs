use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{config::ProjectSettings, utils::percentage::Percentage};

/// Progress added per counted artifact.
pub const BONUS_PER_FILE: f64 = 0.3;
/// The artifact bonus never exceeds this many percentage points.
pub const BONUS_CEILING: f64 = 15.;

/// A directory whose files of a given extension count towards the bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusSource {
    pub dir: PathBuf,
    pub extension: &'static str,
    pub recursive: bool,
}

impl BonusSource {
    fn new(dir: PathBuf, extension: &'static str, recursive: bool) -> Self {
        Self {
            dir,
            extension,
            recursive,
        }
    }

    /// Missing directories count as zero.
    pub fn count(&self) -> usize {
        count_files(&self.dir, self.extension, self.recursive)
    }
}

/// Blender scripts, Unity scripts (whole asset tree), research notes and experiment write-ups.
pub fn bonus_sources(settings: &ProjectSettings) -> Vec<BonusSource> {
    vec![
        BonusSource::new(settings.path("blender/scripts"), "py", false),
        BonusSource::new(settings.unity_project_dir().join("Assets"), "cs", true),
        BonusSource::new(settings.path("research"), "md", false),
        BonusSource::new(settings.path("research/experiments"), "md", false),
    ]
}

pub fn count_bonus_files(sources: &[BonusSource]) -> usize {
    sources.iter().map(BonusSource::count).sum()
}

fn count_files(dir: &Path, extension: &str, recursive: bool) -> usize {
    let walker = WalkDir::new(dir).min_depth(1);
    let walker = if recursive { walker } else { walker.max_depth(1) };

    walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == extension))
        .count()
}

pub fn bonus(files: usize) -> f64 {
    (files as f64 * BONUS_PER_FILE).min(BONUS_CEILING)
}

/// Linear progress over the planned length plus the artifact bonus, capped at 100.
pub fn estimate_progress(day: u32, total_days: u32, bonus_files: usize) -> Percentage {
    let base = if total_days == 0 {
        100.
    } else {
        f64::from(day) / f64::from(total_days) * 100.
    };
    Percentage::new_clamped(base + bonus(bonus_files))
}
