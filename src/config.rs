//! Project configuration. `automation/config.json` holds the user editable part, everything else
//! is fixed for the lifetime of the project. [ProjectSettings] is built once at start up and handed
//! to every operation by reference.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

pub const CONFIG_FILE: &str = "automation/config.json";

/// Day 1 of the project.
pub const PROJECT_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2025, 6, 26) {
    Some(date) => date,
    None => panic!("Project epoch must be a valid date"),
};

/// Planned length of the project, 11 months.
pub const TOTAL_DAYS: u32 = 330;
pub const TOTAL_WEEKS: u32 = 47;

pub const PROJECT_MASTER_FILE: &str = "project_master.md";
pub const DAILY_CONTEXT_FILE: &str = "daily_context.md";
pub const TODO_FILE: &str = "TODO.md";
pub const JOURNAL_LOG_FILE: &str = "research/daily_notes.md";
pub const KNOWLEDGE_LOG_FILE: &str = "knowledge/solutions.md";
pub const CONTEXT_ARCHIVE_DIRS: [&str; 2] = [".cursor/context/archive", "research/daily_contexts"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub blender_path: String,
    pub unity_path: String,
    pub cursor_path: String,
    pub git_remote: String,
    pub auto_push: bool,
    pub archive_daily_contexts: bool,
    pub unity_project_path: String,
    /// Keys daybook doesn't know about. They are kept so that saving never drops user data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blender_path: r"C:\Program Files\Blender Foundation\Blender 4.4\blender.exe".into(),
            unity_path: r"C:\Program Files\Unity\Hub\Editor\2023.3.55f1\Editor\Unity.exe".into(),
            cursor_path: "cursor".into(),
            git_remote: "origin".into(),
            auto_push: false,
            archive_daily_contexts: true,
            unity_project_path: "unity/TemporalVR".into(),
            extra: Map::new(),
        }
    }
}

impl Config {
    /// Loads the configuration, backfilling missing keys with defaults. `None` when the file
    /// doesn't exist. Unreadable or malformed files are reported as errors and left untouched;
    /// callers fall back to [Config::default].
    pub fn load(path: &Path) -> Result<Option<Config>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .with_context(|| format!("Config file {path:?} is corrupted")),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read config {path:?}")),
        }
    }

    /// Like [Config::load], but a missing file is created with the defaults.
    pub fn load_or_create(path: &Path) -> Result<Config> {
        if let Some(config) = Self::load(path)? {
            return Ok(config);
        }
        let config = Config::default();
        config.save(path)?;
        info!("Created default config at {path:?}");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)
            .with_context(|| format!("Failed to write config to {path:?}"))
    }
}

/// Everything an operation needs to know about the project. Immutable once built.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    pub root: PathBuf,
    pub epoch: NaiveDate,
    pub total_days: u32,
    pub config: Config,
}

impl ProjectSettings {
    pub fn new(root: PathBuf, config: Config) -> Self {
        Self {
            root,
            epoch: PROJECT_EPOCH,
            total_days: TOTAL_DAYS,
            config,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn project_master_path(&self) -> PathBuf {
        self.path(PROJECT_MASTER_FILE)
    }

    pub fn daily_context_path(&self) -> PathBuf {
        self.path(DAILY_CONTEXT_FILE)
    }

    pub fn todo_path(&self) -> PathBuf {
        self.path(TODO_FILE)
    }

    pub fn journal_log_path(&self) -> PathBuf {
        self.path(JOURNAL_LOG_FILE)
    }

    pub fn knowledge_log_path(&self) -> PathBuf {
        self.path(KNOWLEDGE_LOG_FILE)
    }

    pub fn archive_dirs(&self) -> Vec<PathBuf> {
        CONTEXT_ARCHIVE_DIRS.iter().map(|dir| self.path(dir)).collect()
    }

    pub fn unity_project_dir(&self) -> PathBuf {
        self.root.join(&self.config.unity_project_path)
    }
}
