use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{
    format::FmtSpan,
    writer::{BoxMakeWriter, MakeWriterExt},
};

use super::console;

pub const CLI_PREFIX: &str = "daybook";

/// Directory for rolling log files. Lives outside every project so that logs never end up in a
/// commit. `$XDG_STATE_HOME/daybook/logs`, or `$HOME/.local/state/daybook/logs`.
pub fn default_log_dir() -> Option<PathBuf> {
    log_dir_from(env::var_os("XDG_STATE_HOME"), env::var_os("HOME"))
}

fn log_dir_from(state_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let mut path = state_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| PathBuf::from(home).join(".local/state")))?;
    path.push(CLI_PREFIX);
    path.push("logs");
    Some(path)
}

pub fn file_appender(prefix: &str, dir: &Path) -> Result<RollingFileAppender> {
    Ok(tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(prefix)
        .build(dir)?)
}

/// Sets up tracing. When `log_dir` is `None` nothing is written to disk, which is what read-only
/// commands such as `status` use. A log directory that can't be used only costs the log file.
pub fn enable_logging(
    prefix: &str,
    log_dir: Option<&Path>,
    log_level: Option<LevelFilter>,
    show_std: bool,
) {
    let appender = log_dir.and_then(|dir| match file_appender(prefix, dir) {
        Ok(appender) => Some(appender),
        Err(e) => {
            console::warning(&format!("Not writing logs to {dir:?}: {e:#}"));
            None
        }
    });

    let stdout = std::io::stdout.with_filter(move |_| show_std);
    let writer = match appender {
        Some(appender) => BoxMakeWriter::new(stdout.and(appender)),
        None => BoxMakeWriter::new(stdout),
    };

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .pretty()
        .init();
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
