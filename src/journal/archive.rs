use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use tracing::info;

use crate::{fs::operations::copy_if_absent, utils::time::date_to_record_name};

pub fn archive_name(date: NaiveDate) -> String {
    format!("daily_context_{}.md", date_to_record_name(date))
}

/// Copies the previous daily context into every archive directory, named after the date it was last
/// modified. An archive that already exists is never overwritten. Returns the files written.
pub async fn archive_daily_context(
    source: &Path,
    archive_dirs: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let metadata = match tokio::fs::metadata(source).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e).with_context(|| format!("Failed to inspect {source:?}")),
    };
    let modified: DateTime<Local> = metadata.modified()?.into();
    let name = archive_name(modified.date_naive());

    let mut written = vec![];
    for dir in archive_dirs {
        let destination = dir.join(&name);
        if copy_if_absent(source, &destination).await? {
            info!("Archived daily context to {destination:?}");
            written.push(destination);
        }
    }
    Ok(written)
}
