use std::{io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::debug;

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {parent:?}"))?;
    }
    Ok(())
}

/// Appends `content` to the end of a file. A missing or empty file first receives `header`.
///
/// The file is opened in append mode and held under an exclusive lock while writing, so existing
/// bytes are never touched and two writers can't interleave inside one append.
pub async fn append_exclusive(path: &Path, header: &str, content: &str) -> Result<()> {
    ensure_parent(path).await?;

    let mut file = File::options()
        .append(true)
        .create(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {path:?} for appending"))?;

    file.lock_exclusive()?;
    let result = append_with_file(&mut file, header, content).await;
    file.unlock_async().await?;
    result.with_context(|| format!("Failed to append to {path:?}"))
}

async fn append_with_file(file: &mut File, header: &str, content: &str) -> Result<()> {
    let is_new = file.metadata().await?.len() == 0;

    let mut buffer = String::with_capacity(header.len() + content.len());
    if is_new {
        debug!("Writing header into a new document");
        buffer.push_str(header);
    }
    buffer.push_str(content);

    file.write_all(buffer.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Replaces the whole document with `content`.
pub async fn write_document(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path).await?;
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {path:?}"))
}

/// Reads a document, treating a missing file as `None`.
pub async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {path:?}")),
    }
}

/// Copies `source` to `destination` unless the destination already exists. The destination is
/// created with `create_new`, so the first writer wins even if two copies race.
///
/// Returns `true` when the copy was written.
pub async fn copy_if_absent(source: &Path, destination: &Path) -> Result<bool> {
    ensure_parent(destination).await?;

    let mut target = match File::options()
        .write(true)
        .create_new(true)
        .open(destination)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e).with_context(|| format!("Failed to create {destination:?}")),
    };

    let content = fs::read(source)
        .await
        .with_context(|| format!("Failed to read {source:?}"))?;
    target.write_all(&content).await?;
    target.flush().await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::{append_exclusive, copy_if_absent, read_optional, write_document};

    #[tokio::test]
    async fn test_append_creates_with_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/log.md");

        append_exclusive(&path, "# Header\n", "first\n").await?;
        append_exclusive(&path, "# Header\n", "second\n").await?;

        let content = tokio::fs::read_to_string(&path).await?;
        assert_eq!(content, "# Header\nfirst\nsecond\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_append_keeps_existing_bytes() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("log.md");
        let existing = "hand written\nno trailing newline";
        tokio::fs::write(&path, existing).await?;

        append_exclusive(&path, "# Header\n", "\nappended\n").await?;

        let content = tokio::fs::read_to_string(&path).await?;
        assert!(content.starts_with(existing));
        assert_eq!(&content[existing.len()..], "\nappended\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_copy_if_absent_first_write_wins() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("source.md");
        let destination = dir.path().join("archive/copy.md");

        write_document(&source, "v1").await?;
        assert!(copy_if_absent(&source, &destination).await?);

        write_document(&source, "v2").await?;
        assert!(!copy_if_absent(&source, &destination).await?);

        assert_eq!(read_optional(&destination).await?.as_deref(), Some("v1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_read_optional_missing() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(read_optional(&dir.path().join("none.md")).await?, None);
        Ok(())
    }
}
