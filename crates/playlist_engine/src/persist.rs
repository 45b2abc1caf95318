use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Atomically replace `path` with `content`: write a temp file next to
/// the target, sync it, then rename over it. The parent directory is
/// created if missing.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|err| PersistError::OutputDir(err.to_string()))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}

/// Copy a produced output file to a second location, creating the
/// target's directory as needed. A missing source file is not an
/// error; the copy is simply skipped.
pub fn copy_output(from: &Path, to: &Path) -> Result<bool, PersistError> {
    if !from.exists() {
        return Ok(false);
    }
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| PersistError::OutputDir(err.to_string()))?;
        }
    }
    fs::copy(from, to)?;
    Ok(true)
}
