//! Atomic file output.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    #[error("atomic replace of {target} from {temp}: {source}")]
    AtomicReplaceFailed {
        temp: PathBuf,
        target: PathBuf,
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Write the full line sequence to `path` via a temp file and rename.
///
/// An interrupted write leaves the previous file intact instead of a
/// truncated one.
pub fn write_lines_atomic(path: &Path, lines: &[String]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recipe".to_string());
    let temp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ExportError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| ExportError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    for line in lines {
        file.write_all(line.as_bytes()).map_err(|e| ExportError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
    }
    file.sync_all().map_err(|e| ExportError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| ExportError::AtomicReplaceFailed {
        temp: temp_path,
        target: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), lines = lines.len(), "wrote recipe");
    Ok(())
}
