//! Dated result files.
//!
//! One file per oscillator configuration per run date:
//! `watchlist-2024-03-15.txt`, `watchlist_weekly-2024-03-15.txt`, ...
//! A second run on the same date overwrites the earlier file.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::results::ResultMapping;

/// Name of the subdirectory result files are moved into when archiving.
pub const ARCHIVE_DIR: &str = "archive";

/// Errors from writing result files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to archive '{path}': {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `watchlist[_<suffix>]-<YYYY-MM-DD>.txt`
pub fn file_name(suffix: Option<&str>, date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d");
    match suffix {
        Some(s) if !s.is_empty() => format!("watchlist_{s}-{date}.txt"),
        _ => format!("watchlist-{date}.txt"),
    }
}

/// Write `mapping` to `dir`, returning the file path.
pub fn write_mapping(
    dir: &Path,
    suffix: Option<&str>,
    date: NaiveDate,
    mapping: &ResultMapping,
) -> Result<PathBuf, OutputError> {
    let path = dir.join(file_name(suffix, date));
    let write_err = |source| OutputError::Write {
        path: path.clone(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;
    std::fs::write(&path, mapping.render()).map_err(write_err)?;
    Ok(path)
}

/// Move a written result file into `<its dir>/archive/`, returning the new path.
pub fn archive(path: &Path) -> Result<PathBuf, OutputError> {
    let archive_err = |source| OutputError::Archive {
        path: path.to_path_buf(),
        source,
    };
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let dir = parent.join(ARCHIVE_DIR);
    std::fs::create_dir_all(&dir).map_err(archive_err)?;

    let name = path.file_name().ok_or_else(|| {
        archive_err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    let target = dir.join(name);
    std::fs::rename(path, &target).map_err(archive_err)?;
    Ok(target)
}
