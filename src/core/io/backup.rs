//! Timestamped copies of the data directory

use crate::core::error::DataError;
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Folder-name format of a backup (`YYYY-MM-DD_HH-MM-SS`)
pub const BACKUP_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Result of [`create_backup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSummary {
    /// Folder the files were copied into
    pub path: PathBuf,
    /// Number of files copied
    pub files: usize,
    /// Total size of the backup folder in bytes
    pub bytes: u64,
}

impl BackupSummary {
    /// Size in whole kilobytes
    #[must_use]
    pub const fn kilobytes(&self) -> u64 {
        self.bytes / 1024
    }
}

/// Copy every regular file of `data_dir` into a new timestamped folder
/// under `backups_dir`
///
/// A missing data directory still produces an (empty) backup folder. If a
/// folder for the current second already exists a numeric suffix is added.
///
/// # Errors
/// `DataError::Io` if a folder cannot be created or a file cannot be copied
pub fn create_backup(data_dir: &Path, backups_dir: &Path) -> Result<BackupSummary, DataError> {
    fs::create_dir_all(backups_dir)?;
    let path = create_stamped_dir(backups_dir)?;

    let mut files = 0;
    if data_dir.is_dir() {
        for entry in fs::read_dir(data_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            fs::copy(entry.path(), path.join(entry.file_name()))?;
            files += 1;
        }
    } else {
        crate::warn!("Data directory {} not found, nothing to back up", data_dir.display());
    }

    let bytes = directory_size(&path)?;
    crate::info!("Backup of {files} files ({bytes} bytes) created at {}", path.display());
    Ok(BackupSummary { path, files, bytes })
}

fn create_stamped_dir(backups_dir: &Path) -> Result<PathBuf, DataError> {
    let stamp = Local::now().format(BACKUP_STAMP_FORMAT).to_string();
    let mut candidate = backups_dir.join(&stamp);
    let mut attempt = 1;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                candidate = backups_dir.join(format!("{stamp}-{attempt}"));
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Total size in bytes of every file below `path`
///
/// # Errors
/// `DataError::Io` if a directory cannot be listed
pub fn directory_size(path: &Path) -> Result<u64, DataError> {
    let mut total = 0;
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            total += directory_size(&entry.path())?;
        } else if file_type.is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}
