use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Moves a source file aside before it is overwritten.
///
/// Backups are siblings named `<source><suffix>`. When that name is taken the
/// numbered variants `<source>_2<suffix>`, `<source>_3<suffix>`, ... are used so
/// an older backup is never clobbered.
pub struct BackupStore {
    suffix: String,
}

impl BackupStore {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// The preferred backup path for `source`, whether or not it is free.
    pub fn backup_path(&self, source: &Path) -> PathBuf {
        let mut name = source.as_os_str().to_os_string();
        name.push(&self.suffix);
        PathBuf::from(name)
    }

    /// Renames `source` to a free backup path and returns that path.
    ///
    /// Only `rename` is used, never a copy. On failure the source is left
    /// where it was.
    pub fn backup(&self, source: &Path) -> Result<PathBuf, StorageError> {
        let backup_path = self.resolve_conflict(source)?;

        std::fs::rename(source, &backup_path).map_err(|e| StorageError::MoveFile {
            from: source.to_path_buf(),
            to: backup_path.clone(),
            source: e,
        })?;

        Ok(backup_path)
    }

    /// Finds an unused backup path for `source`.
    /// The rename in `backup()` still races with other processes creating the
    /// same name; this only avoids overwriting backups that already exist.
    fn resolve_conflict(&self, source: &Path) -> Result<PathBuf, StorageError> {
        let path = self.backup_path(source);

        // symlink_metadata also sees broken symlinks
        if std::fs::symlink_metadata(&path).is_err() {
            return Ok(path);
        }

        for counter in 2..=1000 {
            let mut name = source.as_os_str().to_os_string();
            name.push(format!("_{}{}", counter, self.suffix));
            let candidate = PathBuf::from(name);

            if std::fs::symlink_metadata(&candidate).is_err() {
                return Ok(candidate);
            }
        }

        Err(StorageError::FileExists(path))
    }
}

/// Destination for converted bytes.
pub trait OutputWriter: Send + Sync {
    /// Creates `path`; fails if anything already exists there.
    fn write_new(&self, path: &Path, content: &[u8]) -> Result<(), StorageError>;

    fn write_replace(&self, path: &Path, content: &[u8]) -> Result<(), StorageError>;
}

/// Writes straight to the local filesystem.
pub struct FileWriter;

impl OutputWriter for FileWriter {
    fn write_new(&self, path: &Path, content: &[u8]) -> Result<(), StorageError> {
        write_new(path, content)
    }

    fn write_replace(&self, path: &Path, content: &[u8]) -> Result<(), StorageError> {
        write_replace(path, content)
    }
}

/// Writes `content` to a path that must not exist yet (O_CREAT | O_EXCL).
///
/// Used after the source was moved to its backup, so anything found at the
/// path in the meantime is left alone.
pub fn write_new(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| StorageError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| StorageError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Writes `content` to `path`, replacing any existing file.
pub fn write_replace(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    std::fs::write(path, content).map_err(|e| StorageError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
