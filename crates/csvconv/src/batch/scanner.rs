use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::BatchError;

/// Decides which file names a batch run picks up.
#[derive(Debug, Clone)]
pub struct FileFilter {
    extension: String,
    backup_suffix: String,
    case_insensitive: bool,
}

impl FileFilter {
    pub fn new(extension: &str, backup_suffix: &str, case_insensitive: bool) -> Self {
        Self {
            extension: extension.to_string(),
            backup_suffix: backup_suffix.to_string(),
            case_insensitive,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.extension,
            &config.backup_suffix,
            config.case_insensitive_extension,
        )
    }

    pub fn is_eligible(&self, filename: &str) -> bool {
        self.has_suffix(filename, &self.extension) && !self.has_suffix(filename, &self.backup_suffix)
    }

    fn has_suffix(&self, filename: &str, suffix: &str) -> bool {
        if !self.case_insensitive {
            return filename.ends_with(suffix);
        }
        filename.len() >= suffix.len()
            && filename.is_char_boundary(filename.len() - suffix.len())
            && filename[filename.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    }
}

pub struct DirectoryScanner {
    input_directory: PathBuf,
    filter: FileFilter,
}

impl DirectoryScanner {
    pub fn new<P: AsRef<Path>>(input_directory: P, filter: FileFilter) -> Self {
        Self {
            input_directory: input_directory.as_ref().to_path_buf(),
            filter,
        }
    }

    /// Lists eligible files in directory-listing order.
    pub fn scan(&self) -> Result<Vec<PathBuf>, BatchError> {
        if !self.input_directory.exists() {
            return Err(BatchError::PathNotFound(self.input_directory.clone()));
        }
        if !self.input_directory.is_dir() {
            return Err(BatchError::NotADirectory(self.input_directory.clone()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.input_directory)
            .min_depth(1)
            .max_depth(1) // Only the top level, never subdirectories
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Skip directories and anything else that is not a plain file
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(filename) = entry.file_name().to_str() else {
                debug!("Skipping non UTF-8 file name: {:?}", entry.file_name());
                continue;
            };

            if self.filter.is_eligible(filename) {
                debug!("Found file: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        info!(
            "Scanned {} eligible files in {}",
            files.len(),
            self.input_directory.display()
        );
        Ok(files)
    }
}
