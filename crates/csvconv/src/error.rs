use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Config does not match schema: {errors}")]
    SchemaValidation { errors: String },

    #[error("Unknown fallback encoding '{0}'")]
    UnknownEncoding(String),
}

/// A single candidate encoding could not decode the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unknown encoding label '{0}'")]
    UnknownLabel(String),

    #[error("Input is not valid {encoding}")]
    Malformed { encoding: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No candidate encoding could decode the input (tried: {})", .attempted.join(", "))]
    DecodeExhausted {
        detected: Option<String>,
        attempted: Vec<String>,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move file from '{from}' to '{to}': {source}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File already exists: {0}")]
    FileExists(PathBuf),
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("File not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decode '{path}', specify the encoding manually (tried: {})", .attempted.join(", "))]
    DecodeExhausted {
        path: PathBuf,
        attempted: Vec<String>,
    },

    #[error("Backup of '{path}' failed, original left untouched: {source}")]
    BackupFailure {
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    #[error("{}", write_failure_message(.path, .backup.as_deref()))]
    WriteFailure {
        path: PathBuf,
        backup: Option<PathBuf>,
        #[source]
        source: StorageError,
    },
}

fn write_failure_message(path: &std::path::Path, backup: Option<&std::path::Path>) -> String {
    match backup {
        Some(backup) => format!(
            "Writing '{}' failed, restore the original from '{}'",
            path.display(),
            backup.display()
        ),
        None => format!("Writing '{}' failed", path.display()),
    }
}

/// Machine-readable classification of a failed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PathNotFound,
    NotAFile,
    ReadFailure,
    DecodeExhausted,
    BackupFailure,
    WriteFailure,
}

impl ConvertError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ConvertError::PathNotFound(_) => FailureKind::PathNotFound,
            ConvertError::NotAFile(_) => FailureKind::NotAFile,
            ConvertError::ReadSource { .. } => FailureKind::ReadFailure,
            ConvertError::DecodeExhausted { .. } => FailureKind::DecodeExhausted,
            ConvertError::BackupFailure { .. } => FailureKind::BackupFailure,
            ConvertError::WriteFailure { .. } => FailureKind::WriteFailure,
        }
    }
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Directory not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failure_names_backup() {
        let err = ConvertError::WriteFailure {
            path: PathBuf::from("data.csv"),
            backup: Some(PathBuf::from("data.csv.backup")),
            source: StorageError::FileExists(PathBuf::from("data.csv")),
        };

        let message = err.to_string();
        assert!(message.contains("data.csv.backup"));
        assert_eq!(err.kind(), FailureKind::WriteFailure);
    }

    #[test]
    fn test_decode_exhausted_lists_attempts() {
        let err = ResolveError::DecodeExhausted {
            detected: None,
            attempted: vec!["big5".to_string(), "gbk".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "No candidate encoding could decode the input (tried: big5, gbk)"
        );
    }
}
