use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{ConvertError, FailureKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Output written as UTF-8 with BOM.
    Converted,
    /// Input was already Unicode; nothing written.
    AlreadyUnicode,
    Failed { kind: FailureKind, error: String },
}

impl Outcome {
    pub fn failed(error: &ConvertError) -> Self {
        Outcome::Failed {
            kind: error.kind(),
            error: error.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub source_path: PathBuf,
    pub detected_encoding: Option<String>,
    pub outcome: Outcome,
    pub destination_path: Option<PathBuf>,
    pub backup_path: Option<PathBuf>,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.source_path.display())?;
        if let Some(encoding) = &self.detected_encoding {
            writeln!(f, "Detected encoding: {}", encoding)?;
        }
        if let Some(backup) = &self.backup_path {
            writeln!(f, "Backup created: {}", backup.display())?;
        }

        match &self.outcome {
            Outcome::Converted => {
                writeln!(f, "Converted")?;
                if let Some(dest) = &self.destination_path {
                    writeln!(f, "Output file: {}", dest.display())?;
                }
                write!(f, "Encoding: UTF-8 with BOM")
            }
            Outcome::AlreadyUnicode => write!(f, "Already UTF-8, no conversion needed"),
            Outcome::Failed { error, .. } => write!(f, "Failed: {}", error),
        }
    }
}
