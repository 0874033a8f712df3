use std::path::{Path, PathBuf};

use crate::encoding::EncodingLabel;

use super::report::{ConversionReport, Outcome};

/// State accumulated while one file moves through the converter.
pub struct ConversionContext {
    // Input
    pub source_path: PathBuf,
    pub requested_destination: Option<PathBuf>,

    // Resolve result, set even when decoding is exhausted
    pub detected_encoding: Option<EncodingLabel>,

    // Backup result, in-place mode only
    pub backup_path: Option<PathBuf>,

    // Write result
    pub destination_path: Option<PathBuf>,
}

impl ConversionContext {
    pub fn new(source_path: &Path, requested_destination: Option<&Path>) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            requested_destination: requested_destination.map(Path::to_path_buf),
            detected_encoding: None,
            backup_path: None,
            destination_path: None,
        }
    }

    pub fn into_report(self, outcome: Outcome) -> ConversionReport {
        ConversionReport {
            source_path: self.source_path,
            detected_encoding: self.detected_encoding.map(String::from),
            outcome,
            destination_path: self.destination_path,
            backup_path: self.backup_path,
        }
    }
}
