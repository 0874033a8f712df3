pub mod scanner;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, info_span};

use crate::config::Config;
use crate::converter::{ConversionReport, Converter, Outcome};
use crate::error::BatchError;

pub use scanner::{DirectoryScanner, FileFilter};

/// Per-file results of one directory run, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub results: Vec<ConversionReport>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn converted(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Converted))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::AlreadyUnicode))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.results
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No CSV files found in {}", self.directory.display());
        }
        write!(
            f,
            "{} files: {} converted, {} already UTF-8, {} failed",
            self.results.len(),
            self.converted(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Runs the converter in place over every eligible file of one directory.
pub struct BatchDriver {
    converter: Converter,
    filter: FileFilter,
}

impl BatchDriver {
    pub fn new(converter: Converter, filter: FileFilter) -> Self {
        Self { converter, filter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Converter::from_config(config), FileFilter::from_config(config))
    }

    pub fn run(&self, directory: &Path) -> Result<BatchReport, BatchError> {
        let _batch_span = info_span!("batch").entered();

        let files = DirectoryScanner::new(directory, self.filter.clone()).scan()?;
        if files.is_empty() {
            info!("No eligible files found");
        } else {
            info!("Found {} files to convert", files.len());
        }

        // One file failing never stops the others
        let results = files
            .iter()
            .map(|path| self.converter.convert_report(path, None))
            .collect();

        Ok(BatchReport {
            directory: directory.to_path_buf(),
            results,
        })
    }
}
