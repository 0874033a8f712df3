//! Test harness for isolated test execution.
//!
//! The `TestHarness` struct owns a temporary working directory and builds
//! converters and batch drivers either with the real `chardetng` detector or
//! with a scripted one, so fallback behavior can be tested deterministically.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use assert_fs::TempDir;

use csvconv::batch::FileFilter;
use csvconv::storage::BackupStore;
use csvconv::{BatchDriver, Config, Converter, EncodingDetector, EncodingLabel, Resolver};

/// Detector that always answers with the same label.
pub struct FixedDetector(pub Option<&'static str>);

impl EncodingDetector for FixedDetector {
    fn detect(&self, _bytes: &[u8]) -> Option<EncodingLabel> {
        self.0.map(EncodingLabel::new)
    }
}

/// Big5 bytes for `text`; panics if a character has no Big5 mapping.
pub fn big5(text: &str) -> Vec<u8> {
    let (bytes, _, unmappable) = encoding_rs::BIG5.encode(text);
    assert!(!unmappable, "fixture text is not representable in Big5");
    bytes.into_owned()
}

/// GBK bytes for `text`; panics if a character has no GBK mapping.
pub fn gbk(text: &str) -> Vec<u8> {
    let (bytes, _, unmappable) = encoding_rs::GBK.encode(text);
    assert!(!unmappable, "fixture text is not representable in GBK");
    bytes.into_owned()
}

/// Test harness providing an isolated directory for integration tests.
pub struct TestHarness {
    /// Temporary directory holding every input file.
    temp_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get the base temp directory path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a test input file and return its path.
    pub fn write_input(&self, filename: &str, content: &[u8]) -> PathBuf {
        let child = self.temp_dir.child(filename);
        child
            .write_binary(content)
            .expect("Failed to write input file");
        child.path().to_path_buf()
    }

    /// Read a file relative to the harness directory.
    pub fn read(&self, filename: &str) -> Vec<u8> {
        std::fs::read(self.temp_dir.path().join(filename)).expect("Failed to read file")
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.temp_dir.path().join(filename).exists()
    }

    /// Sorted names of every entry in the harness directory.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.temp_dir.path())
            .expect("Failed to list temp directory")
            .map(|entry| {
                entry
                    .expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Converter using the production detector and the given config.
    pub fn converter(&self, config: &Config) -> Converter {
        Converter::from_config(config)
    }

    /// Converter whose detector always reports `detected`.
    pub fn scripted_converter(&self, detected: Option<&'static str>) -> Converter {
        Converter::new(
            Resolver::with_detector(Box::new(FixedDetector(detected))),
            BackupStore::new(".backup"),
        )
    }

    /// Batch driver using the production detector.
    pub fn batch_driver(&self, config: &Config) -> BatchDriver {
        BatchDriver::from_config(config)
    }

    /// Batch driver with an injected detector, built from `config` otherwise.
    pub fn batch_driver_with_detector(
        &self,
        detector: Box<dyn EncodingDetector>,
        config: &Config,
    ) -> BatchDriver {
        let fallbacks = config
            .fallback_encodings
            .iter()
            .map(|label| EncodingLabel::new(label))
            .collect();
        let converter = Converter::new(
            Resolver::new(detector, fallbacks),
            BackupStore::new(config.backup_suffix.clone()),
        );
        BatchDriver::new(converter, FileFilter::from_config(config))
    }
}
