//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use csvconv::Config;

/// Builder for creating `Config` instances.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder starting from the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn extension(mut self, extension: &str) -> Self {
        self.config.extension = extension.to_string();
        self
    }

    pub fn backup_suffix(mut self, suffix: &str) -> Self {
        self.config.backup_suffix = suffix.to_string();
        self
    }

    pub fn fallback_encodings(mut self, labels: &[&str]) -> Self {
        self.config.fallback_encodings = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn case_insensitive_extension(mut self, enabled: bool) -> Self {
        self.config.case_insensitive_extension = enabled;
        self
    }

    pub fn detector_tld(mut self, tld: &str) -> Self {
        self.config.detector_tld = Some(tld.to_string());
        self
    }

    /// Build the config as a JSON string, for loader tests.
    pub fn build_json(self) -> String {
        serde_json::to_string_pretty(&self.config).expect("Failed to serialize config")
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
