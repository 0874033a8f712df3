use serde::{Deserialize, Serialize};

use crate::encoding::DEFAULT_FALLBACK_ENCODINGS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    /// Extension a file needs to be picked up by a batch run.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Suffix appended to the source path when backing it up.
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
    /// Encodings tried in order when detection fails or misfires.
    #[serde(default = "default_fallback_encodings")]
    pub fallback_encodings: Vec<String>,
    #[serde(default)]
    pub case_insensitive_extension: bool,
    /// Top-level domain hint for the detector, e.g. `cn` for Simplified Chinese.
    #[serde(default)]
    pub detector_tld: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_extension() -> String {
    ".csv".to_string()
}

fn default_backup_suffix() -> String {
    ".backup".to_string()
}

fn default_fallback_encodings() -> Vec<String> {
    DEFAULT_FALLBACK_ENCODINGS
        .iter()
        .map(|label| label.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            extension: default_extension(),
            backup_suffix: default_backup_suffix(),
            fallback_encodings: default_fallback_encodings(),
            case_insensitive_extension: false,
            detector_tld: None,
        }
    }
}
