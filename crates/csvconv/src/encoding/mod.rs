pub mod detector;

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

pub use detector::{ChardetngDetector, EncodingDetector};

/// Byte-order-mark written in front of every converted file.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Label of the encoding every conversion produces.
pub const TARGET_ENCODING: &str = "utf-8-sig";

/// Default fallback ladder, tried in this order when detection misfires.
pub const DEFAULT_FALLBACK_ENCODINGS: [&str; 4] = ["big5", "gbk", "gb2312", "cp950"];

const ALREADY_UNICODE: [&str; 3] = ["utf-8", "utf-8-sig", "ascii"];

/// A normalized (trimmed, lowercase) text encoding label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EncodingLabel(String);

impl EncodingLabel {
    pub fn new(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase();
        let normalized = match normalized.as_str() {
            "utf8" => "utf-8".to_string(),
            "utf-8 with bom" | "utf8-sig" => "utf-8-sig".to_string(),
            _ => normalized,
        };
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for labels whose bytes are already valid for the target encoding.
    pub fn is_unicode(&self) -> bool {
        ALREADY_UNICODE.contains(&self.0.as_str())
    }

    /// Maps the label onto an `encoding_rs` decoder.
    ///
    /// `cp950` has no WHATWG label; Big5 as implemented by `encoding_rs` is a
    /// superset of code page 950, so it stands in for it.
    pub fn to_encoding(&self) -> Option<&'static Encoding> {
        match self.0.as_str() {
            "cp950" | "ms950" | "windows-950" => Some(encoding_rs::BIG5),
            "utf-8-sig" => Some(encoding_rs::UTF_8),
            other => Encoding::for_label(other.as_bytes()),
        }
    }

    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        Self::new(encoding.name())
    }
}

impl fmt::Display for EncodingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EncodingLabel {
    fn from(label: String) -> Self {
        Self::new(&label)
    }
}

impl From<&str> for EncodingLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<EncodingLabel> for String {
    fn from(label: EncodingLabel) -> Self {
        label.0
    }
}

/// Decodes `bytes` as `label` without replacement characters.
///
/// Malformed input is an error rather than U+FFFD. A leading BOM matching the
/// encoding is stripped so it does not end up in the text.
pub fn decode_strict(label: &EncodingLabel, bytes: &[u8]) -> Result<String, DecodeError> {
    let encoding = label
        .to_encoding()
        .ok_or_else(|| DecodeError::UnknownLabel(label.to_string()))?;

    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| DecodeError::Malformed {
            encoding: label.to_string(),
        })
}

/// Encodes text as UTF-8 with a leading byte-order-mark. Line endings are kept.
pub fn encode_utf8_with_bom(text: &str) -> Vec<u8> {
    let mut output = Vec::with_capacity(UTF8_BOM.len() + text.len());
    output.extend_from_slice(&UTF8_BOM);
    output.extend_from_slice(text.as_bytes());
    output
}
