use encoding_rs::Encoding;

use super::EncodingLabel;

/// Guesses the encoding of raw bytes.
///
/// Returns `None` when the input is empty or gives no usable signal.
pub trait EncodingDetector: Send + Sync {
    fn detect(&self, bytes: &[u8]) -> Option<EncodingLabel>;
}

/// Statistical detector backed by `chardetng`.
///
/// BOMs, pure ASCII and valid UTF-8 are recognized up front so that
/// already-Unicode input is reported with the labels the resolver expects.
pub struct ChardetngDetector {
    tld: Option<Vec<u8>>,
}

impl ChardetngDetector {
    pub fn new() -> Self {
        Self { tld: None }
    }

    /// Hint the detector with a top-level domain (e.g. `tw`, `cn`).
    pub fn with_tld(tld: &str) -> Self {
        Self {
            tld: Some(tld.to_ascii_lowercase().into_bytes()),
        }
    }
}

impl Default for ChardetngDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingDetector for ChardetngDetector {
    fn detect(&self, bytes: &[u8]) -> Option<EncodingLabel> {
        if bytes.is_empty() {
            return None;
        }

        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            if encoding == encoding_rs::UTF_8 {
                return Some(EncodingLabel::new("utf-8-sig"));
            }
            return Some(EncodingLabel::from_encoding(encoding));
        }

        if bytes.is_ascii() {
            return Some(EncodingLabel::new("ascii"));
        }

        if std::str::from_utf8(bytes).is_ok() {
            return Some(EncodingLabel::new("utf-8"));
        }

        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(bytes, true);
        let encoding = detector.guess(self.tld.as_deref(), true);

        Some(EncodingLabel::from_encoding(encoding))
    }
}
