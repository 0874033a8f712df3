//! Turns raw bytes into text, tolerating detector misfires.
//!
//! The detected label is tried first. When detection is inconclusive or the
//! guess cannot decode the bytes, a fixed ladder of legacy encodings is walked
//! in order and the first one that decodes cleanly wins.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::encoding::{
    decode_strict, ChardetngDetector, EncodingDetector, EncodingLabel,
    DEFAULT_FALLBACK_ENCODINGS,
};
use crate::error::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Input is already in a Unicode-compatible encoding; nothing to convert.
    AlreadyUnicode(EncodingLabel),
    /// Input decoded successfully with `encoding`.
    Decoded { text: String, encoding: EncodingLabel },
}

impl Resolution {
    pub fn encoding(&self) -> &EncodingLabel {
        match self {
            Resolution::AlreadyUnicode(label) => label,
            Resolution::Decoded { encoding, .. } => encoding,
        }
    }
}

pub struct Resolver {
    detector: Box<dyn EncodingDetector>,
    fallbacks: Vec<EncodingLabel>,
}

impl Resolver {
    pub fn new(detector: Box<dyn EncodingDetector>, fallbacks: Vec<EncodingLabel>) -> Self {
        Self {
            detector,
            fallbacks,
        }
    }

    /// Resolver with the given detector and the default fallback ladder.
    pub fn with_detector(detector: Box<dyn EncodingDetector>) -> Self {
        let fallbacks = DEFAULT_FALLBACK_ENCODINGS
            .iter()
            .map(|label| EncodingLabel::new(label))
            .collect();
        Self::new(detector, fallbacks)
    }

    pub fn from_config(config: &Config) -> Self {
        let fallbacks = config
            .fallback_encodings
            .iter()
            .map(|label| EncodingLabel::new(label))
            .collect();
        let detector = match &config.detector_tld {
            Some(tld) => ChardetngDetector::with_tld(tld),
            None => ChardetngDetector::new(),
        };
        Self::new(Box::new(detector), fallbacks)
    }

    pub fn resolve(&self, bytes: &[u8]) -> Result<Resolution, ResolveError> {
        let detected = self.detector.detect(bytes);
        let mut attempted = Vec::new();

        match &detected {
            Some(label) if label.is_unicode() => {
                debug!("Detected {}, no conversion needed", label);
                return Ok(Resolution::AlreadyUnicode(label.clone()));
            }
            Some(label) => {
                info!("Detected encoding: {}", label);
                match decode_strict(label, bytes) {
                    Ok(text) => {
                        return Ok(Resolution::Decoded {
                            text,
                            encoding: label.clone(),
                        })
                    }
                    Err(e) => {
                        warn!("Reading as {} failed ({}), trying other encodings", label, e);
                        attempted.push(label.to_string());
                    }
                }
            }
            None => {
                warn!("Encoding detection was inconclusive, trying fallback encodings");
            }
        }

        for candidate in &self.fallbacks {
            debug!("Trying {}", candidate);
            match decode_strict(candidate, bytes) {
                Ok(text) => {
                    info!("Decoded successfully as {}", candidate);
                    return Ok(Resolution::Decoded {
                        text,
                        encoding: candidate.clone(),
                    });
                }
                Err(e) => {
                    debug!("{}", e);
                    attempted.push(candidate.to_string());
                }
            }
        }

        Err(ResolveError::DecodeExhausted {
            detected: detected.map(|label| label.to_string()),
            attempted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector(Option<&'static str>);

    impl EncodingDetector for FixedDetector {
        fn detect(&self, _bytes: &[u8]) -> Option<EncodingLabel> {
            self.0.map(EncodingLabel::new)
        }
    }

    fn resolver(detected: Option<&'static str>) -> Resolver {
        Resolver::with_detector(Box::new(FixedDetector(detected)))
    }

    #[test]
    fn test_already_unicode_short_circuits() {
        for label in ["utf-8", "UTF-8-SIG", "ascii"] {
            let resolution = resolver(Some(label)).resolve(b"\xFF not even valid").unwrap();
            assert!(matches!(resolution, Resolution::AlreadyUnicode(_)));
        }
    }

    #[test]
    fn test_primary_decode_uses_detected_label() {
        let (bytes, _, _) = encoding_rs::GBK.encode("中文数据");
        let resolution = resolver(Some("GBK")).resolve(&bytes).unwrap();

        assert_eq!(
            resolution,
            Resolution::Decoded {
                text: "中文数据".to_string(),
                encoding: EncodingLabel::new("gbk"),
            }
        );
    }

    #[test]
    fn test_inconclusive_detection_walks_fallbacks() {
        let (bytes, _, _) = encoding_rs::BIG5.encode("繁體中文");
        let resolution = resolver(None).resolve(&bytes).unwrap();

        assert_eq!(resolution.encoding().as_str(), "big5");
        assert!(matches!(resolution, Resolution::Decoded { ref text, .. } if text == "繁體中文"));
    }

    #[test]
    fn test_misdetection_falls_back() {
        // 0x80 as a trail byte is valid GBK but never valid Big5 or UTF-8
        let bytes = [0x81, 0x80];
        let resolution = resolver(Some("utf-8-bogus-label")).resolve(&bytes).unwrap();

        assert_eq!(resolution.encoding().as_str(), "gbk");
    }

    #[test]
    fn test_unknown_detected_label_falls_back() {
        let (bytes, _, _) = encoding_rs::BIG5.encode("測試");
        let resolution = resolver(Some("x-made-up")).resolve(&bytes).unwrap();

        assert_eq!(resolution.encoding().as_str(), "big5");
    }

    #[test]
    fn test_exhaustion_reports_every_attempt() {
        // 0xFF is not a lead byte in Big5 or GBK
        let bytes = [0xFF, 0xFF, 0xFF];
        let err = resolver(Some("shift_jis")).resolve(&bytes).unwrap_err();

        assert_eq!(
            err,
            ResolveError::DecodeExhausted {
                detected: Some("shift_jis".to_string()),
                attempted: vec![
                    "shift_jis".to_string(),
                    "big5".to_string(),
                    "gbk".to_string(),
                    "gb2312".to_string(),
                    "cp950".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_empty_input_decodes_with_first_fallback() {
        let resolution = resolver(None).resolve(b"").unwrap();
        assert_eq!(
            resolution,
            Resolution::Decoded {
                text: String::new(),
                encoding: EncodingLabel::new("big5"),
            }
        );
    }

    #[test]
    fn test_custom_fallback_order() {
        let (bytes, _, _) = encoding_rs::BIG5.encode("測試");
        let resolver = Resolver::new(
            Box::new(FixedDetector(None)),
            vec![EncodingLabel::new("gbk"), EncodingLabel::new("big5")],
        );

        // Big5 bytes for these characters are also valid GBK, so order decides
        assert_eq!(resolver.resolve(&bytes).unwrap().encoding().as_str(), "gbk");
    }
}
