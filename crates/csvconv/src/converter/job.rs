use std::path::{Path, PathBuf};

use crate::encoding::{encode_utf8_with_bom, EncodingLabel, TARGET_ENCODING};

/// One file's conversion, from decoded content to the bytes that get written.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub source_path: PathBuf,
    /// `None` means the source is overwritten in place.
    pub destination_path: Option<PathBuf>,
    pub source_encoding: EncodingLabel,
    pub content: String,
}

impl ConversionJob {
    pub fn new(
        source_path: PathBuf,
        destination_path: Option<PathBuf>,
        source_encoding: EncodingLabel,
        content: String,
    ) -> Self {
        // A destination naming the source itself is an in-place conversion
        let destination_path = destination_path.filter(|dest| !same_path(dest, &source_path));
        Self {
            source_path,
            destination_path,
            source_encoding,
            content,
        }
    }

    pub fn is_in_place(&self) -> bool {
        self.destination_path.is_none()
    }

    /// Path the converted bytes are written to.
    pub fn target_path(&self) -> &Path {
        self.destination_path.as_deref().unwrap_or(&self.source_path)
    }

    pub fn target_encoding(&self) -> EncodingLabel {
        EncodingLabel::new(TARGET_ENCODING)
    }

    pub fn encoded_output(&self) -> Vec<u8> {
        encode_utf8_with_bom(&self.content)
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
