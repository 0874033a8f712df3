//! Detects the encoding of CSV files and re-encodes them as UTF-8 with BOM.
//!
//! The [`resolver`] turns raw bytes into text, trying the detected encoding
//! first and then a fixed ladder of legacy Chinese encodings. The
//! [`converter`] writes the result, moving the original to a `.backup`
//! sibling before overwriting it in place. The [`batch`] driver applies the
//! converter to every eligible file of a directory.

pub mod batch;
pub mod config;
pub mod converter;
pub mod encoding;
pub mod error;
pub mod resolver;
pub mod sanitize;
pub mod storage;

pub use batch::{BatchDriver, BatchReport, DirectoryScanner, FileFilter};
pub use config::{load_config, load_config_from_str, Config};
pub use converter::{ConversionJob, ConversionReport, Converter, Outcome};
pub use encoding::{ChardetngDetector, EncodingDetector, EncodingLabel};
pub use error::{
    BatchError, ConfigError, ConvertError, DecodeError, FailureKind, ResolveError, StorageError,
};
pub use resolver::{Resolution, Resolver};
