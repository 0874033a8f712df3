pub mod context;
pub mod job;
pub mod report;

use std::path::Path;

use tracing::{debug, info, info_span, warn};

use crate::config::Config;
use crate::error::{ConvertError, ResolveError};
use crate::resolver::{Resolution, Resolver};
use crate::sanitize;
use crate::storage::{BackupStore, FileWriter, OutputWriter};

pub use context::ConversionContext;
pub use job::ConversionJob;
pub use report::{ConversionReport, Outcome};

/// Re-encodes single files as UTF-8 with BOM.
///
/// In-place conversions move the source to its backup path before anything
/// is written, so the original bytes always live at one of the two paths.
pub struct Converter {
    resolver: Resolver,
    backups: BackupStore,
    writer: Box<dyn OutputWriter>,
}

impl Converter {
    pub fn new(resolver: Resolver, backups: BackupStore) -> Self {
        Self {
            resolver,
            backups,
            writer: Box::new(FileWriter),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Resolver::from_config(config),
            BackupStore::new(config.backup_suffix.clone()),
        )
    }

    /// Replaces where converted bytes are written.
    pub fn with_writer(mut self, writer: Box<dyn OutputWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// Converts `source`, overwriting it in place when `destination` is `None`.
    pub fn convert(
        &self,
        source: &Path,
        destination: Option<&Path>,
    ) -> Result<ConversionReport, ConvertError> {
        let mut ctx = ConversionContext::new(source, destination);
        let outcome = self.run(&mut ctx)?;
        Ok(ctx.into_report(outcome))
    }

    /// Like [`Converter::convert`] but folds errors into the report's outcome.
    pub fn convert_report(&self, source: &Path, destination: Option<&Path>) -> ConversionReport {
        let mut ctx = ConversionContext::new(source, destination);
        match self.run(&mut ctx) {
            Ok(outcome) => ctx.into_report(outcome),
            Err(e) => {
                warn!("{}", e);
                ctx.into_report(Outcome::failed(&e))
            }
        }
    }

    fn run(&self, ctx: &mut ConversionContext) -> Result<Outcome, ConvertError> {
        let filename = sanitize::redact_path(&ctx.source_path);
        let _convert_span = info_span!("convert", filename = %filename).entered();

        // Step 1: Read and resolve
        let resolution = {
            let _step = info_span!("resolve").entered();
            self.step_resolve(ctx)?
        };

        let (text, encoding) = match resolution {
            Resolution::AlreadyUnicode(label) => {
                info!("{} is already {}, no conversion needed", filename, label);
                return Ok(Outcome::AlreadyUnicode);
            }
            Resolution::Decoded { text, encoding } => (text, encoding),
        };

        let job = ConversionJob::new(
            ctx.source_path.clone(),
            ctx.requested_destination.clone(),
            encoding,
            text,
        );

        // Step 2: Backup (in-place only)
        {
            let _step = info_span!("backup").entered();
            self.step_backup(&job, ctx)?;
        }

        // Step 3: Write
        {
            let _step = info_span!("write").entered();
            self.step_write(&job, ctx)?;
        }

        info!("Converted {} to UTF-8 with BOM", filename);
        Ok(Outcome::Converted)
    }

    fn step_resolve(&self, ctx: &mut ConversionContext) -> Result<Resolution, ConvertError> {
        let source = &ctx.source_path;

        let metadata = std::fs::metadata(source).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConvertError::PathNotFound(source.clone()),
            _ => ConvertError::ReadSource {
                path: source.clone(),
                source: e,
            },
        })?;
        if !metadata.is_file() {
            return Err(ConvertError::NotAFile(source.clone()));
        }

        let bytes = std::fs::read(source).map_err(|e| ConvertError::ReadSource {
            path: source.clone(),
            source: e,
        })?;
        debug!("Read {} bytes", bytes.len());

        match self.resolver.resolve(&bytes) {
            Ok(resolution) => {
                ctx.detected_encoding = Some(resolution.encoding().clone());
                Ok(resolution)
            }
            Err(ResolveError::DecodeExhausted {
                detected,
                attempted,
            }) => {
                ctx.detected_encoding = detected.map(Into::into);
                Err(ConvertError::DecodeExhausted {
                    path: source.clone(),
                    attempted,
                })
            }
        }
    }

    fn step_backup(
        &self,
        job: &ConversionJob,
        ctx: &mut ConversionContext,
    ) -> Result<(), ConvertError> {
        if !job.is_in_place() {
            debug!("Writing to a separate destination, no backup needed");
            return Ok(());
        }

        let backup_path =
            self.backups
                .backup(&job.source_path)
                .map_err(|e| ConvertError::BackupFailure {
                    path: job.source_path.clone(),
                    source: e,
                })?;

        info!("Backup created: {}", backup_path.display());
        ctx.backup_path = Some(backup_path);
        Ok(())
    }

    fn step_write(
        &self,
        job: &ConversionJob,
        ctx: &mut ConversionContext,
    ) -> Result<(), ConvertError> {
        let target = job.target_path().to_path_buf();
        let output = job.encoded_output();

        let result = if job.is_in_place() {
            // The source was just renamed away; anything at the path now is not ours
            self.writer.write_new(&target, &output)
        } else {
            self.writer.write_replace(&target, &output)
        };

        result.map_err(|e| ConvertError::WriteFailure {
            path: target.clone(),
            backup: ctx.backup_path.clone(),
            source: e,
        })?;

        debug!("Wrote {} bytes as {}", output.len(), job.target_encoding());
        ctx.destination_path = Some(target);
        Ok(())
    }
}
