//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ConverterError;
use super::types::{ConversionTarget, OutputFormat};
use crate::tags::TagSet;

/// Runs the decode, encode and tag-write steps for single tracks.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Decodes a FLAC file to an uncompressed WAV file at `output`.
    async fn decode(&self, source: &Path, output: &Path) -> Result<(), ConverterError>;

    /// Encodes a WAV file to `output` according to `target`.
    async fn encode(
        &self,
        input: &Path,
        output: &Path,
        target: &ConversionTarget,
    ) -> Result<(), ConverterError>;

    /// Writes already-mapped tags onto an encoded file.
    async fn write_tags(
        &self,
        output: &Path,
        tags: &TagSet,
        format: OutputFormat,
    ) -> Result<(), ConverterError>;

    /// Validates that everything needed for `target` is available.
    async fn validate(&self, target: &ConversionTarget) -> Result<(), ConverterError>;
}
