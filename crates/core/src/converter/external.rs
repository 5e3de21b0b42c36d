//! Transcoder backed by the flac, lame and Nero AAC command-line tools.

use async_trait::async_trait;
use std::path::Path;

use super::config::ToolsConfig;
use super::error::ConverterError;
use super::tools::{aac_tag_args, decode_args, encode_args, probe_tool, run_tool};
use super::traits::Transcoder;
use super::types::{ConversionTarget, OutputFormat};
use crate::tags::{write_id3_tags, TagSet};

/// Transcoder that shells out to external tools.
///
/// MP3 tags are written in-process with the `id3` crate; AAC tags go through
/// `neroAacTag`.
pub struct ExternalTranscoder {
    config: ToolsConfig,
}

impl ExternalTranscoder {
    /// Creates a new transcoder with the given tool paths.
    pub fn new(config: ToolsConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder that looks the tools up on `PATH`.
    pub fn with_defaults() -> Self {
        Self::new(ToolsConfig::default())
    }

    fn encoder_for(&self, target: &ConversionTarget) -> (&'static str, &Path) {
        match target {
            ConversionTarget::Mp3 { .. } => ("lame", self.config.lame.as_path()),
            ConversionTarget::Aac { .. } => ("neroAacEnc", self.config.aac_encoder.as_path()),
        }
    }
}

#[async_trait]
impl Transcoder for ExternalTranscoder {
    fn name(&self) -> &str {
        "external"
    }

    async fn decode(&self, source: &Path, output: &Path) -> Result<(), ConverterError> {
        run_tool("flac", &self.config.flac, &decode_args(source, output)).await
    }

    async fn encode(
        &self,
        input: &Path,
        output: &Path,
        target: &ConversionTarget,
    ) -> Result<(), ConverterError> {
        let (tool, program) = self.encoder_for(target);
        run_tool(tool, program, &encode_args(target, input, output)).await
    }

    async fn write_tags(
        &self,
        output: &Path,
        tags: &TagSet,
        format: OutputFormat,
    ) -> Result<(), ConverterError> {
        if tags.is_empty() {
            tracing::debug!("No tags to write for {:?}", output);
            return Ok(());
        }

        match format {
            OutputFormat::Mp3 => {
                let path = output.to_path_buf();
                let tags = tags.clone();
                tokio::task::spawn_blocking(move || write_id3_tags(&path, &tags))
                    .await
                    .map_err(|e| ConverterError::Io(std::io::Error::other(e)))??;
                Ok(())
            }
            OutputFormat::Aac => {
                run_tool(
                    "neroAacTag",
                    &self.config.aac_tagger,
                    &aac_tag_args(output, tags),
                )
                .await
            }
        }
    }

    async fn validate(&self, target: &ConversionTarget) -> Result<(), ConverterError> {
        probe_tool("flac", &self.config.flac).await?;

        let (tool, program) = self.encoder_for(target);
        probe_tool(tool, program).await?;

        if target.format() == OutputFormat::Aac {
            probe_tool("neroAacTag", &self.config.aac_tagger).await?;
        }

        Ok(())
    }
}
