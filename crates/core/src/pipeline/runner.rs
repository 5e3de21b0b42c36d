//! Directory conversion driver.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;

use super::config::PipelineConfig;
use super::discovery::discover_tracks;
use super::error::ConversionError;
use super::types::{DirectoryJob, DirectoryReport, TrackJob};
use crate::converter::{ConverterError, SourceKind, Transcoder};
use crate::planner::{resolve_output_dir, resolve_output_file};
use crate::tags::{map_tags, TagReader};

/// Converts whole input directories, one track at a time.
pub struct ConversionPipeline<T, R> {
    config: PipelineConfig,
    transcoder: T,
    reader: R,
}

impl<T: Transcoder, R: TagReader> ConversionPipeline<T, R> {
    /// Creates a pipeline from a config, a transcoder and a tag reader.
    pub fn new(config: PipelineConfig, transcoder: T, reader: R) -> Self {
        Self {
            config,
            transcoder,
            reader,
        }
    }

    /// Returns the transcoder.
    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    /// Checks that the transcoder can produce the configured target.
    pub async fn validate(&self) -> Result<(), ConverterError> {
        self.transcoder.validate(&self.config.target).await
    }

    /// Converts every source track directly inside `input_dir`.
    ///
    /// FLAC sources are preferred; WAV sources are only used when the
    /// directory holds no FLAC files. A directory with neither yields an
    /// empty report. The first failing track aborts the directory, leaving
    /// already written outputs in place.
    pub async fn convert_directory(
        &self,
        input_dir: &Path,
    ) -> Result<DirectoryReport, ConversionError> {
        let started = Instant::now();

        let output_dir =
            resolve_output_dir(input_dir, &self.config.export_root, self.config.layout).await?;

        let discovered = discover_tracks(input_dir)
            .await
            .map_err(|e| ConversionError::Discovery {
                path: input_dir.to_path_buf(),
                source: e,
            })?;

        let Some(sources) = discovered else {
            tracing::warn!("No FLAC or WAV files found in {}", input_dir.display());
            return Ok(DirectoryReport {
                input_dir: input_dir.to_path_buf(),
                output_dir,
                source_kind: None,
                converted: Vec::new(),
                duration_ms: started.elapsed().as_millis() as u64,
            });
        };

        let extension = self.config.target.extension();
        let tracks = sources
            .paths
            .into_iter()
            .map(|source| {
                let output = resolve_output_file(&source, &output_dir, extension)?;
                Ok(TrackJob::new(source, output))
            })
            .collect::<Result<Vec<_>, ConversionError>>()?;

        let mut job = DirectoryJob {
            input_dir: input_dir.to_path_buf(),
            output_dir,
            source_kind: sources.kind,
            tracks,
        };

        let converted = match job.source_kind {
            SourceKind::Flac => {
                tracing::info!("Converting FLAC files in {}", input_dir.display());
                self.convert_flac_tracks(&mut job).await?
            }
            SourceKind::Wav => {
                tracing::info!("Converting WAV files in {}", input_dir.display());
                self.convert_wav_tracks(&job).await?
            }
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            tracks = converted.len(),
            target = %self.config.target,
            duration_ms,
            "Finished {}",
            input_dir.display()
        );

        Ok(DirectoryReport {
            input_dir: job.input_dir,
            output_dir: job.output_dir,
            source_kind: Some(job.source_kind),
            converted,
            duration_ms,
        })
    }

    async fn convert_flac_tracks(
        &self,
        job: &mut DirectoryJob,
    ) -> Result<Vec<PathBuf>, ConversionError> {
        let scratch = self.create_scratch_dir().await?;
        tracing::debug!("Scratch directory is {:?}", scratch.path());

        let mut converted = Vec::with_capacity(job.tracks.len());
        let mut result = Ok(());
        for track in &mut job.tracks {
            match self.convert_flac_track(track, scratch.path()).await {
                Ok(()) => converted.push(track.output.clone()),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        let scratch_path = scratch.path().to_path_buf();
        let cleanup = scratch.close();

        match (result, cleanup) {
            (Ok(()), Ok(())) => Ok(converted),
            (Ok(()), Err(e)) => Err(ConversionError::ScratchCleanup {
                path: scratch_path,
                source: e,
            }),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                tracing::error!(
                    "Failed to remove scratch directory {:?}: {}",
                    scratch_path,
                    cleanup_err
                );
                Err(e)
            }
        }
    }

    async fn convert_flac_track(
        &self,
        track: &mut TrackJob,
        scratch: &Path,
    ) -> Result<(), ConversionError> {
        let target = &self.config.target;
        let wav = resolve_output_file(&track.source, scratch, SourceKind::Wav.extension())?;

        tracing::debug!("Decoding {:?}", track.source);
        self.transcoder.decode(&track.source, &wav).await?;

        tracing::debug!("Encoding {:?} as {}", wav, target);
        self.transcoder.encode(&wav, &track.output, target).await?;

        track.tags = self.reader.read_tags(&track.source)?;
        let mapped = map_tags(&track.tags, target.format());
        self.transcoder
            .write_tags(&track.output, &mapped, target.format())
            .await?;

        tracing::info!("Converted {}", track.output.display());
        Ok(())
    }

    async fn convert_wav_tracks(
        &self,
        job: &DirectoryJob,
    ) -> Result<Vec<PathBuf>, ConversionError> {
        let mut converted = Vec::with_capacity(job.tracks.len());
        for track in &job.tracks {
            tracing::debug!("Encoding {:?} as {}", track.source, self.config.target);
            self.transcoder
                .encode(&track.source, &track.output, &self.config.target)
                .await?;
            tracing::info!("Converted {}", track.output.display());
            converted.push(track.output.clone());
        }
        Ok(converted)
    }

    async fn create_scratch_dir(&self) -> Result<TempDir, ConversionError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("flactrac-");

        match &self.config.scratch_root {
            Some(root) => {
                tokio::fs::create_dir_all(root).await.map_err(|e| {
                    ConversionError::ScratchCreation {
                        path: root.clone(),
                        source: e,
                    }
                })?;
                builder
                    .tempdir_in(root)
                    .map_err(|e| ConversionError::ScratchCreation {
                        path: root.clone(),
                        source: e,
                    })
            }
            None => builder
                .tempdir()
                .map_err(|e| ConversionError::ScratchCreation {
                    path: std::env::temp_dir(),
                    source: e,
                }),
        }
    }
}
