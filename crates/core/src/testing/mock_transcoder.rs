//! Mock transcoder for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{ConversionTarget, ConverterError, OutputFormat, Transcoder};
use crate::tags::{write_id3_tags, TagSet};

/// Which transcoder operation a call was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeStep {
    Decode,
    Encode,
    WriteTags,
}

impl TranscodeStep {
    fn tool(&self) -> &'static str {
        match self {
            Self::Decode => "flac",
            Self::Encode => "encoder",
            Self::WriteTags => "tagger",
        }
    }
}

/// A recorded transcoder call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Decode {
        source: PathBuf,
        output: PathBuf,
    },
    Encode {
        input: PathBuf,
        output: PathBuf,
        target: ConversionTarget,
    },
    WriteTags {
        output: PathBuf,
        tags: TagSet,
        format: OutputFormat,
    },
}

impl RecordedCall {
    /// The step this call belongs to.
    pub fn step(&self) -> TranscodeStep {
        match self {
            Self::Decode { .. } => TranscodeStep::Decode,
            Self::Encode { .. } => TranscodeStep::Encode,
            Self::WriteTags { .. } => TranscodeStep::WriteTags,
        }
    }
}

#[derive(Debug, Clone)]
struct Failure {
    step: TranscodeStep,
    file_name: Option<String>,
}

impl Failure {
    fn matches(&self, step: TranscodeStep, path: &Path) -> bool {
        self.step == step
            && match &self.file_name {
                Some(name) => path.file_name().is_some_and(|f| f == name.as_str()),
                None => true,
            }
    }
}

/// Mock implementation of the Transcoder trait.
///
/// Provides controllable behavior for testing:
/// - Records every call in order
/// - Writes placeholder bytes for decode and encode outputs
/// - Writes real ID3 tags for MP3 outputs so they can be read back
/// - Fails a chosen step, optionally only for one file name
///
/// # Example
///
/// ```rust,ignore
/// use flactrac_core::testing::{MockTranscoder, TranscodeStep};
///
/// let transcoder = MockTranscoder::new().fail_on(TranscodeStep::Encode, "02 Let Down.wav");
///
/// // Run a pipeline with it...
///
/// let calls = transcoder.recorded_calls().await;
/// assert_eq!(calls.last().unwrap().step(), TranscodeStep::Encode);
/// ```
#[derive(Debug, Default)]
pub struct MockTranscoder {
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// Configured failures.
    failures: Vec<Failure>,
    /// Tool reported missing by `validate`.
    missing_tool: Option<String>,
}

impl MockTranscoder {
    /// Create a new mock transcoder that succeeds at everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `step` whenever its input file is named `file_name`.
    ///
    /// The input is the source for decode, the WAV for encode and the
    /// output for tag writing.
    pub fn fail_on(mut self, step: TranscodeStep, file_name: impl Into<String>) -> Self {
        self.failures.push(Failure {
            step,
            file_name: Some(file_name.into()),
        });
        self
    }

    /// Fail every call of `step`.
    pub fn fail_all(mut self, step: TranscodeStep) -> Self {
        self.failures.push(Failure {
            step,
            file_name: None,
        });
        self
    }

    /// Make `validate` report `tool` as missing.
    pub fn with_missing_tool(mut self, tool: impl Into<String>) -> Self {
        self.missing_tool = Some(tool.into());
        self
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }

    fn check(&self, step: TranscodeStep, path: &Path) -> Result<(), ConverterError> {
        if self.failures.iter().any(|f| f.matches(step, path)) {
            return Err(ConverterError::tool_failed(
                step.tool(),
                format!("{} {}", step.tool(), path.display()),
                Some(1),
                Some("mock failure".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn decode(&self, source: &Path, output: &Path) -> Result<(), ConverterError> {
        self.record(RecordedCall::Decode {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
        })
        .await;
        self.check(TranscodeStep::Decode, source)?;
        tokio::fs::write(output, b"RIFF").await?;
        Ok(())
    }

    async fn encode(
        &self,
        input: &Path,
        output: &Path,
        target: &ConversionTarget,
    ) -> Result<(), ConverterError> {
        self.record(RecordedCall::Encode {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            target: *target,
        })
        .await;
        self.check(TranscodeStep::Encode, input)?;
        tokio::fs::write(output, [0u8; 128]).await?;
        Ok(())
    }

    async fn write_tags(
        &self,
        output: &Path,
        tags: &TagSet,
        format: OutputFormat,
    ) -> Result<(), ConverterError> {
        self.record(RecordedCall::WriteTags {
            output: output.to_path_buf(),
            tags: tags.clone(),
            format,
        })
        .await;
        self.check(TranscodeStep::WriteTags, output)?;

        if format == OutputFormat::Mp3 && !tags.is_empty() {
            write_id3_tags(output, tags)?;
        }
        Ok(())
    }

    async fn validate(&self, _target: &ConversionTarget) -> Result<(), ConverterError> {
        match &self.missing_tool {
            Some(tool) => Err(ConverterError::ToolNotFound {
                tool: tool.clone(),
                path: PathBuf::from(tool),
            }),
            None => Ok(()),
        }
    }
}
