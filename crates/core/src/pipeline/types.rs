//! Types for the pipeline module.

use std::path::PathBuf;

use crate::converter::SourceKind;
use crate::tags::TagSet;

/// One source track and where its conversion goes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackJob {
    /// Source FLAC or WAV file.
    pub source: PathBuf,
    /// Destination file.
    pub output: PathBuf,
    /// Source tags; filled once extracted (always empty for WAV sources).
    pub tags: TagSet,
}

impl TrackJob {
    /// Creates a job with no tags extracted yet.
    pub fn new(source: PathBuf, output: PathBuf) -> Self {
        Self {
            source,
            output,
            tags: TagSet::new(),
        }
    }
}

/// All the work for one input directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryJob {
    /// Input directory as given.
    pub input_dir: PathBuf,
    /// Resolved output directory.
    pub output_dir: PathBuf,
    /// Kind of the discovered sources.
    pub source_kind: SourceKind,
    /// Tracks in ascending file name order.
    pub tracks: Vec<TrackJob>,
}

/// Sources found directly inside an input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTracks {
    /// Which format was selected.
    pub kind: SourceKind,
    /// Files in ascending name order.
    pub paths: Vec<PathBuf>,
}

/// Outcome of converting one input directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryReport {
    /// Input directory as given.
    pub input_dir: PathBuf,
    /// Resolved output directory.
    pub output_dir: PathBuf,
    /// Kind of the converted sources; `None` when nothing was found.
    pub source_kind: Option<SourceKind>,
    /// Files written, in processing order.
    pub converted: Vec<PathBuf>,
    /// Wall time spent on the directory.
    pub duration_ms: u64,
}

impl DirectoryReport {
    /// Whether the directory held no convertible sources.
    pub fn is_empty(&self) -> bool {
        self.source_kind.is_none()
    }
}
