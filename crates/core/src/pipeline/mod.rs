//! Pipeline module for converting whole album directories.
//!
//! For each input directory the pipeline:
//!
//! 1. Resolves and creates the output directory
//! 2. Discovers FLAC sources (falling back to WAV)
//! 3. Decodes each FLAC track into a scratch directory, encodes it, and
//!    copies its tags across
//! 4. Removes the scratch directory, whether or not the run succeeded
//!
//! Tracks are processed one at a time in file name order, and the first
//! failure aborts the directory.

mod config;
mod discovery;
mod error;
mod runner;
mod types;

pub use config::PipelineConfig;
pub use discovery::{discover_tracks, has_extension, list_tracks};
pub use error::ConversionError;
pub use runner::ConversionPipeline;
pub use types::{DirectoryJob, DirectoryReport, SourceTracks, TrackJob};
