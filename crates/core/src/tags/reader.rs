//! Reading Vorbis comments from FLAC sources.

use lofty::config::ParseOptions;
use lofty::file::AudioFile;
use lofty::flac::FlacFile;
use std::fs::File;
use std::path::Path;

use super::error::TagError;
use super::types::TagSet;

/// Something that can extract a [`TagSet`] from a source track.
pub trait TagReader: Send + Sync {
    /// Returns the name of this reader implementation.
    fn name(&self) -> &str;

    /// Reads all tags from `path`, with lowercase keys.
    fn read_tags(&self, path: &Path) -> Result<TagSet, TagError>;
}

/// Reads the Vorbis comment block of FLAC files using lofty.
#[derive(Debug, Clone, Default)]
pub struct FlacTagReader;

impl FlacTagReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl TagReader for FlacTagReader {
    fn name(&self) -> &str {
        "flac"
    }

    fn read_tags(&self, path: &Path) -> Result<TagSet, TagError> {
        let mut file = File::open(path)?;
        let flac = FlacFile::read_from(&mut file, ParseOptions::new().read_properties(false))
            .map_err(|e| TagError::read_failed(path, e))?;

        // Later duplicates of a key replace earlier ones.
        let tags = match flac.vorbis_comments() {
            Some(comments) => comments.items().collect(),
            None => TagSet::new(),
        };

        tracing::debug!("Read {} tags from {:?}", tags.len(), path);
        Ok(tags)
    }
}
