//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the [`Transcoder`] and
//! [`TagReader`] traits, so the conversion pipeline can be exercised end to
//! end without the external encoder tools installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use flactrac_core::testing::{MockTagReader, MockTranscoder};
//!
//! let reader = MockTagReader::new()
//!     .with_tags("/music/Radiohead/OK Computer/01 Airbag.flac", [("title", "Airbag")]);
//! let pipeline = ConversionPipeline::new(config, MockTranscoder::new(), reader);
//! ```
//!
//! [`Transcoder`]: crate::converter::Transcoder
//! [`TagReader`]: crate::tags::TagReader

mod mock_tag_reader;
mod mock_transcoder;

pub use mock_tag_reader::MockTagReader;
pub use mock_transcoder::{MockTranscoder, RecordedCall, TranscodeStep};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    /// Create `<root>/<artist>/<album>` holding empty files named `tracks`.
    pub fn album_dir(
        root: &Path,
        artist: &str,
        album: &str,
        tracks: &[&str],
    ) -> std::io::Result<PathBuf> {
        let dir = root.join(artist).join(album);
        std::fs::create_dir_all(&dir)?;
        for name in tracks {
            std::fs::write(dir.join(name), b"")?;
        }
        Ok(dir)
    }

    /// Vorbis comments for one track of a numbered album.
    pub fn track_tags(
        artist: &str,
        album: &str,
        title: &str,
        number: u32,
        total: u32,
    ) -> Vec<(String, String)> {
        vec![
            ("ARTIST".to_string(), artist.to_string()),
            ("ALBUM".to_string(), album.to_string()),
            ("TITLE".to_string(), title.to_string()),
            ("TRACKNUMBER".to_string(), number.to_string()),
            ("TRACKTOTAL".to_string(), total.to_string()),
        ]
    }
}
