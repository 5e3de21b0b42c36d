//! In-process ID3v2 tag writing for MP3 output.

use id3::{ErrorKind, Tag, TagLike, Version};
use std::path::Path;

use super::error::TagError;
use super::types::TagSet;

/// Easy-key → ID3v2 text frame.
const ID3_FRAMES: &[(&str, &str)] = &[
    ("album", "TALB"),
    ("compilation", "TCMP"),
    ("title", "TIT2"),
    ("artist", "TPE1"),
    ("date", "TDRC"),
    ("genre", "TCON"),
    ("tracknumber", "TRCK"),
    ("discnumber", "TPOS"),
];

/// Returns the ID3v2 frame id for a mapped MP3 tag key.
pub fn id3_frame_id(key: &str) -> Option<&'static str> {
    ID3_FRAMES
        .iter()
        .find(|(easy, _)| *easy == key)
        .map(|(_, frame)| *frame)
}

/// Writes mapped MP3 tags into the ID3v2 tag of `path`.
///
/// An existing tag (e.g. the one lame adds) is updated in place; a file
/// without a tag gets a fresh one.
pub fn write_id3_tags(path: &Path, tags: &TagSet) -> Result<(), TagError> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(TagError::write_failed(path, e)),
    };

    for (key, value) in tags.iter() {
        match id3_frame_id(key) {
            Some(frame) => tag.set_text(frame, value),
            None => tracing::debug!("No ID3 frame for tag {}, skipping", key),
        }
    }

    tag.write_to_path(path, Version::Id3v24)
        .map_err(|e| TagError::write_failed(path, e))
}
