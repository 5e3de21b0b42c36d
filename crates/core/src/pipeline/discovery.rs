//! Finding source tracks inside an input directory.

use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::SourceTracks;
use crate::converter::SourceKind;

/// Whether `path` has extension `ext`, ignoring ASCII case.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Lists regular files directly inside `dir` whose extension is `ext`,
/// sorted by name. Subdirectories are not descended into.
pub async fn list_tracks(dir: &Path, ext: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut tracks = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !has_extension(&path, ext) {
            continue;
        }
        // Follows symlinks, like a plain is-file check would.
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => tracks.push(path),
            Ok(_) => {}
            Err(e) => tracing::debug!("Skipping unreadable entry {:?}: {}", path, e),
        }
    }

    tracks.sort();
    Ok(tracks)
}

/// Picks the sources to convert: FLAC files if any exist, otherwise WAV
/// files, otherwise nothing.
pub async fn discover_tracks(dir: &Path) -> std::io::Result<Option<SourceTracks>> {
    for kind in [SourceKind::Flac, SourceKind::Wav] {
        let paths = list_tracks(dir, kind.extension()).await?;
        if !paths.is_empty() {
            return Ok(Some(SourceTracks { kind, paths }));
        }
    }
    Ok(None)
}
