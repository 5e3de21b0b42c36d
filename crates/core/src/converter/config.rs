//! Configuration for the external tools used by the converter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths of the external decode/encode/tag binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// FLAC decoder.
    #[serde(default = "default_flac_path")]
    pub flac: PathBuf,

    /// MP3 encoder.
    #[serde(default = "default_lame_path")]
    pub lame: PathBuf,

    /// AAC encoder.
    #[serde(default = "default_aac_encoder_path")]
    pub aac_encoder: PathBuf,

    /// AAC tagger.
    #[serde(default = "default_aac_tagger_path")]
    pub aac_tagger: PathBuf,
}

fn default_flac_path() -> PathBuf {
    PathBuf::from("flac")
}

fn default_lame_path() -> PathBuf {
    PathBuf::from("lame")
}

fn default_aac_encoder_path() -> PathBuf {
    PathBuf::from("neroAacEnc")
}

fn default_aac_tagger_path() -> PathBuf {
    PathBuf::from("neroAacTag")
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            flac: default_flac_path(),
            lame: default_lame_path(),
            aac_encoder: default_aac_encoder_path(),
            aac_tagger: default_aac_tagger_path(),
        }
    }
}

impl ToolsConfig {
    /// Sets the FLAC decoder path.
    pub fn with_flac(mut self, path: impl Into<PathBuf>) -> Self {
        self.flac = path.into();
        self
    }

    /// Sets the MP3 encoder path.
    pub fn with_lame(mut self, path: impl Into<PathBuf>) -> Self {
        self.lame = path.into();
        self
    }

    /// Sets the AAC encoder and tagger paths.
    pub fn with_nero(mut self, encoder: impl Into<PathBuf>, tagger: impl Into<PathBuf>) -> Self {
        self.aac_encoder = encoder.into();
        self.aac_tagger = tagger.into();
        self
    }
}
