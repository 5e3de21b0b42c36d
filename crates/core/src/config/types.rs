use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::converter::{Bitrate, ConversionTarget, OutputFormat, ToolsConfig, VbrThresholds};
use crate::planner::LayoutPolicy;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub encoding: EncodingConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Where converted files go
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Export root. A leading `~` is expanded by the caller.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// How input directories map to output directories.
    #[serde(default)]
    pub layout: LayoutPolicy,
    /// Parent for scratch directories (system temp dir if unset).
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            layout: LayoutPolicy::default(),
            scratch_dir: None,
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("~/Desktop/Export")
}

/// Encoder settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EncodingConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    /// Kbps value or a `V<n>` quality token.
    #[serde(default)]
    pub bitrate: Bitrate,
    /// Encode MP3 at a constant bitrate instead of mapping to a VBR level.
    #[serde(default)]
    pub use_fixed_bitrate: bool,
    /// Upper kbps bounds for lame quality levels V5..V1.
    #[serde(default)]
    pub vbr_thresholds: VbrThresholds,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            bitrate: Bitrate::default(),
            use_fixed_bitrate: false,
            vbr_thresholds: VbrThresholds::default(),
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::Mp3
}

impl EncodingConfig {
    /// Resolves these settings into a concrete encoder target.
    pub fn target(&self) -> Result<ConversionTarget, super::ConfigError> {
        ConversionTarget::resolve(
            self.format,
            self.bitrate,
            self.use_fixed_bitrate,
            &self.vbr_thresholds,
        )
        .map_err(super::ConfigError::ValidationError)
    }
}
