//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::quality::{mp3_vbr_quality, VbrThresholds};
use crate::tags::{TagRules, AAC_RULES, MP3_RULES};

/// Destination audio format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// MPEG Audio Layer III, encoded with lame and tagged with ID3v2.
    Mp3,
    /// Advanced Audio Coding, encoded and tagged with the Nero tools.
    Aac,
}

impl OutputFormat {
    /// Returns the file extension for this format (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Aac => "m4a",
        }
    }

    /// Returns the tag translation table for this format.
    pub fn tag_rules(&self) -> &'static TagRules {
        match self {
            Self::Mp3 => &MP3_RULES,
            Self::Aac => &AAC_RULES,
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Aac => "aac",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "aac" => Ok(Self::Aac),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Kind of lossless source found in an input directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// FLAC files, decoded to WAV before encoding.
    Flac,
    /// WAV files, encoded directly.
    Wav,
}

impl SourceKind {
    /// Lowercase extension (without the dot) used for discovery.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Flac => "flac",
            Self::Wav => "wav",
        }
    }
}

/// Requested bitrate: a kbps value or a lame VBR quality token (`V0`..`V9`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BitrateRepr", into = "String")]
pub enum Bitrate {
    /// Bitrate in kbps.
    Kbps(u32),
    /// Explicit lame `-V` quality level.
    VariableQuality(u8),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BitrateRepr {
    Number(u32),
    Text(String),
}

impl TryFrom<BitrateRepr> for Bitrate {
    type Error = String;

    fn try_from(repr: BitrateRepr) -> Result<Self, Self::Error> {
        match repr {
            BitrateRepr::Number(kbps) => Bitrate::Kbps(kbps).checked(),
            BitrateRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Bitrate> for String {
    fn from(bitrate: Bitrate) -> Self {
        bitrate.to_string()
    }
}

impl Bitrate {
    /// Highest lame VBR quality index.
    pub const MAX_VBR_QUALITY: u8 = 9;

    fn checked(self) -> Result<Self, String> {
        match self {
            Self::Kbps(0) => Err("Bitrate must be greater than 0".to_string()),
            Self::VariableQuality(q) if q > Self::MAX_VBR_QUALITY => Err(format!(
                "VBR quality must be between 0 and {}, got {}",
                Self::MAX_VBR_QUALITY,
                q
            )),
            other => Ok(other),
        }
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Self::Kbps(320)
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kbps(kbps) => write!(f, "{}", kbps),
            Self::VariableQuality(q) => write!(f, "V{}", q),
        }
    }
}

impl FromStr for Bitrate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bitrate = match s.strip_prefix(['v', 'V']) {
            Some(quality) => quality
                .parse::<u8>()
                .map(Self::VariableQuality)
                .map_err(|_| format!("Invalid VBR quality token: {}", s))?,
            None => s
                .parse::<u32>()
                .map(Self::Kbps)
                .map_err(|_| format!("Invalid bitrate: {}", s))?,
        };
        bitrate.checked()
    }
}

/// How lame should spend bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mp3Mode {
    /// Constant bitrate, `-b <kbps>`.
    Fixed { kbps: u32 },
    /// Variable bitrate, `-V <quality>`.
    Variable { quality: u8 },
}

/// Output encoding and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum ConversionTarget {
    /// MP3 via lame.
    Mp3 { mode: Mp3Mode },
    /// AAC via neroAacEnc.
    Aac { kbps: u32 },
}

impl ConversionTarget {
    /// Resolves a target from the user-facing encoding options.
    ///
    /// In MP3 variable mode a kbps value is turned into a quality level with
    /// `thresholds`; an explicit `V<n>` token is passed through. Fixed mode and
    /// AAC require a kbps value.
    pub fn resolve(
        format: OutputFormat,
        bitrate: Bitrate,
        use_fixed_bitrate: bool,
        thresholds: &VbrThresholds,
    ) -> Result<Self, String> {
        match (format, bitrate) {
            (OutputFormat::Mp3, Bitrate::Kbps(kbps)) if use_fixed_bitrate => Ok(Self::Mp3 {
                mode: Mp3Mode::Fixed { kbps },
            }),
            (OutputFormat::Mp3, Bitrate::Kbps(kbps)) => {
                let quality = mp3_vbr_quality(f64::from(kbps), thresholds);
                Ok(Self::Mp3 {
                    mode: Mp3Mode::Variable { quality },
                })
            }
            (OutputFormat::Mp3, Bitrate::VariableQuality(_)) if use_fixed_bitrate => Err(
                "A VBR quality token cannot be combined with fixed bitrate mode".to_string(),
            ),
            (OutputFormat::Mp3, Bitrate::VariableQuality(quality)) => Ok(Self::Mp3 {
                mode: Mp3Mode::Variable { quality },
            }),
            (OutputFormat::Aac, Bitrate::Kbps(kbps)) => Ok(Self::Aac { kbps }),
            (OutputFormat::Aac, Bitrate::VariableQuality(_)) => {
                Err("AAC output requires a numeric bitrate in kbps".to_string())
            }
        }
    }

    /// The destination format of this target.
    pub fn format(&self) -> OutputFormat {
        match self {
            Self::Mp3 { .. } => OutputFormat::Mp3,
            Self::Aac { .. } => OutputFormat::Aac,
        }
    }

    /// File extension of the produced files.
    pub fn extension(&self) -> &'static str {
        self.format().extension()
    }
}

impl fmt::Display for ConversionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mp3 {
                mode: Mp3Mode::Fixed { kbps },
            } => write!(f, "mp3 (CBR {} kbps)", kbps),
            Self::Mp3 {
                mode: Mp3Mode::Variable { quality },
            } => write!(f, "mp3 (VBR V{})", quality),
            Self::Aac { kbps } => write!(f, "aac ({} kbps)", kbps),
        }
    }
}
