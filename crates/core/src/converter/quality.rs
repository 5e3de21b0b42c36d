//! Mapping from a nominal bitrate to a lame VBR quality level.

use serde::{Deserialize, Serialize};

/// Ascending kbps thresholds for the bitrate → `-V` quality step function.
///
/// A bitrate below `thresholds[0]` maps to quality 5, below `thresholds[1]`
/// to 4, and so on; anything at or above `thresholds[4]` maps to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VbrThresholds(pub [f64; 5]);

impl Default for VbrThresholds {
    /// Midpoints between the bitrate ranges of adjacent lame presets
    /// (hydrogenaudio LAME table): max of the lower setting vs min of the
    /// higher one.
    fn default() -> Self {
        Self([145.0, 167.5, 182.5, 200.0, 235.0])
    }
}

impl VbrThresholds {
    /// Whether the thresholds are strictly ascending.
    pub fn is_ascending(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// Returns the lame `-V` quality level (0 best, 5 worst) for `kbps`.
pub fn mp3_vbr_quality(kbps: f64, thresholds: &VbrThresholds) -> u8 {
    thresholds
        .0
        .iter()
        .position(|&limit| kbps < limit)
        .map(|idx| 5 - idx as u8)
        .unwrap_or(0)
}

/// Same as [`mp3_vbr_quality`], as the string passed to lame.
pub fn mp3_vbr_quality_str(kbps: f64, thresholds: &VbrThresholds) -> &'static str {
    const LEVELS: [&str; 6] = ["0", "1", "2", "3", "4", "5"];
    LEVELS[mp3_vbr_quality(kbps, thresholds) as usize]
}
