//! Types for the planner module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an input directory is laid out under the export root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// `.../Artist/Album` becomes `export/Artist/Album`.
    #[default]
    #[serde(alias = "mirror_artist_album")]
    Mirror,
    /// `.../Album` becomes `export/Album`.
    Flatten,
}

impl fmt::Display for LayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mirror => f.write_str("mirror"),
            Self::Flatten => f.write_str("flatten"),
        }
    }
}

impl FromStr for LayoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mirror" | "mirror_artist_album" => Ok(Self::Mirror),
            "flatten" => Ok(Self::Flatten),
            other => Err(format!("Unknown layout policy: {}", other)),
        }
    }
}
