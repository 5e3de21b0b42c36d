//! Configuration for the conversion pipeline.

use std::path::PathBuf;

use crate::converter::ConversionTarget;
use crate::planner::LayoutPolicy;

/// Everything a pipeline needs to convert one directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Output encoding.
    pub target: ConversionTarget,

    /// Root under which output directories are created.
    pub export_root: PathBuf,

    /// How input directories map to output directories.
    pub layout: LayoutPolicy,

    /// Parent for per-directory scratch directories (system temp dir if unset).
    pub scratch_root: Option<PathBuf>,
}

impl PipelineConfig {
    /// Creates a config with the mirror layout and the system temp dir.
    pub fn new(target: ConversionTarget, export_root: impl Into<PathBuf>) -> Self {
        Self {
            target,
            export_root: export_root.into(),
            layout: LayoutPolicy::default(),
            scratch_root: None,
        }
    }

    /// Sets the layout policy.
    pub fn with_layout(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the scratch root.
    pub fn with_scratch_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(path.into());
        self
    }
}
