pub mod config;
pub mod converter;
pub mod pipeline;
pub mod planner;
pub mod tags;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, EncodingConfig,
    OutputConfig,
};
pub use converter::{
    Bitrate, ConversionTarget, ConverterError, ExternalTranscoder, Mp3Mode, OutputFormat,
    SourceKind, ToolsConfig, Transcoder, VbrThresholds,
};
pub use pipeline::{ConversionError, ConversionPipeline, DirectoryReport, PipelineConfig};
pub use planner::{expand_home, LayoutPolicy, PlannerError};
pub use tags::{map_tags, FlacTagReader, TagError, TagReader, TagSet};
