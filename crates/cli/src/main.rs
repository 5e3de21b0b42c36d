use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flactrac_core::{
    expand_home, load_config, validate_config, Bitrate, Config, ConversionError,
    ConversionPipeline, ConverterError, ExternalTranscoder, FlacTagReader, LayoutPolicy,
    OutputFormat, PipelineConfig,
};

/// Convert FLAC (or WAV) album directories to MP3 or AAC, keeping the tags.
#[derive(Debug, Parser)]
#[command(name = "flactrac", version, about)]
struct Cli {
    /// Album directories to convert.
    #[arg(required = true, value_name = "INPUT_DIR")]
    dirs: Vec<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long, value_enum)]
    format: Option<FormatArg>,

    /// Bitrate in kbps, or a lame quality token such as V2 [default: 320].
    #[arg(short = 'b', long, value_name = "KBPS|V<n>")]
    bitrate: Option<Bitrate>,

    /// Encode MP3 at a constant bitrate instead of the matching VBR level.
    #[arg(long, alias = "use_fixed_bitrate")]
    use_fixed_bitrate: bool,

    /// Export root [default: ~/Desktop/Export].
    #[arg(short = 'o', long, value_name = "DIR", aliases = ["export_dir", "output-dir", "output_dir"])]
    export_dir: Option<PathBuf>,

    /// How album directories are laid out under the export root.
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Mp3,
    Aac,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Mp3 => OutputFormat::Mp3,
            FormatArg::Aac => OutputFormat::Aac,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// <export>/<Artist>/<Album>
    Mirror,
    /// <export>/<Album>
    Flatten,
}

impl From<LayoutArg> for LayoutPolicy {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Mirror => LayoutPolicy::Mirror,
            LayoutArg::Flatten => LayoutPolicy::Flatten,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Command-line flags win over the config file and environment.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(format) = cli.format {
        config.encoding.format = format.into();
    }
    if let Some(bitrate) = cli.bitrate {
        config.encoding.bitrate = bitrate;
    }
    if cli.use_fixed_bitrate {
        config.encoding.use_fixed_bitrate = true;
    }
    if let Some(export_dir) = &cli.export_dir {
        config.output.export_dir = export_dir.clone();
    }
    if let Some(layout) = cli.layout {
        config.output.layout = layout.into();
    }
}

/// Converts every directory on the command line. Returns whether all of
/// them succeeded.
async fn run(cli: Cli) -> Result<bool> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    apply_overrides(&cli, &mut config);

    validate_config(&config).context("Configuration validation failed")?;
    let target = config.encoding.target()?;

    let export_root = expand_home(&config.output.export_dir)?;
    tokio::fs::create_dir_all(&export_root)
        .await
        .with_context(|| format!("Failed to create export directory {:?}", export_root))?;

    info!("Encoding to {}", target);
    info!("Export directory: {:?} ({} layout)", export_root, config.output.layout);

    let mut pipeline_config =
        PipelineConfig::new(target, export_root).with_layout(config.output.layout);
    if let Some(scratch) = &config.output.scratch_dir {
        pipeline_config = pipeline_config.with_scratch_root(expand_home(scratch)?);
    }

    let pipeline = ConversionPipeline::new(
        pipeline_config,
        ExternalTranscoder::new(config.tools.clone()),
        FlacTagReader::new(),
    );

    if let Err(e) = pipeline.validate().await {
        warn!("Tool check failed: {}", e);
    }

    let mut failed = 0usize;
    for dir in &cli.dirs {
        match pipeline.convert_directory(dir).await {
            Ok(report) if report.is_empty() => {}
            Ok(report) => info!(
                "Converted {} tracks from {} into {}",
                report.converted.len(),
                dir.display(),
                report.output_dir.display()
            ),
            Err(e) => {
                failed += 1;
                error!("Failed to convert {}: {}", dir.display(), e);
                if let ConversionError::Converter(ConverterError::ToolFailed {
                    stderr: Some(stderr),
                    ..
                }) = &e
                {
                    error!("{}", stderr);
                }
            }
        }
    }

    if failed > 0 {
        error!("{} of {} directories failed", failed, cli.dirs.len());
    }
    Ok(failed == 0)
}
