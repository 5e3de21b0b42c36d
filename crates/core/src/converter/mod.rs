//! Converter module for turning lossless tracks into MP3 or AAC.
//!
//! This module provides the `Transcoder` trait and an implementation that
//! drives the external `flac`, `lame`, `neroAacEnc` and `neroAacTag` tools.
//!
//! # Features
//!
//! - FLAC → WAV decoding
//! - MP3 encoding at a fixed bitrate or a VBR quality level
//! - AAC encoding at a given bitrate
//! - Destination tag writing (ID3v2 in-process, Nero metadata via subprocess)
//!
//! # Example
//!
//! ```ignore
//! use flactrac_core::converter::{ConversionTarget, ExternalTranscoder, Mp3Mode, Transcoder};
//!
//! let transcoder = ExternalTranscoder::with_defaults();
//! let target = ConversionTarget::Mp3 { mode: Mp3Mode::Fixed { kbps: 320 } };
//!
//! transcoder.validate(&target).await?;
//! transcoder.decode(Path::new("01 Airbag.flac"), Path::new("/tmp/x/01 Airbag.wav")).await?;
//! transcoder.encode(Path::new("/tmp/x/01 Airbag.wav"), Path::new("01 Airbag.mp3"), &target).await?;
//! ```

mod config;
mod error;
mod external;
mod quality;
mod tools;
mod traits;
mod types;

pub use config::ToolsConfig;
pub use error::ConverterError;
pub use external::ExternalTranscoder;
pub use quality::{mp3_vbr_quality, mp3_vbr_quality_str, VbrThresholds};
pub use tools::{aac_tag_args, decode_args, encode_args, render_command, run_tool};
pub use traits::Transcoder;
pub use types::{Bitrate, ConversionTarget, Mp3Mode, OutputFormat, SourceKind};
