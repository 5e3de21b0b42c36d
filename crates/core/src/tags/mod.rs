//! Tag module for moving metadata from lossless sources to compressed outputs.
//!
//! Source tags are read from FLAC Vorbis comments into a [`TagSet`] with
//! lowercase keys, translated by per-format [`TagRules`] tables, and written
//! to the destination file.
//!
//! # Example
//!
//! ```ignore
//! use flactrac_core::tags::{map_tags, FlacTagReader, TagReader};
//! use flactrac_core::converter::OutputFormat;
//!
//! let source = FlacTagReader::new().read_tags(Path::new("01 Airbag.flac"))?;
//! let mapped = map_tags(&source, OutputFormat::Mp3);
//! assert_eq!(mapped.get("tracknumber"), Some("1/12"));
//! ```

mod error;
mod mapper;
mod reader;
mod types;
mod writer;

pub use error::TagError;
pub use mapper::{format_number_pair, map_tags, TagRules, AAC_RULES, MP3_RULES};
pub use reader::{FlacTagReader, TagReader};
pub use types::TagSet;
pub use writer::{id3_frame_id, write_id3_tags};
