//! Pipeline lifecycle integration tests.
//!
//! These tests run whole directories through the conversion pipeline:
//! - Output layout under the export root
//! - Tag transfer into the written MP3 files
//! - WAV fallback and directories without sources
//! - External tool failures and scratch directory cleanup

use std::path::{Path, PathBuf};

use id3::TagLike;
use tempfile::TempDir;

use flactrac_core::{
    converter::{ConversionTarget, ConverterError, ExternalTranscoder, Mp3Mode, ToolsConfig},
    pipeline::{ConversionError, ConversionPipeline, PipelineConfig},
    planner::LayoutPolicy,
    tags::{FlacTagReader, TagReader},
    testing::{fixtures, MockTagReader, MockTranscoder, RecordedCall, TranscodeStep},
    SourceKind,
};

/// Test helper holding a music root, an export root and a scratch root.
struct TestHarness {
    root: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn music(&self) -> PathBuf {
        self.root.path().join("music")
    }

    fn export(&self) -> PathBuf {
        self.root.path().join("export")
    }

    fn scratch(&self) -> PathBuf {
        self.root.path().join("scratch")
    }

    fn album(&self, artist: &str, album: &str, tracks: &[&str]) -> PathBuf {
        fixtures::album_dir(&self.music(), artist, album, tracks)
            .expect("Failed to create album dir")
    }

    fn config(&self, target: ConversionTarget) -> PipelineConfig {
        PipelineConfig::new(target, self.export()).with_scratch_root(self.scratch())
    }

    fn scratch_is_empty(&self) -> bool {
        match std::fs::read_dir(self.scratch()) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => true,
        }
    }
}

fn vbr_v0() -> ConversionTarget {
    ConversionTarget::Mp3 {
        mode: Mp3Mode::Variable { quality: 0 },
    }
}

#[tokio::test]
async fn test_flac_album_to_mp3_with_tags() {
    let harness = TestHarness::new();
    let album = harness.album("Radiohead", "OK Computer", &["01 Airbag.flac"]);

    let reader = MockTagReader::new().with_tags(
        album.join("01 Airbag.flac"),
        fixtures::track_tags("Radiohead", "OK Computer", "Airbag", 1, 12),
    );
    let target = ConversionTarget::Mp3 {
        mode: Mp3Mode::Fixed { kbps: 320 },
    };
    let pipeline = ConversionPipeline::new(harness.config(target), MockTranscoder::new(), reader);

    let report = pipeline.convert_directory(&album).await.unwrap();

    let expected = harness
        .export()
        .join("Radiohead")
        .join("OK Computer")
        .join("01 Airbag.mp3");
    assert_eq!(report.source_kind, Some(SourceKind::Flac));
    assert_eq!(report.converted, vec![expected.clone()]);

    let tag = id3::Tag::read_from_path(&expected).unwrap();
    assert_eq!(tag.album(), Some("OK Computer"));
    assert_eq!(tag.artist(), Some("Radiohead"));
    assert_eq!(tag.title(), Some("Airbag"));
    assert_eq!(tag.get("TRCK").and_then(|f| f.content().text()), Some("1/12"));

    assert!(harness.scratch_is_empty());
}

#[tokio::test]
async fn test_encoder_receives_resolved_target() {
    let harness = TestHarness::new();
    let album = harness.album("Portishead", "Dummy", &["01 Mysterons.flac"]);
    let target = ConversionTarget::Mp3 {
        mode: Mp3Mode::Fixed { kbps: 192 },
    };
    let pipeline = ConversionPipeline::new(
        harness.config(target),
        MockTranscoder::new(),
        MockTagReader::new(),
    );

    pipeline.convert_directory(&album).await.unwrap();

    let calls = pipeline.transcoder().recorded_calls().await;
    let encoded_with = calls.iter().find_map(|call| match call {
        RecordedCall::Encode { target, .. } => Some(*target),
        _ => None,
    });
    assert_eq!(encoded_with, Some(target));
}

#[tokio::test]
async fn test_aac_tags_are_renamed() {
    let harness = TestHarness::new();
    let album = harness.album("Björk", "Homogenic", &["01 Hunter.flac"]);

    let reader = MockTagReader::new().with_tags(
        album.join("01 Hunter.flac"),
        [
            ("ARTIST", "Björk"),
            ("DATE", "1997"),
            ("TRACKNUMBER", "1"),
            ("TRACKTOTAL", "10"),
            ("REPLAYGAIN_TRACK_GAIN", "-7.5 dB"),
        ],
    );
    let pipeline = ConversionPipeline::new(
        harness.config(ConversionTarget::Aac { kbps: 256 }),
        MockTranscoder::new(),
        reader,
    );

    let report = pipeline.convert_directory(&album).await.unwrap();
    assert_eq!(report.converted[0].file_name().unwrap(), "01 Hunter.m4a");

    let written = pipeline
        .transcoder()
        .recorded_calls()
        .await
        .into_iter()
        .find_map(|call| match call {
            RecordedCall::WriteTags { tags, .. } => Some(tags),
            _ => None,
        })
        .unwrap();
    assert_eq!(written.get("year"), Some("1997"));
    assert_eq!(written.get("track"), Some("1"));
    assert_eq!(written.get("totaltracks"), Some("10"));
    assert_eq!(written.get("artist"), Some("Björk"));
    assert!(!written.contains_key("replaygain_track_gain"));
}

#[tokio::test]
async fn test_wav_album_is_encoded_directly() {
    let harness = TestHarness::new();
    let album = harness.album(
        "Boards of Canada",
        "Geogaddi",
        &["02 Music Is Math.wav", "01 Ready Lets Go.wav"],
    );

    let pipeline = ConversionPipeline::new(
        harness.config(vbr_v0()),
        MockTranscoder::new(),
        MockTagReader::new(),
    );
    let report = pipeline.convert_directory(&album).await.unwrap();

    assert_eq!(report.source_kind, Some(SourceKind::Wav));
    let names: Vec<_> = report
        .converted
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["01 Ready Lets Go.mp3", "02 Music Is Math.mp3"]);

    let calls = pipeline.transcoder().recorded_calls().await;
    assert!(calls.iter().all(|c| c.step() == TranscodeStep::Encode));
}

#[tokio::test]
async fn test_flatten_layout() {
    let harness = TestHarness::new();
    let album = harness.album(
        "Radiohead",
        "Kid A",
        &["01 Everything In Its Right Place.flac"],
    );

    let config = harness.config(vbr_v0()).with_layout(LayoutPolicy::Flatten);
    let pipeline = ConversionPipeline::new(config, MockTranscoder::new(), MockTagReader::new());

    let report = pipeline.convert_directory(&album).await.unwrap();
    assert_eq!(report.output_dir, harness.export().join("Kid A"));
    assert!(report
        .output_dir
        .join("01 Everything In Its Right Place.mp3")
        .exists());
}

#[tokio::test]
async fn test_directory_without_sources() {
    let harness = TestHarness::new();
    let album = harness.album("Various", "Scans", &["cover.jpg", "notes.txt"]);

    let pipeline = ConversionPipeline::new(
        harness.config(vbr_v0()),
        MockTranscoder::new(),
        MockTagReader::new(),
    );
    let report = pipeline.convert_directory(&album).await.unwrap();

    assert!(report.is_empty());
    assert!(report.converted.is_empty());
    assert!(pipeline.transcoder().recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_tag_read_failure_aborts_directory() {
    let harness = TestHarness::new();
    let album = harness.album("Radiohead", "OK Computer", &["01 Airbag.flac"]);

    let reader = MockTagReader::new().with_unreadable(album.join("01 Airbag.flac"));
    let pipeline =
        ConversionPipeline::new(harness.config(vbr_v0()), MockTranscoder::new(), reader);

    let err = pipeline.convert_directory(&album).await.unwrap_err();
    assert!(matches!(err, ConversionError::Tag(_)));
    assert!(harness.scratch_is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_failing_decoder_aborts_and_cleans_up() {
    let harness = TestHarness::new();
    let album = harness.album("Radiohead", "OK Computer", &["01 Airbag.flac"]);

    // `false` exits with status 1 whatever it is given.
    let transcoder = ExternalTranscoder::new(ToolsConfig::default().with_flac("false"));
    let pipeline =
        ConversionPipeline::new(harness.config(vbr_v0()), transcoder, FlacTagReader::new());

    let err = pipeline.convert_directory(&album).await.unwrap_err();

    assert!(err.is_external_tool_error());
    match err {
        ConversionError::Converter(ConverterError::ToolFailed { tool, code, .. }) => {
            assert_eq!(tool, "flac");
            assert_eq!(code, Some(1));
        }
        other => panic!("expected a tool failure, got {:?}", other),
    }

    let output = harness
        .export()
        .join("Radiohead")
        .join("OK Computer")
        .join("01 Airbag.mp3");
    assert!(!output.exists());
    assert!(harness.scratch_is_empty());
}

#[tokio::test]
async fn test_missing_decoder_is_reported() {
    let harness = TestHarness::new();
    let album = harness.album("Radiohead", "OK Computer", &["01 Airbag.flac"]);

    let transcoder =
        ExternalTranscoder::new(ToolsConfig::default().with_flac("/nonexistent/bin/flac"));
    let pipeline =
        ConversionPipeline::new(harness.config(vbr_v0()), transcoder, FlacTagReader::new());

    let err = pipeline.convert_directory(&album).await.unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Converter(ConverterError::ToolNotFound { .. })
    ));
    assert!(harness.scratch_is_empty());
}

#[tokio::test]
async fn test_reruns_overwrite_outputs() {
    let harness = TestHarness::new();
    let album = harness.album("Radiohead", "OK Computer", &["01 Airbag.flac"]);
    let pipeline = ConversionPipeline::new(
        harness.config(vbr_v0()),
        MockTranscoder::new(),
        MockTagReader::new(),
    );

    let first = pipeline.convert_directory(&album).await.unwrap();
    let second = pipeline.convert_directory(&album).await.unwrap();

    assert_eq!(first.output_dir, second.output_dir);
    assert_eq!(first.converted, second.converted);
}

/// Builds a minimal FLAC stream: marker, STREAMINFO, then a Vorbis comment
/// block holding `comments` when there is one.
fn minimal_flac(comments: Option<&[&str]>) -> Vec<u8> {
    let mut bytes = b"fLaC".to_vec();

    // STREAMINFO, 34 bytes. Last block unless comments follow.
    let info_header = if comments.is_some() { 0x00 } else { 0x80 };
    bytes.extend_from_slice(&[info_header, 0x00, 0x00, 34]);
    let mut info = [0u8; 34];
    info[0..2].copy_from_slice(&4096u16.to_be_bytes());
    info[2..4].copy_from_slice(&4096u16.to_be_bytes());
    // 44100 Hz, 2 channels, 16 bits per sample.
    info[10..14].copy_from_slice(&[0x0A, 0xC4, 0x42, 0xF0]);
    bytes.extend_from_slice(&info);

    let Some(comments) = comments else {
        return bytes;
    };

    let mut block = Vec::new();
    let vendor = b"flactrac";
    block.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    block.extend_from_slice(vendor);
    block.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for comment in comments {
        block.extend_from_slice(&(comment.len() as u32).to_le_bytes());
        block.extend_from_slice(comment.as_bytes());
    }

    // VORBIS_COMMENT, last block.
    let len = block.len() as u32;
    bytes.push(0x80 | 0x04);
    bytes.extend_from_slice(&len.to_be_bytes()[1..]);
    bytes.extend_from_slice(&block);
    bytes
}

#[test]
fn test_flac_reader_reads_vorbis_comments() {
    let dir = TempDir::new().unwrap();
    let path: &Path = &dir.path().join("01 Airbag.flac");
    std::fs::write(
        path,
        minimal_flac(Some(&[
            "TITLE=Airbag",
            "TRACKNUMBER=1",
            "TRACKTOTAL=12",
            "ALBUM=OK Computer",
        ])),
    )
    .unwrap();

    let tags = FlacTagReader::new().read_tags(path).unwrap();

    assert_eq!(tags.get("title"), Some("Airbag"));
    assert_eq!(tags.get("tracknumber"), Some("1"));
    assert_eq!(tags.get("tracktotal"), Some("12"));
    assert_eq!(tags.get("album"), Some("OK Computer"));
}

#[test]
fn test_flac_reader_without_vorbis_comments_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("01 Untitled.flac");
    std::fs::write(&path, minimal_flac(None)).unwrap();

    let tags = FlacTagReader::new().read_tags(&path).unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_untagged_flac_still_converts() {
    let harness = TestHarness::new();
    let album = harness.album("Unknown Artist", "Demos", &["01 Untitled.flac"]);
    std::fs::write(album.join("01 Untitled.flac"), minimal_flac(None)).unwrap();

    let pipeline = ConversionPipeline::new(
        harness.config(vbr_v0()),
        MockTranscoder::new(),
        FlacTagReader::new(),
    );
    let report = pipeline.convert_directory(&album).await.unwrap();

    let expected = harness
        .export()
        .join("Unknown Artist")
        .join("Demos")
        .join("01 Untitled.mp3");
    assert_eq!(report.converted, vec![expected.clone()]);

    let written = pipeline
        .transcoder()
        .recorded_calls()
        .await
        .into_iter()
        .find_map(|call| match call {
            RecordedCall::WriteTags { tags, .. } => Some(tags),
            _ => None,
        })
        .unwrap();
    assert!(written.is_empty());

    // Nothing was written into the encoded file.
    assert_eq!(std::fs::read(&expected).unwrap(), vec![0u8; 128]);
    assert!(id3::Tag::read_from_path(&expected).is_err());
    assert!(harness.scratch_is_empty());
}
