//! Command lines for the external tools and a helper to run them.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::error::ConverterError;
use super::types::{ConversionTarget, Mp3Mode};
use crate::tags::TagSet;

/// Lines of stderr kept on a tool failure.
const STDERR_TAIL_LINES: usize = 20;

/// Arguments for `flac` to decode `source` into the WAV file `output`.
pub fn decode_args(source: &Path, output: &Path) -> Vec<String> {
    vec![
        "-d".to_string(),
        source.to_string_lossy().to_string(),
        "-o".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Arguments for the encoder selected by `target`.
///
/// lame takes the bitrate in kbps (or a `-V` quality); neroAacEnc takes
/// bits per second.
pub fn encode_args(target: &ConversionTarget, input: &Path, output: &Path) -> Vec<String> {
    let input = input.to_string_lossy().to_string();
    let output = output.to_string_lossy().to_string();

    match target {
        ConversionTarget::Mp3 { mode } => {
            let mut args = vec!["--add-id3v2".to_string()];
            match mode {
                Mp3Mode::Fixed { kbps } => args.extend(["-b".to_string(), kbps.to_string()]),
                Mp3Mode::Variable { quality } => {
                    args.extend(["-V".to_string(), quality.to_string()])
                }
            }
            args.extend([input, output]);
            args
        }
        ConversionTarget::Aac { kbps } => vec![
            "-br".to_string(),
            (u64::from(*kbps) * 1000).to_string(),
            "-if".to_string(),
            input,
            "-of".to_string(),
            output,
        ],
    }
}

/// Arguments for `neroAacTag`: the file, then one `-meta:key=value` per tag.
pub fn aac_tag_args(path: &Path, tags: &TagSet) -> Vec<String> {
    std::iter::once(path.to_string_lossy().to_string())
        .chain(
            tags.iter()
                .map(|(key, value)| format!("-meta:{}={}", key, value)),
        )
        .collect()
}

/// Renders a command line for logs and error messages.
pub fn render_command(program: &Path, args: &[String]) -> String {
    std::iter::once(program.to_string_lossy().to_string())
        .chain(args.iter().map(|arg| {
            if arg.contains(char::is_whitespace) {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        }))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs `program` with `args` to completion.
///
/// A non-zero exit status becomes [`ConverterError::ToolFailed`] carrying the
/// command line and the tail of stderr.
pub async fn run_tool(tool: &str, program: &Path, args: &[String]) -> Result<(), ConverterError> {
    let command = render_command(program, args);
    tracing::debug!("Running {}", command);

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConverterError::ToolNotFound {
                    tool: tool.to_string(),
                    path: program.to_path_buf(),
                }
            } else {
                ConverterError::Io(e)
            }
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");

    Err(ConverterError::tool_failed(
        tool,
        command,
        output.status.code(),
        if tail.trim().is_empty() {
            None
        } else {
            Some(tail)
        },
    ))
}

/// Checks that `program` can be spawned at all.
pub async fn probe_tool(tool: &str, program: &Path) -> Result<(), ConverterError> {
    match Command::new(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
    {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConverterError::ToolNotFound {
            tool: tool.to_string(),
            path: program.to_path_buf(),
        }),
        Err(e) => Err(ConverterError::Io(e)),
    }
}
