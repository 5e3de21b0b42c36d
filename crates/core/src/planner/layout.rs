//! Output directory and file resolution.

use directories::BaseDirs;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use super::error::PlannerError;
use super::types::LayoutPolicy;

/// Resolves (and creates) the output directory for `input_dir`.
///
/// The input is canonicalized first, so symlinks and relative paths resolve
/// to their real `Artist/Album` names. Creating an existing directory is not
/// an error.
pub async fn resolve_output_dir(
    input_dir: &Path,
    export_root: &Path,
    policy: LayoutPolicy,
) -> Result<PathBuf, PlannerError> {
    let real_input = fs::canonicalize(input_dir)
        .await
        .map_err(|e| PlannerError::InputNotFound {
            path: input_dir.to_path_buf(),
            source: e,
        })?;

    let output_dir = plan_output_dir(&real_input, export_root, policy)?;

    fs::create_dir_all(&output_dir)
        .await
        .map_err(|e| PlannerError::DirectoryCreationFailed {
            path: output_dir.clone(),
            source: e,
        })?;

    tracing::debug!("Output directory for {:?} is {:?}", input_dir, output_dir);
    Ok(output_dir)
}

/// Computes the output directory for an already canonical `input_dir`
/// without touching the filesystem.
pub fn plan_output_dir(
    input_dir: &Path,
    export_root: &Path,
    policy: LayoutPolicy,
) -> Result<PathBuf, PlannerError> {
    let album = input_dir
        .file_name()
        .ok_or_else(|| PlannerError::invalid_input_dir(input_dir, "no directory name"))?;

    match policy {
        LayoutPolicy::Flatten => Ok(export_root.join(album)),
        LayoutPolicy::Mirror => {
            let artist = input_dir
                .parent()
                .and_then(Path::file_name)
                .ok_or_else(|| {
                    PlannerError::invalid_input_dir(input_dir, "expected an Artist/Album path")
                })?;
            Ok(export_root.join(artist).join(album))
        }
    }
}

/// Output path for `input_file`: same stem, `extension`, inside `output_dir`.
pub fn resolve_output_file(
    input_file: &Path,
    output_dir: &Path,
    extension: &str,
) -> Result<PathBuf, PlannerError> {
    let file_name = input_file
        .file_name()
        .ok_or_else(|| PlannerError::InvalidInputFile {
            path: input_file.to_path_buf(),
        })?;

    Ok(output_dir.join(file_name).with_extension(extension))
}

/// Expands a leading `~` to the current user's home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf, PlannerError> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let base = BaseDirs::new().ok_or_else(|| PlannerError::NoHomeDirectory {
                path: path.to_path_buf(),
            })?;
            Ok(base.home_dir().join(components.as_path()))
        }
        _ => Ok(path.to_path_buf()),
    }
}
