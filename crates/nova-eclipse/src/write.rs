use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::EclipseError;

/// What happened to one descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WriteOutcome {
    Created { path: PathBuf },
    /// The previous file was replaced in full.
    Overwritten { path: PathBuf },
    /// Nothing was written; `contents` is what would have been.
    DryRun { path: PathBuf, contents: String },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Created { path }
            | WriteOutcome::Overwritten { path }
            | WriteOutcome::DryRun { path, .. } => path,
        }
    }
}

/// Persist a rendered descriptor, or only report it when `dry_run` is set.
///
/// Existing files are always replaced completely; there is no merging with what is
/// already on disk.
pub fn write_descriptor(
    path: &Path,
    contents: &str,
    dry_run: bool,
) -> Result<WriteOutcome, EclipseError> {
    if dry_run {
        tracing::info!(
            target: "nova.eclipse",
            path = %path.display(),
            "(dryrun) I would generate: {} with content:\n{contents}",
            path.display()
        );
        return Ok(WriteOutcome::DryRun {
            path: path.to_path_buf(),
            contents: contents.to_string(),
        });
    }

    let existed = path.exists();
    if existed {
        tracing::info!(target: "nova.eclipse", path = %path.display(), "overwriting existing file");
    }

    std::fs::write(path, contents.as_bytes()).map_err(|source| EclipseError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let path = path.to_path_buf();
    Ok(if existed {
        WriteOutcome::Overwritten { path }
    } else {
        WriteOutcome::Created { path }
    })
}
