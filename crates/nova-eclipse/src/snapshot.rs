use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::EclipseError;

/// Read-only view of the host build project.
///
/// This is everything the generator needs from the build tool; it can be filled in
/// by hand or loaded from a `pom.xml` with [`ProjectSnapshot::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub basedir: PathBuf,
    pub name: Option<String>,
    pub artifact_id: Option<String>,
    pub description: Option<String>,
    pub compile_source_roots: Vec<PathBuf>,
    pub test_compile_source_roots: Vec<PathBuf>,
    pub resources: Vec<Resource>,
    pub test_resources: Vec<Resource>,
    /// `project.build.outputDirectory`
    pub output_directory: PathBuf,
    /// `project.build.testOutputDirectory`
    pub test_output_directory: PathBuf,
}

/// A resource declaration as the host build sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub directory: PathBuf,
    pub target_path: Option<String>,
    pub filtering: bool,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl Resource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            target_path: None,
            filtering: false,
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }
}

impl ProjectSnapshot {
    /// Load the snapshot for the Maven project rooted at `basedir`.
    pub fn load(basedir: impl AsRef<Path>) -> Result<Self, EclipseError> {
        let basedir = basedir.as_ref();
        let basedir = std::fs::canonicalize(basedir).map_err(|source| EclipseError::Io {
            path: basedir.to_path_buf(),
            source,
        })?;
        crate::maven::load_maven_snapshot(&basedir)
    }
}
