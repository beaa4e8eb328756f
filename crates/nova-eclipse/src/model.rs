use std::path::PathBuf;

use nova_config::EclipseConfig;

use crate::ProjectSnapshot;

/// Builders contributed when default builders are enabled: the JDT compiler and the
/// m2e dependency manager.
pub const DEFAULT_BUILDERS: [&str; 2] = [
    "org.eclipse.jdt.core.javabuilder",
    "org.eclipse.m2e.core.maven2Builder",
];

/// Natures paired with [`DEFAULT_BUILDERS`].
pub const DEFAULT_NATURES: [&str; 2] = [
    "org.eclipse.jdt.core.javanature",
    "org.eclipse.m2e.core.maven2Nature",
];

/// Display name used when the host project declares neither a name nor an artifact id.
pub const UNDEFINED_NAME: &str = "undefined";

/// IDE-relevant layout of one project.
///
/// Lists keep insertion order and are never deduplicated: the generated descriptors
/// must be reproducible from the order in which roots were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    name: String,
    comment: String,
    sources: Vec<PathBuf>,
    test_sources: Vec<PathBuf>,
    resources: Vec<PathBuf>,
    test_resources: Vec<PathBuf>,
    builders: Vec<String>,
    natures: Vec<String>,
}

/// Which default participant pairs the initial snapshot contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultParticipants {
    pub builders: bool,
    pub natures: bool,
}

impl Default for DefaultParticipants {
    fn default() -> Self {
        Self {
            builders: true,
            natures: true,
        }
    }
}

/// User-declared additions appended after the host-derived lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectExtensions {
    pub sources: Vec<PathBuf>,
    pub resources: Vec<PathBuf>,
    pub test_sources: Vec<PathBuf>,
    pub test_resources: Vec<PathBuf>,
    pub builders: Vec<String>,
    pub natures: Vec<String>,
}

impl ProjectExtensions {
    pub fn from_config(config: &EclipseConfig) -> Self {
        Self {
            sources: config.extra_sources.clone(),
            resources: config.extra_resources.clone(),
            test_sources: config.extra_test_sources.clone(),
            test_resources: config.extra_test_resources.clone(),
            builders: config.extra_builders.clone(),
            natures: config.extra_natures.clone(),
        }
    }
}

impl ProjectConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn test_sources(&self) -> &[PathBuf] {
        &self.test_sources
    }

    pub fn resources(&self) -> &[PathBuf] {
        &self.resources
    }

    pub fn test_resources(&self) -> &[PathBuf] {
        &self.test_resources
    }

    pub fn builders(&self) -> &[String] {
        &self.builders
    }

    pub fn natures(&self) -> &[String] {
        &self.natures
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_comment(self, comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            ..self
        }
    }

    pub fn with_sources(self, sources: Vec<PathBuf>) -> Self {
        Self { sources, ..self }
    }

    pub fn with_test_sources(self, test_sources: Vec<PathBuf>) -> Self {
        Self {
            test_sources,
            ..self
        }
    }

    pub fn with_resources(self, resources: Vec<PathBuf>) -> Self {
        Self { resources, ..self }
    }

    pub fn with_test_resources(self, test_resources: Vec<PathBuf>) -> Self {
        Self {
            test_resources,
            ..self
        }
    }

    pub fn with_builders(self, builders: Vec<String>) -> Self {
        Self { builders, ..self }
    }

    pub fn with_natures(self, natures: Vec<String>) -> Self {
        Self { natures, ..self }
    }

    /// Initial configuration derived from the host project alone.
    ///
    /// Resource descriptors are reduced to their directories; filtering and
    /// include/exclude patterns are not carried over.
    pub fn from_snapshot(snapshot: &ProjectSnapshot, defaults: DefaultParticipants) -> Self {
        let builders = if defaults.builders {
            DEFAULT_BUILDERS.iter().map(|b| b.to_string()).collect()
        } else {
            Vec::new()
        };
        let natures = if defaults.natures {
            DEFAULT_NATURES.iter().map(|n| n.to_string()).collect()
        } else {
            Vec::new()
        };

        ProjectConfig::default()
            .with_name(resolve_name(
                snapshot.name.as_deref(),
                snapshot.artifact_id.as_deref(),
            ))
            .with_comment(resolve_comment(snapshot.description.as_deref()))
            .with_sources(snapshot.compile_source_roots.clone())
            .with_test_sources(snapshot.test_compile_source_roots.clone())
            .with_resources(
                snapshot
                    .resources
                    .iter()
                    .map(|r| r.directory.clone())
                    .collect(),
            )
            .with_test_resources(
                snapshot
                    .test_resources
                    .iter()
                    .map(|r| r.directory.clone())
                    .collect(),
            )
            .with_builders(builders)
            .with_natures(natures)
    }

    /// Append user-declared additions to every list, base elements first.
    pub fn extend(self, extra: &ProjectExtensions) -> Self {
        let sources = concat(&self.sources, &extra.sources);
        let resources = concat(&self.resources, &extra.resources);
        let test_sources = concat(&self.test_sources, &extra.test_sources);
        let test_resources = concat(&self.test_resources, &extra.test_resources);
        let builders = concat(&self.builders, &extra.builders);
        let natures = concat(&self.natures, &extra.natures);

        self.with_sources(sources)
            .with_resources(resources)
            .with_test_sources(test_sources)
            .with_test_resources(test_resources)
            .with_builders(builders)
            .with_natures(natures)
    }
}

/// Build the final configuration for a run: host snapshot first, then the
/// configured extensions.
pub fn read_project_config(snapshot: &ProjectSnapshot, config: &EclipseConfig) -> ProjectConfig {
    let defaults = DefaultParticipants {
        builders: config.default_builders,
        natures: config.default_natures,
    };
    ProjectConfig::from_snapshot(snapshot, defaults).extend(&ProjectExtensions::from_config(config))
}

/// Project name, then artifact id, then [`UNDEFINED_NAME`]. Blank values are skipped.
pub fn resolve_name(name: Option<&str>, artifact_id: Option<&str>) -> String {
    non_blank(name)
        .or_else(|| non_blank(artifact_id))
        .unwrap_or(UNDEFINED_NAME)
        .to_string()
}

pub fn resolve_comment(description: Option<&str>) -> String {
    description.unwrap_or_default().to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn concat<T: Clone>(base: &[T], extra: &[T]) -> Vec<T> {
    base.iter().chain(extra).cloned().collect()
}
