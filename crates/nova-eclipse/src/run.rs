use std::path::Path;

use nova_config::EclipseConfig;
use serde::Serialize;

use crate::descriptor::{
    render_classpath_descriptor, render_project_descriptor, ClasspathOptions,
    CLASSPATH_FILE_NAME, PROJECT_FILE_NAME,
};
use crate::write::{write_descriptor, WriteOutcome};
use crate::{read_project_config, EclipseError, ProjectSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum RunReport {
    Skipped,
    Generated {
        project: WriteOutcome,
        classpath: WriteOutcome,
    },
}

/// One generation run over a host project, driven by an [`EclipseConfig`].
#[derive(Debug, Clone, Default)]
pub struct EclipseGenerator {
    config: EclipseConfig,
}

impl EclipseGenerator {
    pub fn new(config: EclipseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EclipseConfig {
        &self.config
    }

    /// Load the Maven project at `basedir` and generate its descriptors.
    ///
    /// When the run is skipped the `pom.xml` is not read.
    pub fn run_maven_project(&self, basedir: impl AsRef<Path>) -> Result<RunReport, EclipseError> {
        if self.config.skip {
            tracing::info!(target: "nova.eclipse", "Skipping eclipse");
            return Ok(RunReport::Skipped);
        }

        let snapshot = ProjectSnapshot::load(basedir)?;
        self.run(&snapshot)
    }

    /// Generate `.project` and `.classpath` in the snapshot's base directory.
    ///
    /// A skipped run does not look at the snapshot at all. The first write failure
    /// aborts the run.
    pub fn run(&self, snapshot: &ProjectSnapshot) -> Result<RunReport, EclipseError> {
        if self.config.skip {
            tracing::info!(target: "nova.eclipse", "Skipping eclipse");
            return Ok(RunReport::Skipped);
        }

        let project_config = read_project_config(snapshot, &self.config);
        tracing::debug!(target: "nova.eclipse", config = ?project_config, "project config");

        let basedir = &snapshot.basedir;

        let project = write_descriptor(
            &basedir.join(PROJECT_FILE_NAME),
            &render_project_descriptor(&project_config),
            self.config.dry_run,
        )?;

        let options = ClasspathOptions::from_config(snapshot, &self.config);
        let classpath = write_descriptor(
            &basedir.join(CLASSPATH_FILE_NAME),
            &render_classpath_descriptor(&project_config, &options),
            self.config.dry_run,
        )?;

        Ok(RunReport::Generated { project, classpath })
    }
}
