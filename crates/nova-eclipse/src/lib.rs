//! Eclipse project metadata for Maven projects.
//!
//! This crate turns a host project snapshot into the two descriptors Eclipse reads
//! from a project root:
//! - `.project`: name, comment, builders and natures
//! - `.classpath`: source/resource roots, the JRE container and the build output
//!
//! The flow is [`ProjectSnapshot`] → [`ProjectConfig`] (snapshot, then user
//! extensions) → rendered text → [`write_descriptor`].

mod descriptor;
mod error;
mod maven;
mod model;
mod paths;
mod run;
mod snapshot;
mod write;

pub use descriptor::{
    classpath_entries, render_classpath_descriptor, render_project_descriptor, ClasspathEntry,
    ClasspathOptions, RootEntry, RootKind, RootScope, CLASSPATH_FILE_NAME, JRE_CONTAINER,
    PROJECT_FILE_NAME,
};
pub use error::EclipseError;
pub use model::{
    read_project_config, resolve_comment, resolve_name, DefaultParticipants, ProjectConfig,
    ProjectExtensions, DEFAULT_BUILDERS, DEFAULT_NATURES, UNDEFINED_NAME,
};
pub use paths::descriptor_path;
pub use run::{EclipseGenerator, RunReport};
pub use snapshot::{ProjectSnapshot, Resource};
pub use write::{write_descriptor, WriteOutcome};
