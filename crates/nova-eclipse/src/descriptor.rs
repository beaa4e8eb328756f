//! Rendering of the two Eclipse descriptors, `.project` and `.classpath`.
//!
//! Both renderers are pure: they never touch the file system and always produce a
//! complete document.

use std::io;
use std::path::{Path, PathBuf};

use nova_config::EclipseConfig;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::paths::descriptor_path;
use crate::{ProjectConfig, ProjectSnapshot};

pub const PROJECT_FILE_NAME: &str = ".project";
pub const CLASSPATH_FILE_NAME: &str = ".classpath";

/// Container id of the default JRE.
pub const JRE_CONTAINER: &str = "org.eclipse.jdt.launching.JRE_CONTAINER";

/// Path-resolution inputs for `.classpath` that are not part of [`ProjectConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathOptions {
    /// Project base directory; absolute roots are rendered relative to it.
    pub basedir: PathBuf,
    /// Overrides both main and test output when present.
    pub alternative_output: Option<PathBuf>,
    pub output_directory: PathBuf,
    pub test_output_directory: PathBuf,
    pub sources_optional: bool,
}

impl ClasspathOptions {
    /// Resolve options for a run. Unset output directories fall back to the host
    /// project's main build output (for tests too).
    pub fn from_config(snapshot: &ProjectSnapshot, config: &EclipseConfig) -> Self {
        Self {
            basedir: snapshot.basedir.clone(),
            alternative_output: config.alternative_output.clone(),
            output_directory: config
                .output_directory
                .clone()
                .unwrap_or_else(|| snapshot.output_directory.clone()),
            test_output_directory: config
                .test_output_directory
                .clone()
                .unwrap_or_else(|| snapshot.output_directory.clone()),
            sources_optional: config.sources_optional,
        }
    }

    /// Main and test output, after applying the alternative-output override.
    pub fn effective_outputs(&self) -> (&Path, &Path) {
        match &self.alternative_output {
            Some(alt) => (alt.as_path(), alt.as_path()),
            None => (
                self.output_directory.as_path(),
                self.test_output_directory.as_path(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RootKind {
    Source,
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RootScope {
    Main,
    Test,
}

/// A source or resource root in `.classpath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntry {
    pub kind: RootKind,
    pub scope: RootScope,
    pub path: String,
    pub optional: bool,
    /// Per-root output; only set on test roots when test output differs from main.
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathEntry {
    Root(RootEntry),
    Container { path: String },
    Output { path: String },
}

/// Compute the `.classpath` entries in document order: sources, test sources,
/// resources, test resources, the JRE container, then the output.
pub fn classpath_entries(config: &ProjectConfig, options: &ClasspathOptions) -> Vec<ClasspathEntry> {
    let basedir = options.basedir.as_path();
    let (main_output, test_output) = options.effective_outputs();
    let main_output = descriptor_path(basedir, main_output);
    let test_output = descriptor_path(basedir, test_output);
    let test_root_output = (test_output != main_output).then_some(test_output);

    let groups = [
        (RootKind::Source, RootScope::Main, config.sources()),
        (RootKind::Source, RootScope::Test, config.test_sources()),
        (RootKind::Resource, RootScope::Main, config.resources()),
        (RootKind::Resource, RootScope::Test, config.test_resources()),
    ];

    let mut entries = Vec::new();
    for (kind, scope, paths) in groups {
        for path in paths {
            entries.push(ClasspathEntry::Root(RootEntry {
                kind,
                scope,
                path: descriptor_path(basedir, path),
                optional: options.sources_optional,
                output: match scope {
                    RootScope::Main => None,
                    RootScope::Test => test_root_output.clone(),
                },
            }));
        }
    }

    entries.push(ClasspathEntry::Container {
        path: JRE_CONTAINER.to_string(),
    });
    entries.push(ClasspathEntry::Output { path: main_output });
    entries
}

/// Render `.project`.
pub fn render_project_descriptor(config: &ProjectConfig) -> String {
    render(|writer| write_project(writer, config))
}

/// Render `.classpath`.
pub fn render_classpath_descriptor(config: &ProjectConfig, options: &ClasspathOptions) -> String {
    render(|writer| write_classpath(writer, &classpath_entries(config, options)))
}

type XmlWriter = Writer<Vec<u8>>;

fn render(body: impl FnOnce(&mut XmlWriter) -> io::Result<()>) -> String {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .and_then(|()| body(&mut writer))
        .expect("writing XML into an in-memory buffer cannot fail");

    let mut out = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    out.push('\n');
    out
}

fn write_project(writer: &mut XmlWriter, config: &ProjectConfig) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("projectDescription")))?;
    text_element(writer, "name", config.name())?;
    text_element(writer, "comment", config.comment())?;
    writer.write_event(Event::Start(BytesStart::new("projects")))?;
    writer.write_event(Event::End(BytesEnd::new("projects")))?;

    writer.write_event(Event::Start(BytesStart::new("buildSpec")))?;
    for builder in config.builders() {
        writer.write_event(Event::Start(BytesStart::new("buildCommand")))?;
        text_element(writer, "name", builder)?;
        writer.write_event(Event::Start(BytesStart::new("arguments")))?;
        writer.write_event(Event::End(BytesEnd::new("arguments")))?;
        writer.write_event(Event::End(BytesEnd::new("buildCommand")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("buildSpec")))?;

    writer.write_event(Event::Start(BytesStart::new("natures")))?;
    for nature in config.natures() {
        text_element(writer, "nature", nature)?;
    }
    writer.write_event(Event::End(BytesEnd::new("natures")))?;

    writer.write_event(Event::End(BytesEnd::new("projectDescription")))
}

fn write_classpath(writer: &mut XmlWriter, entries: &[ClasspathEntry]) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("classpath")))?;
    for entry in entries {
        match entry {
            ClasspathEntry::Root(root) => write_root_entry(writer, root)?,
            ClasspathEntry::Container { path } => {
                writer.write_event(Event::Empty(entry_start("con", path)))?
            }
            ClasspathEntry::Output { path } => {
                writer.write_event(Event::Empty(entry_start("output", path)))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new("classpath")))
}

fn write_root_entry(writer: &mut XmlWriter, root: &RootEntry) -> io::Result<()> {
    let mut start = entry_start("src", &root.path);
    if let Some(output) = &root.output {
        start.push_attribute(("output", output.as_str()));
    }

    let mut attributes = Vec::new();
    if root.optional {
        attributes.push(("optional", "true"));
    }
    if root.scope == RootScope::Test {
        attributes.push(("test", "true"));
    }

    if attributes.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Start(BytesStart::new("attributes")))?;
    for (name, value) in attributes {
        writer.write_event(Event::Empty(
            BytesStart::new("attribute").with_attributes([("name", name), ("value", value)]),
        ))?;
    }
    writer.write_event(Event::End(BytesEnd::new("attributes")))?;
    writer.write_event(Event::End(BytesEnd::new("classpathentry")))
}

fn entry_start<'a>(kind: &'a str, path: &'a str) -> BytesStart<'a> {
    BytesStart::new("classpathentry").with_attributes([("kind", kind), ("path", path)])
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}
