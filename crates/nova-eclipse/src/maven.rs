use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::{EclipseError, ProjectSnapshot, Resource};

/// Build the host snapshot from `<basedir>/pom.xml`, applying Maven's default layout
/// for anything the POM leaves out.
pub(crate) fn load_maven_snapshot(basedir: &Path) -> Result<ProjectSnapshot, EclipseError> {
    let pom_path = basedir.join("pom.xml");
    let pom = parse_pom(&pom_path)?;

    let mut properties = pom.properties.clone();
    let basedir_text = basedir.to_string_lossy().to_string();
    properties.insert("basedir".to_string(), basedir_text.clone());
    properties.insert("project.basedir".to_string(), basedir_text);
    for (key, value) in [
        ("artifactId", &pom.artifact_id),
        ("groupId", &pom.group_id),
        ("version", &pom.version),
        ("name", &pom.name),
    ] {
        if let Some(value) = value {
            properties.insert(format!("project.{key}"), value.clone());
            properties.insert(format!("pom.{key}"), value.clone());
        }
    }

    let build_directory = resolve_path(
        basedir,
        pom.build.directory.as_deref().unwrap_or("target"),
        &properties,
    );
    properties.insert(
        "project.build.directory".to_string(),
        build_directory.to_string_lossy().to_string(),
    );

    let output_directory = resolve_path(
        basedir,
        pom.build
            .output_directory
            .as_deref()
            .unwrap_or("${project.build.directory}/classes"),
        &properties,
    );
    properties.insert(
        "project.build.outputDirectory".to_string(),
        output_directory.to_string_lossy().to_string(),
    );

    let test_output_directory = resolve_path(
        basedir,
        pom.build
            .test_output_directory
            .as_deref()
            .unwrap_or("${project.build.directory}/test-classes"),
        &properties,
    );

    let source_directory = resolve_path(
        basedir,
        pom.build
            .source_directory
            .as_deref()
            .unwrap_or("src/main/java"),
        &properties,
    );
    let test_source_directory = resolve_path(
        basedir,
        pom.build
            .test_source_directory
            .as_deref()
            .unwrap_or("src/test/java"),
        &properties,
    );

    let resources = pom
        .build
        .resources
        .clone()
        .unwrap_or_else(|| vec![RawResource::with_directory("src/main/resources")]);
    let test_resources = pom
        .build
        .test_resources
        .clone()
        .unwrap_or_else(|| vec![RawResource::with_directory("src/test/resources")]);

    let snapshot = ProjectSnapshot {
        basedir: basedir.to_path_buf(),
        name: pom
            .name
            .as_deref()
            .map(|name| resolve_placeholders(name, &properties)),
        artifact_id: pom.artifact_id.clone(),
        description: pom
            .description
            .as_deref()
            .map(|text| resolve_placeholders(text, &properties)),
        compile_source_roots: vec![source_directory],
        test_compile_source_roots: vec![test_source_directory],
        resources: resolve_resources(basedir, &resources, &properties),
        test_resources: resolve_resources(basedir, &test_resources, &properties),
        output_directory,
        test_output_directory,
    };

    tracing::debug!(
        target: "nova.eclipse",
        pom = %pom_path.display(),
        artifact_id = ?snapshot.artifact_id,
        "loaded maven project snapshot"
    );

    Ok(snapshot)
}

#[derive(Debug, Default, Clone)]
struct RawPom {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    name: Option<String>,
    description: Option<String>,
    properties: BTreeMap<String, String>,
    build: RawBuild,
}

#[derive(Debug, Default, Clone)]
struct RawBuild {
    directory: Option<String>,
    output_directory: Option<String>,
    test_output_directory: Option<String>,
    source_directory: Option<String>,
    test_source_directory: Option<String>,
    // `None` when the POM has no `<resources>` block at all; an empty block
    // declares no resources.
    resources: Option<Vec<RawResource>>,
    test_resources: Option<Vec<RawResource>>,
}

#[derive(Debug, Default, Clone)]
struct RawResource {
    directory: Option<String>,
    target_path: Option<String>,
    filtering: bool,
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl RawResource {
    fn with_directory(directory: &str) -> Self {
        Self {
            directory: Some(directory.to_string()),
            ..Self::default()
        }
    }
}

fn parse_pom(path: &Path) -> Result<RawPom, EclipseError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EclipseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let doc = roxmltree::Document::parse(&contents).map_err(|source| EclipseError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let project = doc.root_element();

    let mut pom = RawPom {
        group_id: child_text(&project, "groupId"),
        artifact_id: child_text(&project, "artifactId"),
        version: child_text(&project, "version"),
        name: child_text(&project, "name"),
        description: child_text(&project, "description"),
        ..RawPom::default()
    };

    if pom.group_id.is_none() || pom.version.is_none() {
        if let Some(parent) = child_element(&project, "parent") {
            pom.group_id = pom.group_id.or_else(|| child_text(&parent, "groupId"));
            pom.version = pom.version.or_else(|| child_text(&parent, "version"));
        }
    }

    if let Some(props_node) = child_element(&project, "properties") {
        for child in props_node.children().filter(|n| n.is_element()) {
            let key = child.tag_name().name().to_string();
            if let Some(value) = child.text().map(str::trim).filter(|t| !t.is_empty()) {
                pom.properties.insert(key, value.to_string());
            }
        }
    }

    if let Some(build) = child_element(&project, "build") {
        pom.build = RawBuild {
            directory: child_text(&build, "directory"),
            output_directory: child_text(&build, "outputDirectory"),
            test_output_directory: child_text(&build, "testOutputDirectory"),
            source_directory: child_text(&build, "sourceDirectory"),
            test_source_directory: child_text(&build, "testSourceDirectory"),
            resources: child_element(&build, "resources")
                .map(|node| parse_resources(&node, "resource")),
            test_resources: child_element(&build, "testResources")
                .map(|node| parse_resources(&node, "testResource")),
        };
    }

    Ok(pom)
}

fn parse_resources(node: &roxmltree::Node<'_, '_>, tag: &str) -> Vec<RawResource> {
    node.children()
        .filter(|n| n.is_element() && n.has_tag_name(tag))
        .map(|resource| RawResource {
            directory: child_text(&resource, "directory"),
            target_path: child_text(&resource, "targetPath"),
            filtering: child_text(&resource, "filtering").as_deref() == Some("true"),
            includes: child_list(&resource, "includes", "include"),
            excludes: child_list(&resource, "excludes", "exclude"),
        })
        .collect()
}

fn resolve_resources(
    basedir: &Path,
    resources: &[RawResource],
    properties: &BTreeMap<String, String>,
) -> Vec<Resource> {
    resources
        .iter()
        .filter_map(|raw| {
            // A resource without a directory contributes no root.
            let directory = raw.directory.as_deref()?;
            Some(Resource {
                directory: resolve_path(basedir, directory, properties),
                target_path: raw.target_path.clone(),
                filtering: raw.filtering,
                includes: raw.includes.clone(),
                excludes: raw.excludes.clone(),
            })
        })
        .collect()
}

fn resolve_path(basedir: &Path, raw: &str, properties: &BTreeMap<String, String>) -> PathBuf {
    let resolved = PathBuf::from(resolve_placeholders(raw, properties));
    if resolved.is_absolute() {
        resolved
    } else {
        basedir.join(resolved)
    }
}

// Bounds expansion of self-referencing properties such as `a = ${b}`, `b = ${a}`.
const MAX_PLACEHOLDER_PASSES: usize = 16;

/// Expand `${key}` references until the text stops changing, so property values may
/// refer to other properties. Unknown keys are left as written.
fn resolve_placeholders(text: &str, props: &BTreeMap<String, String>) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_PLACEHOLDER_PASSES {
        let next = substitute_once(&current, props);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn substitute_once(text: &str, props: &BTreeMap<String, String>) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

    re.replace_all(text, |caps: &regex::Captures<'_>| {
        let key = &caps[1];
        props
            .get(key)
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

fn child_element<'a>(
    node: &'a roxmltree::Node<'a, 'a>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn child_text(node: &roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    child_element(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn child_list(node: &roxmltree::Node<'_, '_>, container: &str, item: &str) -> Vec<String> {
    child_element(node, container)
        .map(|list| {
            list.children()
                .filter(|n| n.is_element() && n.has_tag_name(item))
                .filter_map(|n| n.text())
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
