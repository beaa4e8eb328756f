use std::path::PathBuf;

use nova_eclipse::{EclipseError, ProjectSnapshot, Resource};

fn testdata_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(rel)
}

#[test]
fn applies_maven_defaults_for_minimal_pom() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pom.xml"),
        r#"<project>
  <groupId>com.example</groupId>
  <artifactId>minimal</artifactId>
  <version>1.0</version>
</project>"#,
    )
    .unwrap();

    let snapshot = ProjectSnapshot::load(dir.path()).expect("load minimal pom");
    let root = &snapshot.basedir;

    assert_eq!(snapshot.name, None);
    assert_eq!(snapshot.artifact_id.as_deref(), Some("minimal"));
    assert_eq!(snapshot.description, None);
    assert_eq!(snapshot.compile_source_roots, vec![root.join("src/main/java")]);
    assert_eq!(
        snapshot.test_compile_source_roots,
        vec![root.join("src/test/java")]
    );
    assert_eq!(
        snapshot.resources,
        vec![Resource::new(root.join("src/main/resources"))]
    );
    assert_eq!(
        snapshot.test_resources,
        vec![Resource::new(root.join("src/test/resources"))]
    );
    assert_eq!(snapshot.output_directory, root.join("target/classes"));
    assert_eq!(snapshot.test_output_directory, root.join("target/test-classes"));
}

#[test]
fn reads_custom_build_layout() {
    let snapshot = ProjectSnapshot::load(testdata_path("maven-custom-layout"))
        .expect("load custom layout pom");
    let root = &snapshot.basedir;

    assert_eq!(snapshot.name.as_deref(), Some("Custom custom-layout"));
    assert_eq!(
        snapshot.description.as_deref(),
        Some("Sources and outputs in non-default places")
    );
    assert_eq!(snapshot.compile_source_roots, vec![root.join("src/java")]);
    assert_eq!(snapshot.test_compile_source_roots, vec![root.join("test/java")]);
    assert_eq!(snapshot.output_directory, root.join("build/main"));
    assert_eq!(snapshot.test_output_directory, root.join("build/test-classes"));

    assert_eq!(snapshot.resources.len(), 2);
    assert_eq!(snapshot.resources[0].directory, root.join("src/resources"));
    assert!(snapshot.resources[0].filtering);
    assert_eq!(snapshot.resources[0].includes, vec!["**/*.properties"]);
    // `gen.dir` is itself defined in terms of `${project.build.directory}`.
    assert_eq!(
        snapshot.resources[1].directory,
        root.join("build/generated/resources")
    );
    assert_eq!(snapshot.resources[1].target_path.as_deref(), Some("META-INF"));

    // An explicit empty `<testResources/>` declares none.
    assert!(snapshot.test_resources.is_empty());
}

#[test]
fn missing_pom_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProjectSnapshot::load(dir.path()).unwrap_err();
    assert!(matches!(err, EclipseError::Io { .. }), "{err:?}");
}

#[test]
fn malformed_pom_is_an_xml_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pom.xml"), "<project><artifactId>x</project>").unwrap();

    let err = ProjectSnapshot::load(dir.path()).unwrap_err();
    assert!(matches!(err, EclipseError::Xml { .. }), "{err:?}");
    assert!(err.to_string().contains("pom.xml"), "{err}");
}

#[test]
fn nested_properties_resolve_in_resource_directories() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pom.xml"),
        r#"<project>
  <artifactId>nested</artifactId>
  <properties>
    <gen.dir>${project.build.directory}/gen</gen.dir>
  </properties>
  <build>
    <resources>
      <resource>
        <directory>${gen.dir}/res</directory>
      </resource>
    </resources>
  </build>
</project>"#,
    )
    .unwrap();

    let snapshot = ProjectSnapshot::load(dir.path()).expect("load pom with nested properties");
    let root = &snapshot.basedir;

    assert_eq!(snapshot.resources.len(), 1);
    assert_eq!(snapshot.resources[0].directory, root.join("target/gen/res"));
}
