use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use nova_config::EclipseConfig;
use nova_eclipse::{EclipseGenerator, ProjectSnapshot, RunReport, WriteOutcome};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nova", version, about = "Nova CLI (Eclipse project metadata)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate `.project` and `.classpath` for a Maven project
    Eclipse(EclipseArgs),
    /// Print the project layout read from `pom.xml`
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
struct EclipseArgs {
    /// Project directory containing `pom.xml` (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
    /// Main build output (defaults to the project's build output directory)
    #[arg(long)]
    output_directory: Option<PathBuf>,
    /// Test build output (defaults to the project's build output directory)
    #[arg(long)]
    test_output_directory: Option<PathBuf>,
    /// Use this output for both main and test code
    #[arg(long = "alt-target", visible_alias = "alternative-output")]
    alternative_output: Option<PathBuf>,
    /// Mark source and resource roots as optional
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    sources_optional: Option<bool>,
    /// Render the descriptors but do not write them
    #[arg(long)]
    dry_run: bool,
    /// Do nothing
    #[arg(long)]
    skip: bool,
    /// Leave out the JDT and m2e builders
    #[arg(long)]
    no_default_builders: bool,
    /// Leave out the JDT and m2e natures
    #[arg(long)]
    no_default_natures: bool,
    #[arg(long = "extra-builder", value_name = "ID")]
    extra_builders: Vec<String>,
    #[arg(long = "extra-nature", value_name = "ID")]
    extra_natures: Vec<String>,
    #[arg(long = "extra-source", value_name = "DIR")]
    extra_sources: Vec<PathBuf>,
    #[arg(long = "extra-resource", value_name = "DIR")]
    extra_resources: Vec<PathBuf>,
    #[arg(long = "extra-test-source", value_name = "DIR")]
    extra_test_sources: Vec<PathBuf>,
    #[arg(long = "extra-test-resource", value_name = "DIR")]
    extra_test_resources: Vec<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

impl EclipseArgs {
    /// Layer flags over the `[eclipse]` config section. Lists given on the command
    /// line replace the configured ones.
    fn apply(&self, config: &mut EclipseConfig) {
        if let Some(path) = &self.output_directory {
            config.output_directory = Some(path.clone());
        }
        if let Some(path) = &self.test_output_directory {
            config.test_output_directory = Some(path.clone());
        }
        if let Some(path) = &self.alternative_output {
            config.alternative_output = Some(path.clone());
        }
        if let Some(optional) = self.sources_optional {
            config.sources_optional = optional;
        }
        config.dry_run |= self.dry_run;
        config.skip |= self.skip;
        if self.no_default_builders {
            config.default_builders = false;
        }
        if self.no_default_natures {
            config.default_natures = false;
        }

        replace_if_given(&mut config.extra_builders, &self.extra_builders);
        replace_if_given(&mut config.extra_natures, &self.extra_natures);
        replace_if_given(&mut config.extra_sources, &self.extra_sources);
        replace_if_given(&mut config.extra_resources, &self.extra_resources);
        replace_if_given(&mut config.extra_test_sources, &self.extra_test_sources);
        replace_if_given(&mut config.extra_test_resources, &self.extra_test_resources);
    }
}

fn replace_if_given<T: Clone>(target: &mut Vec<T>, given: &[T]) {
    if !given.is_empty() {
        *target = given.to_vec();
    }
}

#[derive(Args)]
struct SnapshotArgs {
    /// Project directory containing `pom.xml` (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Eclipse(args) => {
            let (mut config, config_path) = nova_config::load_for_workspace(&args.path)
                .with_context(|| format!("failed to load config for {}", args.path.display()))?;
            nova_config::init_tracing(&config.logging);
            if let Some(path) = &config_path {
                tracing::debug!(target: "nova.cli", path = %path.display(), "using config file");
            }

            args.apply(&mut config.eclipse);
            let generator = EclipseGenerator::new(config.eclipse);
            let report = generator.run_maven_project(&args.path)?;
            print_report(&report, args.json)?;
            Ok(0)
        }
        Command::Snapshot(args) => {
            let snapshot = ProjectSnapshot::load(&args.path)?;
            print_json(&snapshot)?;
            Ok(0)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }

    match report {
        RunReport::Skipped => println!("eclipse: skipped"),
        RunReport::Generated { project, classpath } => {
            print_outcome(project);
            print_outcome(classpath);
        }
    }
    Ok(())
}

fn print_outcome(outcome: &WriteOutcome) {
    match outcome {
        WriteOutcome::Created { path } => println!("created: {}", path.display()),
        WriteOutcome::Overwritten { path } => println!("overwritten: {}", path.display()),
        WriteOutcome::DryRun { path, contents } => {
            println!("(dryrun) would generate: {}", path.display());
            print!("{contents}");
        }
    }
}
