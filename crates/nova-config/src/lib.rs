use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};

use parking_lot::ReentrantMutex;
use thiserror::Error;
use tracing_subscriber::prelude::*;

/// Settings for the Eclipse descriptor generator (`[eclipse]` table).
///
/// Every field is optional in the TOML file; command line flags are layered on top
/// by the CLI before a run starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EclipseConfig {
    /// Main build output. Defaults to the host project's build output directory.
    pub output_directory: Option<PathBuf>,

    /// Test build output. Defaults to the host project's build output directory
    /// (the *main* one, not the test one).
    pub test_output_directory: Option<PathBuf>,

    /// Overrides both main and test output when set.
    pub alternative_output: Option<PathBuf>,

    /// Mark generated source and resource roots as optional for the IDE.
    pub sources_optional: bool,

    /// Render both descriptors but do not write them.
    pub dry_run: bool,

    /// Do not generate anything.
    pub skip: bool,

    /// Include the JDT/m2e builder pair.
    pub default_builders: bool,

    /// Include the JDT/m2e nature pair.
    pub default_natures: bool,

    pub extra_builders: Vec<String>,
    pub extra_natures: Vec<String>,
    pub extra_sources: Vec<PathBuf>,
    pub extra_resources: Vec<PathBuf>,
    pub extra_test_sources: Vec<PathBuf>,
    pub extra_test_resources: Vec<PathBuf>,
}

impl Default for EclipseConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            test_output_directory: None,
            alternative_output: None,
            sources_optional: true,
            dry_run: false,
            skip: false,
            default_builders: true,
            default_natures: true,
            extra_builders: Vec::new(),
            extra_natures: Vec::new(),
            extra_sources: Vec::new(),
            extra_resources: Vec::new(),
            extra_test_sources: Vec::new(),
            extra_test_resources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level for all Nova crates.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    /// Map `level` to filter directives. Bare level names are case-insensitive and
    /// `warning` is accepted for `warn`; anything else passes through unchanged, so
    /// `nova.eclipse=debug,info` works too.
    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        let lowered = trimmed.to_ascii_lowercase();
        match lowered.as_str() {
            "" => Self::default_level(),
            "warning" => "warn".to_owned(),
            "trace" | "debug" | "info" | "warn" | "error" => lowered,
            _ => trimmed.to_owned(),
        }
    }

    /// Filter for the generator's log output.
    ///
    /// A non-empty `RUST_LOG` is appended after the configured directives, so it can
    /// raise or lower individual targets. Directives that do not parse fall back to
    /// `RUST_LOG` alone, then to the configured level, then to `info`.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        use tracing_subscriber::EnvFilter;

        let configured = Self::normalize_level_directives(&self.level);
        let from_env = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let mut candidates = Vec::with_capacity(3);
        if let Some(from_env) = from_env {
            candidates.push(format!("{configured},{from_env}"));
            candidates.push(from_env);
        }
        candidates.push(configured);

        candidates
            .into_iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| {
                EnvFilter::default()
                    .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
            })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NovaConfig {
    pub eclipse: EclipseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

fn sanitize_toml_error_message(message: &str) -> String {
    // Parse errors end up in logs; keep user-provided string values out of them.
    static QUOTED_STRING_RE: OnceLock<regex::Regex> = OnceLock::new();

    let re = QUOTED_STRING_RE.get_or_init(|| {
        regex::Regex::new(r#""(?:\\.|[^"\\])*""#).expect("quoted-string regex should compile")
    });

    re.replace_all(message, r#""<redacted>""#).into_owned()
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a source snippet; keep only the message.
        ConfigError::Toml(sanitize_toml_error_message(err.message()))
    }
}

impl NovaConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

pub const NOVA_CONFIG_ENV_VAR: &str = "NOVA_CONFIG_PATH";

const CONFIG_FILE_NAMES: [&str; 2] = ["nova.toml", ".nova.toml"];

static CONFIG_ENV_LOCK: OnceLock<ReentrantMutex<()>> = OnceLock::new();

fn config_env_lock() -> &'static ReentrantMutex<()> {
    CONFIG_ENV_LOCK.get_or_init(|| ReentrantMutex::new(()))
}

/// Run `f` while holding the lock that [`discover_config_path`] takes.
///
/// Code that sets [`NOVA_CONFIG_ENV_VAR`] around a discovery call holds this lock
/// for the whole sequence. The lock is reentrant, so `f` may call
/// [`load_for_workspace`] directly.
pub fn with_config_env_lock<R>(f: impl FnOnce() -> R) -> R {
    let _guard = config_env_lock().lock();
    f()
}

/// Find the config file for the project at `project_root`.
///
/// `NOVA_CONFIG_PATH` wins when set, even if the file it names does not exist; a
/// relative value is taken from `project_root`. Otherwise the first of `nova.toml`
/// and `.nova.toml` present in `project_root` is used.
pub fn discover_config_path(project_root: &Path) -> Option<PathBuf> {
    let _guard = config_env_lock().lock();

    let found = match std::env::var_os(NOVA_CONFIG_ENV_VAR) {
        Some(value) => Some(project_root.join(PathBuf::from(value))),
        None => CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file()),
    };

    found.map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the configuration for a project root.
///
/// If no config is present, returns [`NovaConfig::default`] and `None`.
pub fn load_for_workspace(
    project_root: &Path,
) -> Result<(NovaConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(project_root) else {
        return Ok((NovaConfig::default(), None));
    };

    let config = NovaConfig::load_from_path(&path)?;
    tracing::debug!(target: "nova.config", path = %path.display(), "loaded config");
    Ok((config, Some(path)))
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber (stderr, plain text or JSON).
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = NovaConfig::load_from_str("").unwrap();
        assert_eq!(config, NovaConfig::default());
        assert!(config.eclipse.sources_optional);
        assert!(config.eclipse.default_builders);
        assert!(config.eclipse.default_natures);
        assert!(!config.eclipse.dry_run);
        assert!(!config.eclipse.skip);
    }

    #[test]
    fn level_directives_are_normalized() {
        assert_eq!(LoggingConfig::normalize_level_directives(" WARNING "), "warn");
        assert_eq!(LoggingConfig::normalize_level_directives(""), "info");
        assert_eq!(LoggingConfig::normalize_level_directives("Debug"), "debug");
        assert_eq!(
            LoggingConfig::normalize_level_directives("nova.eclipse=trace"),
            "nova.eclipse=trace"
        );
    }

    #[test]
    fn toml_errors_redact_string_values() {
        let err = NovaConfig::load_from_str("[eclipse]\nskip = \"secret\"\n").unwrap_err();
        let message = err.to_string();
        assert!(!message.contains("secret"), "{message}");
    }
}
