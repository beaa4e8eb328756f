use std::ffi::OsString;

use nova_config::{
    discover_config_path, load_for_workspace, with_config_env_lock, NovaConfig,
    NOVA_CONFIG_ENV_VAR,
};
use tempfile::tempdir;

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &std::path::Path) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn set_os(key: &'static str, value: &OsString) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn discovers_nova_toml_in_project_root() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(NOVA_CONFIG_ENV_VAR);

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nova.toml");
        std::fs::write(&config_path, "[eclipse]\nskip = true\n").unwrap();

        let discovered = discover_config_path(dir.path())
            .expect("nova.toml should be discovered when present in project root");
        assert_eq!(
            discovered,
            config_path.canonicalize().unwrap_or(config_path),
            "expected config discovery to return the project-root nova.toml path"
        );
    });
}

#[test]
fn nova_toml_wins_over_dot_nova_toml() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(NOVA_CONFIG_ENV_VAR);

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("nova.toml"), "[eclipse]\nskip = true\n").unwrap();
        std::fs::write(dir.path().join(".nova.toml"), "[eclipse]\nskip = false\n").unwrap();

        let (config, _) = load_for_workspace(dir.path()).unwrap();
        assert!(config.eclipse.skip);
    });
}

#[test]
fn env_override_wins_over_project_file() {
    with_config_env_lock(|| {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("nova.toml"), "[eclipse]\ndry_run = false\n").unwrap();

        let override_path = dir.path().join("override.toml");
        std::fs::write(
            &override_path,
            "[eclipse]\ndry_run = true\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let _env = EnvVarGuard::set_os(NOVA_CONFIG_ENV_VAR, &OsString::from("override.toml"));

        let (config, path) = load_for_workspace(dir.path()).unwrap();
        assert!(config.eclipse.dry_run, "expected override config to be loaded");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            path.expect("load_for_workspace should return the resolved config path"),
            override_path.canonicalize().unwrap_or(override_path)
        );
    });
}

#[test]
fn env_override_accepts_absolute_path() {
    with_config_env_lock(|| {
        let dir = tempdir().unwrap();
        let override_path = dir.path().join("override.toml");
        std::fs::write(&override_path, "[eclipse]\ndefault_natures = false\n").unwrap();

        let _env = EnvVarGuard::set(NOVA_CONFIG_ENV_VAR, &override_path);

        let (config, path) = load_for_workspace(dir.path()).unwrap();
        assert!(!config.eclipse.default_natures);
        assert_eq!(
            path.expect("load_for_workspace should return the resolved config path"),
            override_path.canonicalize().unwrap_or(override_path)
        );
    });
}

#[test]
fn missing_config_returns_defaults() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(NOVA_CONFIG_ENV_VAR);

        let dir = tempdir().unwrap();
        let (config, path) = load_for_workspace(dir.path()).unwrap();
        assert_eq!(path, None);
        assert_eq!(config, NovaConfig::default());
    });
}

#[test]
fn unreadable_override_is_an_io_error() {
    with_config_env_lock(|| {
        let dir = tempdir().unwrap();
        let _env = EnvVarGuard::set(NOVA_CONFIG_ENV_VAR, &dir.path().join("missing.toml"));

        let err = load_for_workspace(dir.path()).unwrap_err();
        assert!(
            matches!(err, nova_config::ConfigError::Io { .. }),
            "unexpected error: {err:?}"
        );
    });
}
