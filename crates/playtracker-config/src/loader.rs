use std::path::{Path, PathBuf};

use playtracker_common::{Error, Result};
use tracing::{debug, info};

use crate::model::AppConfig;

/// Environment variables consulted after the config file, in the order they
/// are applied. `DB_PATH` is kept for existing deployments; the prefixed
/// variable wins when both are set.
const ENV_DB_PATH: &[&str] = &["DB_PATH", "PLAYTRACKER_DB_PATH"];
const ENV_MIGRATIONS_DIR: &str = "PLAYTRACKER_MIGRATIONS_DIR";
const ENV_HOST: &str = "PLAYTRACKER_HOST";
const ENV_PORT: &str = "PLAYTRACKER_PORT";

pub struct ConfigLoader;

impl ConfigLoader {
    /// `~/.playtracker`, or `./.playtracker` when no home directory is known.
    pub fn default_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".playtracker")
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yml")
    }

    /// Load the config file at `path` and apply environment overrides.
    pub fn load(path: &Path) -> Result<AppConfig> {
        let mut config = Self::load_file(path)?;
        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load the config file at `path` without looking at the environment.
    ///
    /// A missing file is not an error; the defaults are returned instead.
    pub fn load_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let config = parse_config(path, &contents)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Overlay values from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ENV_DB_PATH {
            if let Some(path) = non_empty(lookup(key)) {
                config.database.path = PathBuf::from(path);
            }
        }
        if let Some(dir) = non_empty(lookup(ENV_MIGRATIONS_DIR)) {
            config.database.migrations_dir = PathBuf::from(dir);
        }
        if let Some(host) = non_empty(lookup(ENV_HOST)) {
            config.server.host = host;
        }
        if let Some(port) = non_empty(lookup(ENV_PORT)) {
            config.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("invalid {ENV_PORT} {port:?}: {e}")))?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_config(path: &Path, contents: &str) -> Result<AppConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yml" | "yaml" => serde_yaml::from_str(contents)
            .map_err(|e| Error::Config(format!("YAML parse error: {e}"))),
        "toml" => {
            toml::from_str(contents).map_err(|e| Error::Config(format!("TOML parse error: {e}")))
        }
        other => Err(Error::Config(format!(
            "unsupported config extension: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_file(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.migrations_dir, PathBuf::from("migrations"));
    }

    #[test]
    fn yaml_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "server:\n  port: 9000\ndatabase:\n  migrations_dir: /srv/migrations\n",
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.database.migrations_dir,
            PathBuf::from("/srv/migrations")
        );
        assert_eq!(config.web.site_title, "Marvel Champions Play Tracker");
    }

    #[test]
    fn toml_file_is_supported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[web]\nsite_title = \"Game Night\"\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.web.site_title, "Game Night");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "port=1").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config extension"));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server: [unclosed").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        ConfigLoader::apply_overrides(
            &mut config,
            env(&[
                ("DB_PATH", "/tmp/legacy.db"),
                ("PLAYTRACKER_MIGRATIONS_DIR", "/opt/migrations"),
                ("PLAYTRACKER_HOST", "0.0.0.0"),
                ("PLAYTRACKER_PORT", "3000"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/legacy.db"));
        assert_eq!(
            config.database.migrations_dir,
            PathBuf::from("/opt/migrations")
        );
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn prefixed_db_path_wins_over_legacy_name() {
        let mut config = AppConfig::default();
        ConfigLoader::apply_overrides(
            &mut config,
            env(&[
                ("DB_PATH", "/tmp/legacy.db"),
                ("PLAYTRACKER_DB_PATH", "/tmp/new.db"),
            ]),
        )
        .unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/new.db"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        ConfigLoader::apply_overrides(&mut config, env(&[("DB_PATH", "  ")])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut config = AppConfig::default();
        let err = ConfigLoader::apply_overrides(&mut config, env(&[("PLAYTRACKER_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("PLAYTRACKER_PORT"));
    }
}
