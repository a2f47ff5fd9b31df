//! Global calgrid configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::Category;
use crate::error::{CalGridError, CalGridResult};
use crate::filter::CategoryFilter;
use crate::view::ViewMode;

static ENV_PREFIX: &str = "CALGRID";

fn default_events_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("calgrid").join("events.json"))
        .unwrap_or_else(|| PathBuf::from("~/.calgrid/events.json"))
}

fn is_default_view(v: &ViewMode) -> bool {
    *v == ViewMode::default()
}

/// Configuration at ~/.config/calgrid/config.toml
///
/// Every key can be overridden from the environment with a `CALGRID_`
/// prefix, e.g. `CALGRID_EVENTS_FILE=/tmp/events.json`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CalgridConfig {
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,

    #[serde(default, skip_serializing_if = "is_default_view")]
    pub default_view: ViewMode,

    /// Categories shown when no filter is given on the command line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_categories: Vec<Category>,
}

impl Default for CalgridConfig {
    fn default() -> Self {
        CalgridConfig {
            events_file: default_events_file(),
            default_view: ViewMode::default(),
            default_categories: Vec::new(),
        }
    }
}

impl CalgridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template on first run.
    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional on disk) layered under `CALGRID_*` variables.
    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load only what is written in `path`, ignoring `CALGRID_*` variables.
    ///
    /// Used before [`save`](Self::save) so overrides from the environment
    /// are never written back to disk.
    pub fn load_file(path: &Path) -> CalGridResult<Self> {
        Self::load_with_env(
            path,
            Environment::with_prefix(ENV_PREFIX).source(Some(config::Map::new())),
        )
    }

    fn load_with_env(path: &Path, env: Environment) -> CalGridResult<Self> {
        debug!(path = %path.display(), "loading config");

        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))
    }

    /// Events file path with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn default_filter(&self) -> CategoryFilter {
        self.default_categories.iter().copied().collect()
    }

    pub fn save(&self, path: &Path) -> CalGridResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalGridError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# Where events are stored:
# events_file = \"{}\"

# View shown by `calgrid show` (day, month or year):
# default_view = \"month\"

# Categories shown when no --category is given (empty shows all):
# default_categories = [\"meeting\", \"holiday\"]
",
            default_events_file().display()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalgridConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.default_view, ViewMode::Month);
        assert!(config.default_categories.is_empty());
        assert!(config.default_filter().is_empty());
    }

    #[test]
    fn template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calgrid").join("config.toml");
        CalgridConfig::create_default_config(&path).unwrap();

        let config = CalgridConfig::load_from(&path).unwrap();
        assert_eq!(config.default_view, ViewMode::Month);
        assert_eq!(config.events_file, default_events_file());
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "events_file = \"~/cal/events.json\"\n\
             default_view = \"year\"\n\
             default_categories = [\"holiday\", \"meeting\"]\n",
        )
        .unwrap();

        let config = CalgridConfig::load_from(&path).unwrap();
        assert_eq!(config.default_view, ViewMode::Year);
        assert_eq!(config.events_file, PathBuf::from("~/cal/events.json"));

        let filter = config.default_filter();
        assert!(filter.allows(Category::Holiday));
        assert!(!filter.allows(Category::Personal));
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn environment_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "events_file = \"/from/file.json\"\n\
             default_view = \"year\"\n\
             default_categories = [\"holiday\"]\n",
        )
        .unwrap();

        let config = CalgridConfig::load_with_env(
            &path,
            env(&[
                ("CALGRID_EVENTS_FILE", "/from/env.json"),
                ("CALGRID_DEFAULT_VIEW", "day"),
                ("OTHER_DEFAULT_VIEW", "month"),
            ]),
        )
        .unwrap();

        assert_eq!(config.events_file, PathBuf::from("/from/env.json"));
        assert_eq!(config.default_view, ViewMode::Day);
        assert_eq!(config.default_categories, vec![Category::Holiday]);
    }

    #[test]
    fn environment_alone_is_enough() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalgridConfig::load_with_env(
            &dir.path().join("missing.toml"),
            env(&[("CALGRID_EVENTS_FILE", "/tmp/calgrid.json")]),
        )
        .unwrap();

        assert_eq!(config.events_file, PathBuf::from("/tmp/calgrid.json"));
        assert_eq!(config.default_view, ViewMode::Month);
    }

    #[test]
    fn load_file_keeps_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_view = \"year\"\n").unwrap();

        let config = CalgridConfig::load_file(&path).unwrap();
        assert_eq!(config.default_view, ViewMode::Year);
        assert_eq!(config.events_file, default_events_file());
    }

    #[test]
    fn save_round_trips_non_default_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = CalgridConfig {
            events_file: PathBuf::from("/tmp/events.json"),
            default_view: ViewMode::Day,
            default_categories: vec![Category::Reminder],
        };
        config.save(&path).unwrap();

        let loaded = CalgridConfig::load_from(&path).unwrap();
        assert_eq!(loaded.default_view, ViewMode::Day);
        assert_eq!(loaded.default_categories, vec![Category::Reminder]);
        assert_eq!(loaded.events_file, PathBuf::from("/tmp/events.json"));
    }
}
