use anyhow::Context;
use hrtools_core::AppConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "hrtools.db";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub verbose: bool,
    pub app: AppConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("hrtools"),
            verbose: false,
            app: AppConfig::default(),
        }
    }
}

impl CliConfig {
    /// Defaults, overridden by `<data_dir>/config.json` when present.
    pub fn load(data_dir: Option<PathBuf>, verbose: bool) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        config.verbose = verbose;

        let path = config.data_dir.join(CONFIG_FILE);
        if path.exists() {
            match read_app_config(&path) {
                Ok(app) => config.app = app,
                Err(e) => tracing::warn!("Ignoring {}: {:#}", path.display(), e),
            }
        }

        config
            .app
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }
}

fn read_app_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let app = serde_json::from_str(&content).context("Failed to parse config")?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() {
        let temp_dir = tempdir().unwrap();
        let config = CliConfig::load(Some(temp_dir.path().to_path_buf()), true).unwrap();
        assert!(config.verbose);
        assert_eq!(config.app.default_group_size, 4);
        assert_eq!(config.db_path(), temp_dir.path().join("hrtools.db"));
    }

    #[test]
    fn test_config_file_overrides() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"default_prize": "Gift Card", "allow_duplicates": true}"#,
        )
        .unwrap();

        let config = CliConfig::load(Some(temp_dir.path().to_path_buf()), false).unwrap();
        assert_eq!(config.app.default_prize, "Gift Card");
        assert!(config.app.allow_duplicates);
    }

    #[test]
    fn test_unparseable_config_falls_back() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("config.json"), "not json").unwrap();

        let config = CliConfig::load(Some(temp_dir.path().to_path_buf()), false).unwrap();
        assert_eq!(config.app.default_prize, "Grand Prize");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"default_group_count": 0}"#,
        )
        .unwrap();

        assert!(CliConfig::load(Some(temp_dir.path().to_path_buf()), false).is_err());
    }
}
