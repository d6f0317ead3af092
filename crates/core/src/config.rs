use crate::matcher::{SuffixSet, DEFAULT_SUFFIXES};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// Persisted CLI preferences. The walk never reads this file; it only ever
// receives an explicit SuffixSet snapshot built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub suffixes: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn suffix_set(&self) -> SuffixSet {
        SuffixSet::from_list(&self.suffixes)
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("io", "dirseq", "dirseq")
        .context("could not determine the OS config directory")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    if !paths.config_path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&paths.config_path).with_context(|| {
        format!(
            "could not read config file: {}",
            paths.config_path.display()
        )
    })?;

    let config = toml::from_str::<AppConfig>(&raw).context("could not parse config file")?;
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    let paths = app_paths()?;
    fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "could not create config directory: {}",
            paths.config_dir.display()
        )
    })?;
    let body = toml::to_string_pretty(config).context("could not serialize config")?;
    fs::write(&paths.config_path, body).with_context(|| {
        format!(
            "could not write config file: {}",
            paths.config_path.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn default_config_covers_the_default_suffixes() {
        let config = AppConfig::default();
        let set = config.suffix_set();
        assert_eq!(set.suffixes().len(), 10);
        assert!(set.suffixes().contains(&"heic".to_string()));
    }

    #[test]
    fn stored_values_are_normalized_when_building_the_set() {
        let config = AppConfig {
            suffixes: vec!["*.JPG".to_string(), "png".to_string()],
        };
        assert_eq!(config.suffix_set().suffixes(), &["jpg", "png"]);
    }
}
