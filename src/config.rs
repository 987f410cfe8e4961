use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;

/// Label of the internal license whose artifacts never appear in the public notice.
pub const INTERNAL_LICENSE: &str = "CloudBees License";

/// Root configuration structure, deserialized from `.license-notice/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notice: NoticeConfig,
}

/// Inputs, output, and exclusions of a notice run.
#[derive(Debug, Deserialize)]
pub struct NoticeConfig {
    /// Declared licenses whose artifacts are left out of the notice and of the errors.
    #[serde(default = "default_excluded_licenses")]
    pub excluded_licenses: Vec<String>,
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,
    #[serde(default = "default_licenses")]
    pub licenses: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_excluded_licenses() -> Vec<String> {
    vec![INTERNAL_LICENSE.to_string()]
}

fn default_artifacts() -> PathBuf {
    PathBuf::from("resources").join("artifacts.xml")
}

fn default_licenses() -> PathBuf {
    PathBuf::from("resources").join("licenses.xml")
}

fn default_output() -> PathBuf {
    PathBuf::from("LICENSES.txt")
}

impl Default for NoticeConfig {
    fn default() -> Self {
        NoticeConfig {
            excluded_licenses: default_excluded_licenses(),
            artifacts: default_artifacts(),
            licenses: default_licenses(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Let command line flags take precedence over file values.
    /// `--exclude-license` adds to the configured exclusions.
    pub fn merge_cli(&mut self, cli: &Cli) {
        let notice = &mut self.notice;
        if let Some(path) = &cli.artifacts {
            notice.artifacts = path.clone();
        }
        if let Some(path) = &cli.licenses {
            notice.licenses = path.clone();
        }
        if let Some(path) = &cli.output {
            notice.output = path.clone();
        }
        for label in &cli.exclude_license {
            if !notice.excluded_licenses.contains(label) {
                notice.excluded_licenses.push(label.clone());
            }
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` - path passed via `--config`
/// 2. `<project_path>/.license-notice/config.toml`
/// 3. `~/.config/license-notice/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-notice").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-notice")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
