use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default executable names for the project toolchain
const DEFAULT_PHP_BINARY: &str = "php";
const DEFAULT_COMPOSER_BINARY: &str = "composer";
const DEFAULT_NPM_BINARY: &str = "npm";

/// Default environment file locations, relative to the project directory
const DEFAULT_ENV_FILE: &str = ".env";
const DEFAULT_ENV_TEMPLATE: &str = ".env.example";

/// Optional per-project settings file
pub const PROJECT_SETTINGS_FILE: &str = ".groundwork.yml";

/// Tool settings that can be configured via a project YAML file, environment
/// variables, or CLI flags
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[serde(default)]
pub struct Settings {
    /// PHP executable used for application CLI commands
    #[arg(
        long = "php-binary",
        env = "GROUNDWORK_PHP",
        default_value = DEFAULT_PHP_BINARY,
        help = "PHP executable used for application CLI commands"
    )]
    #[serde(default = "default_php_binary")]
    pub php_binary: String,

    /// Composer executable used for dependency installation
    #[arg(
        long = "composer-binary",
        env = "GROUNDWORK_COMPOSER",
        default_value = DEFAULT_COMPOSER_BINARY,
        help = "Composer executable used for dependency installation"
    )]
    #[serde(default = "default_composer_binary")]
    pub composer_binary: String,

    /// npm executable used for frontend asset builds
    #[arg(
        long = "npm-binary",
        env = "GROUNDWORK_NPM",
        default_value = DEFAULT_NPM_BINARY,
        help = "npm executable used for frontend asset builds"
    )]
    #[serde(default = "default_npm_binary")]
    pub npm_binary: String,

    /// Live environment file, relative to the project directory
    #[arg(
        long = "env-file",
        env = "GROUNDWORK_ENV_FILE",
        default_value = DEFAULT_ENV_FILE,
        help = "Live environment file, relative to the project directory"
    )]
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Environment template copied when the live file is absent
    #[arg(
        long = "env-template",
        env = "GROUNDWORK_ENV_TEMPLATE",
        default_value = DEFAULT_ENV_TEMPLATE,
        help = "Environment template copied when the live file is absent"
    )]
    #[serde(default = "default_env_template")]
    pub env_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            php_binary: DEFAULT_PHP_BINARY.to_string(),
            composer_binary: DEFAULT_COMPOSER_BINARY.to_string(),
            npm_binary: DEFAULT_NPM_BINARY.to_string(),
            env_file: DEFAULT_ENV_FILE.to_string(),
            env_template: DEFAULT_ENV_TEMPLATE.to_string(),
        }
    }
}

/// Default value functions for serde
fn default_php_binary() -> String {
    DEFAULT_PHP_BINARY.to_string()
}

fn default_composer_binary() -> String {
    DEFAULT_COMPOSER_BINARY.to_string()
}

fn default_npm_binary() -> String {
    DEFAULT_NPM_BINARY.to_string()
}

fn default_env_file() -> String {
    DEFAULT_ENV_FILE.to_string()
}

fn default_env_template() -> String {
    DEFAULT_ENV_TEMPLATE.to_string()
}

impl Settings {
    /// Load the optional per-project settings file from `dir`.
    /// Returns `Ok(None)` when no file is present.
    pub fn load_project_file(dir: &Path) -> Result<Option<Settings>> {
        let path = dir.join(PROJECT_SETTINGS_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        Ok(Some(settings))
    }

    /// Merge settings from different sources with proper priority:
    /// CLI/env settings override YAML settings, YAML overrides defaults.
    /// A CLI value equal to the built-in default is treated as "not provided".
    pub fn merge_with_yaml(&mut self, yaml_settings: &Settings) {
        merge_field(&mut self.php_binary, &yaml_settings.php_binary, DEFAULT_PHP_BINARY);
        merge_field(
            &mut self.composer_binary,
            &yaml_settings.composer_binary,
            DEFAULT_COMPOSER_BINARY,
        );
        merge_field(&mut self.npm_binary, &yaml_settings.npm_binary, DEFAULT_NPM_BINARY);
        merge_field(&mut self.env_file, &yaml_settings.env_file, DEFAULT_ENV_FILE);
        merge_field(
            &mut self.env_template,
            &yaml_settings.env_template,
            DEFAULT_ENV_TEMPLATE,
        );
    }
}

fn merge_field(current: &mut String, yaml_value: &str, default: &str) {
    if current == default && yaml_value != default {
        *current = yaml_value.to_string();
    }
}
