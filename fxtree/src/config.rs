//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/fxtree/fxtree.toml`
//! 3. Local config: `<dir>/.fxtree.toml` (usually the working directory)
//! 4. Environment variables: `FXTREE_*` prefix, `__` between section and key

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::codec::markup::{MarkupOptions, DEFAULT_NAMESPACE};

pub const GLOBAL_CONFIG_FILE: &str = "fxtree.toml";
pub const LOCAL_CONFIG_FILE: &str = ".fxtree.toml";
pub const ENV_PREFIX: &str = "FXTREE";

#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

impl SettingsError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// FXML export configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Namespace URI for the `fx` prefix
    pub namespace: String,
    /// De-duplicate generated TextArea ids
    pub unique_ids: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            unique_ids: true,
        }
    }
}

/// Interactive shell configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt printed before reading a menu choice
    pub prompt: String,
    /// Print the menu before every prompt
    pub show_menu: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "Please select an option:".to_string(),
            show_menu: true,
        }
    }
}

/// Raw sections for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawExportConfig {
    pub namespace: Option<String>,
    pub unique_ids: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawShellConfig {
    pub prompt: Option<String>,
    pub show_menu: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub export: RawExportConfig,
    pub shell: RawShellConfig,
}

/// Unified configuration for fxtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub export: ExportConfig,
    pub shell: ShellConfig,
}

/// Get the XDG config directory for fxtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fxtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::new(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| SettingsError::new(format!("parse {}: {}", path.display(), e)))
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            export: ExportConfig {
                namespace: overlay
                    .export
                    .namespace
                    .clone()
                    .unwrap_or_else(|| self.export.namespace.clone()),
                unique_ids: overlay.export.unique_ids.unwrap_or(self.export.unique_ids),
            },
            shell: ShellConfig {
                prompt: overlay
                    .shell
                    .prompt
                    .clone()
                    .unwrap_or_else(|| self.shell.prompt.clone()),
                show_menu: overlay.shell.show_menu.unwrap_or(self.shell.show_menu),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.fxtree.toml`
    #[instrument(level = "debug")]
    pub fn load(local_dir: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply FXTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| SettingsError::new(e.to_string()))?;

        if let Ok(val) = config.get_string("export.namespace") {
            settings.export.namespace = val;
        }
        if let Ok(val) = config.get_bool("export.unique_ids") {
            settings.export.unique_ids = val;
        }
        if let Ok(val) = config.get_string("shell.prompt") {
            settings.shell.prompt = val;
        }
        if let Ok(val) = config.get_bool("shell.show_menu") {
            settings.shell.show_menu = val;
        }

        Ok(settings)
    }

    pub fn markup_options(&self) -> MarkupOptions {
        MarkupOptions {
            namespace: self.export.namespace.clone(),
            unique_ids: self.export.unique_ids,
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self)
            .map_err(|e| SettingsError::new(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# fxtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/fxtree/fxtree.toml
#   Local:  ./.fxtree.toml
#   Env:    FXTREE_* environment variables, e.g. FXTREE_EXPORT__UNIQUE_IDS=false

[export]
# Namespace bound to the fx prefix on the root AnchorPane
# namespace = "http://javafx.com/fxml"

# Give repeated TextArea ids a numeric suffix (notes, notes2, ...)
# unique_ids = true

[shell]
# Prompt printed before each menu choice
# prompt = "Please select an option:"

# Print the menu before every prompt
# show_menu = true
"#
        .to_string()
    }
}
