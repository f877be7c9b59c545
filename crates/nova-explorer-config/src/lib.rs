//! Configuration for the Nova project explorer.
//!
//! The explorer reads an optional `nova-explorer.toml` from the workspace root:
//!
//! ```toml
//! [workspace]
//! folders = ["app", "/abs/path/to/lib"]
//!
//! [logging]
//! level = "nova.explorer=debug"
//! json = false
//! ```
//!
//! Every field has a default, so a missing file behaves like an empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod logging;

pub use logging::{init_tracing, LoggingConfig};

/// Tracing target used by this crate.
pub(crate) const TRACING_TARGET: &str = "nova.explorer.config";

/// File names probed (in order) by [`discover_config_path`].
pub const CONFIG_FILE_NAMES: [&str; 2] = ["nova-explorer.toml", ".nova-explorer.toml"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Workspace folder roots. Relative entries are resolved against the workspace root.
    ///
    /// When empty, the workspace root itself is the only folder.
    #[serde(default)]
    pub folders: Vec<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
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

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_string())
    }
}

impl ExplorerConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Absolute workspace folders for a workspace rooted at `workspace_root`.
    pub fn workspace_folders(&self, workspace_root: &Path) -> Vec<PathBuf> {
        if self.workspace.folders.is_empty() {
            return vec![workspace_root.to_path_buf()];
        }

        self.workspace
            .folders
            .iter()
            .map(|folder| {
                if folder.is_absolute() {
                    folder.clone()
                } else {
                    workspace_root.join(folder)
                }
            })
            .collect()
    }
}

/// Find the explorer config file for a workspace root, if present.
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
}

/// Load the explorer configuration for a workspace root.
///
/// If no config is present, returns [`ExplorerConfig::default`] and `None`.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(ExplorerConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        tracing::debug!(
            target: TRACING_TARGET,
            root = %workspace_root.display(),
            "no explorer config found; using defaults"
        );
        return Ok((ExplorerConfig::default(), None));
    };

    let config = ExplorerConfig::load_from_path(&path)?;
    tracing::debug!(
        target: TRACING_TARGET,
        path = %path.display(),
        folders = config.workspace.folders.len(),
        "loaded explorer config"
    );
    Ok((config, Some(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ExplorerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExplorerConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.stderr);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ExplorerConfig::from_toml_str("[workspace]\nroots = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn toml_errors_do_not_echo_source_snippets() {
        let err = ExplorerConfig::from_toml_str("[logging]\nlevel = 12 # secret-ish\n")
            .unwrap_err()
            .to_string();
        assert!(!err.contains("secret-ish"), "error echoed input: {err}");
    }

    #[test]
    fn workspace_folders_default_to_workspace_root() {
        let config = ExplorerConfig::default();
        let root = Path::new("/ws");
        assert_eq!(config.workspace_folders(root), vec![PathBuf::from("/ws")]);
    }

    #[test]
    #[cfg(not(windows))]
    fn relative_workspace_folders_resolve_against_root() {
        let config =
            ExplorerConfig::from_toml_str("[workspace]\nfolders = [\"app\", \"/opt/lib\"]\n")
                .unwrap();
        assert_eq!(
            config.workspace_folders(Path::new("/ws")),
            vec![PathBuf::from("/ws/app"), PathBuf::from("/opt/lib")]
        );
    }
}
