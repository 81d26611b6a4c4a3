use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::values::DEFAULT_SOURCE_MODULE;

const ROOT_ENV_VAR: &str = "TOKENSMITH_ROOT";
const CONFIG_FILE: &str = "tokensmith.json";
const DEFAULT_TOKEN_SOURCE: &str = "tokens.json";

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve current directory")]
    CurrentDir(#[source] io::Error),
    #[error("failed to read build config: {path}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("failed to parse build config")]
    ParseConfig(#[from] serde_json::Error),
}

/// Settings from `tokensmith.json`, all optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct FileConfig {
    token_source: PathBuf,
    source_module: String,
    stylesheet: bool,
    values: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            token_source: PathBuf::from(DEFAULT_TOKEN_SOURCE),
            source_module: DEFAULT_SOURCE_MODULE.to_string(),
            stylesheet: true,
            values: true,
        }
    }
}

/// Resolved settings for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub root: PathBuf,
    pub token_source: PathBuf,
    pub source_module: String,
    pub stylesheet: bool,
    pub values: bool,
}

impl BuildConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::from_file_config(root.into(), FileConfig::default())
    }

    fn from_file_config(root: PathBuf, file: FileConfig) -> Self {
        let token_source = root.join(file.token_source);
        Self {
            root,
            token_source,
            source_module: file.source_module,
            stylesheet: file.stylesheet,
            values: file.values,
        }
    }
}

pub fn load_build_config() -> ConfigResult<BuildConfig> {
    let root = match std::env::var_os(ROOT_ENV_VAR).map(PathBuf::from) {
        Some(root) if !root.as_os_str().is_empty() => root,
        _ => std::env::current_dir().map_err(ConfigError::CurrentDir)?,
    };
    load_build_config_with(&root)
}

pub fn load_build_config_with(root: &Path) -> ConfigResult<BuildConfig> {
    let path = root.join(CONFIG_FILE);
    let serialized = match fs::read_to_string(&path) {
        Ok(serialized) => serialized,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "build config not found; using defaults");
            return Ok(BuildConfig::with_root(root));
        }
        Err(source) => return Err(ConfigError::ReadConfig { path, source }),
    };
    let file: FileConfig = serde_json::from_str(&serialized)?;
    Ok(BuildConfig::from_file_config(root.to_path_buf(), file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let root = tempfile::tempdir().unwrap();
        let config = load_build_config_with(root.path()).unwrap();

        assert_eq!(config.root, root.path());
        assert_eq!(config.token_source, root.path().join("tokens.json"));
        assert_eq!(config.source_module, "../src/index");
        assert!(config.stylesheet);
        assert!(config.values);
    }

    #[test]
    fn config_file_overrides_selected_fields() {
        let root = tempfile::tempdir().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE),
            r#"{ "token_source": "src/meta.json", "values": false }"#,
        )
        .unwrap();

        let config = load_build_config_with(root.path()).unwrap();
        assert_eq!(config.token_source, root.path().join("src/meta.json"));
        assert_eq!(config.source_module, "../src/index");
        assert!(config.stylesheet);
        assert!(!config.values);
    }

    #[test]
    fn absolute_token_source_is_kept() {
        let root = tempfile::tempdir().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE),
            r#"{ "token_source": "/opt/tokens/meta.json", "source_module": "@acme/tokens" }"#,
        )
        .unwrap();

        let config = load_build_config_with(root.path()).unwrap();
        assert_eq!(config.token_source, PathBuf::from("/opt/tokens/meta.json"));
        assert_eq!(config.source_module, "@acme/tokens");
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("not-a-dir");
        fs::write(&root, "plain file").unwrap();

        match load_build_config_with(&root).unwrap_err() {
            ConfigError::ReadConfig { path, .. } => assert_eq!(path, root.join(CONFIG_FILE)),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_config_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join(CONFIG_FILE), "{ invalid ").unwrap();

        let err = load_build_config_with(root.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseConfig(_)));
    }
}
