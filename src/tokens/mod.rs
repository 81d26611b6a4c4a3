use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type TokenSourceResult<T> = std::result::Result<T, TokenSourceError>;

/// Token name prefix marking a `@keyframes` body instead of a property value.
pub const KEYFRAMES_PREFIX: &str = "keyframes";

/// Group inspected for keyframe tokens.
pub const MOTION_GROUP: &str = "motion";

#[derive(Debug, Error)]
pub enum TokenSourceError {
    #[error("failed to read token source: {path}")]
    ReadSource { path: PathBuf, source: io::Error },
    #[error("failed to parse token source")]
    ParseSource(#[from] serde_json::Error),
}

/// A token as authored, value plus any descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTokenEntry {
    pub value: String,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RawTokenEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn resolve(&self) -> ResolvedValue {
        self.value.clone()
    }
}

pub type ResolvedValue = String;

pub type MetaTokenGroup = IndexMap<String, RawTokenEntry>;
pub type TokenGroup = IndexMap<String, ResolvedValue>;

pub type MetaTokens = IndexMap<String, MetaTokenGroup>;
pub type Tokens = IndexMap<String, TokenGroup>;

pub fn is_keyframes_token(name: &str) -> bool {
    name.starts_with(KEYFRAMES_PREFIX)
}

pub fn remove_metadata(group: &MetaTokenGroup) -> TokenGroup {
    group
        .iter()
        .map(|(name, entry)| (name.clone(), entry.resolve()))
        .collect()
}

pub fn remove_metadata_all(meta_tokens: &MetaTokens) -> Tokens {
    meta_tokens
        .iter()
        .map(|(group_name, group)| (group_name.clone(), remove_metadata(group)))
        .collect()
}

pub fn parse_meta_tokens(serialized: &str) -> TokenSourceResult<MetaTokens> {
    Ok(serde_json::from_str(serialized)?)
}

pub fn load_meta_tokens(path: &Path) -> TokenSourceResult<MetaTokens> {
    let serialized = fs::read_to_string(path).map_err(|source| TokenSourceError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let meta_tokens = parse_meta_tokens(&serialized)?;
    tracing::debug!(
        path = %path.display(),
        groups = meta_tokens.len(),
        tokens = meta_tokens.values().map(|group| group.len()).sum::<usize>(),
        "loaded token source"
    );
    Ok(meta_tokens)
}
