//! CSS custom properties and `@keyframes` rules generated from a token tree.
//!
//! The same text is written to the CSS and Sass artifacts.

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{ensure_dir, stage_artifact, OutputLayout, StorageError};
use crate::tokens::{is_keyframes_token, MetaTokenGroup, MetaTokens, MOTION_GROUP};

const PROPERTY_PREFIX: &str = "p-";
const COLOR_SCHEME: &str = "light";

pub type StyleSheetResult<T> = std::result::Result<T, StyleSheetError>;

#[derive(Debug, Error)]
pub enum StyleSheetError {
    #[error("token source is missing required group `{group}`")]
    MissingRequiredGroup { group: &'static str },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Custom properties for every group, in group-then-token order.
///
/// These values don't vary by color scheme.
pub fn static_custom_properties(meta_tokens: &MetaTokens) -> String {
    meta_tokens.values().map(custom_properties).collect()
}

pub fn custom_properties(group: &MetaTokenGroup) -> String {
    let mut css = String::new();
    for (token, entry) in group {
        // Keyframe bodies are emitted as rules; the property only names them.
        let value = if is_keyframes_token(token) {
            format!("{PROPERTY_PREFIX}{token}")
        } else {
            entry.value.clone()
        };
        css.push_str(&format!("--{PROPERTY_PREFIX}{token}:{value};"));
    }
    css
}

pub fn keyframes(motion: &MetaTokenGroup) -> String {
    motion
        .iter()
        .filter(|(token, _)| is_keyframes_token(token))
        .map(|(token, entry)| format!("@keyframes {PROPERTY_PREFIX}{token}{}", entry.value))
        .collect()
}

pub fn build_stylesheet(meta_tokens: &MetaTokens) -> StyleSheetResult<String> {
    let motion = meta_tokens
        .get(MOTION_GROUP)
        .ok_or(StyleSheetError::MissingRequiredGroup {
            group: MOTION_GROUP,
        })?;

    Ok(format!(
        ":root{{color-scheme:{COLOR_SCHEME};{}}}{}",
        static_custom_properties(meta_tokens),
        keyframes(motion)
    ))
}

/// Writes the stylesheet to the CSS and Sass locations, returning both paths.
pub fn to_style_sheet(
    meta_tokens: &MetaTokens,
    layout: &OutputLayout,
) -> StyleSheetResult<[PathBuf; 2]> {
    let styles = build_stylesheet(meta_tokens)?;
    tracing::debug!(bytes = styles.len(), "built stylesheet");

    // Both files are staged before either is committed.
    ensure_dir(&layout.css_dir())?;
    ensure_dir(&layout.sass_dir())?;
    let css = stage_artifact(&layout.css_path(), &styles)?;
    let sass = stage_artifact(&layout.sass_path(), &styles)?;
    Ok([css.commit()?, sass.commit()?])
}
