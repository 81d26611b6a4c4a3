use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{write_artifact_in, OutputLayout, StorageError};
use crate::tokens::{remove_metadata, MetaTokens, TokenGroup, Tokens};

/// Name of the export aggregating every group.
pub const ALL_TOKENS_EXPORT: &str = "tokens";

/// Module specifier re-exported when none is configured.
pub const DEFAULT_SOURCE_MODULE: &str = "../src/index";

// ECMAScript reserved words, strict-mode reservations and literal names.
const RESERVED_IDENTIFIERS: &[&str] = &[
    "arguments",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

pub type ValuesResult<T> = std::result::Result<T, ValuesError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierProblem {
    #[error("name is empty")]
    Empty,
    #[error("character {0:?} is not allowed")]
    InvalidCharacter(char),
    #[error("name is a reserved word")]
    Reserved,
    #[error("name collides with the `{}` export", ALL_TOKENS_EXPORT)]
    CollidesWithAggregate,
}

#[derive(Debug, Error)]
pub enum ValuesError {
    #[error("token group `{name}` cannot be exported: {reason}")]
    InvalidIdentifier {
        name: String,
        reason: IdentifierProblem,
    },
    #[error("failed to serialize token values")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub fn validate_export_identifier(name: &str) -> ValuesResult<()> {
    let invalid = |reason| ValuesError::InvalidIdentifier {
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid(IdentifierProblem::Empty));
    };
    if !is_identifier_start(first) {
        return Err(invalid(IdentifierProblem::InvalidCharacter(first)));
    }
    if let Some(ch) = chars.find(|ch| !is_identifier_part(*ch)) {
        return Err(invalid(IdentifierProblem::InvalidCharacter(ch)));
    }
    if RESERVED_IDENTIFIERS.contains(&name) {
        return Err(invalid(IdentifierProblem::Reserved));
    }
    if name == ALL_TOKENS_EXPORT {
        return Err(invalid(IdentifierProblem::CollidesWithAggregate));
    }
    Ok(())
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

/// Raw definitions and their resolved values, ready to be rendered as one module.
#[derive(Debug, Clone)]
pub struct TokenBundle<'a> {
    pub raw_definitions: RawDefinitions<'a>,
    pub per_group_values: Vec<(String, TokenGroup)>,
    pub all_values: Tokens,
}

/// The authored tree and the module it is re-exported from.
#[derive(Debug, Clone, Copy)]
pub struct RawDefinitions<'a> {
    pub source_module: &'a str,
    pub meta_tokens: &'a MetaTokens,
}

impl<'a> TokenBundle<'a> {
    pub fn new(meta_tokens: &'a MetaTokens, source_module: &'a str) -> ValuesResult<Self> {
        for group_name in meta_tokens.keys() {
            validate_export_identifier(group_name)?;
        }

        let per_group_values: Vec<(String, TokenGroup)> = meta_tokens
            .iter()
            .map(|(group_name, group)| (group_name.clone(), remove_metadata(group)))
            .collect();
        let all_values: Tokens = per_group_values.iter().cloned().collect();

        Ok(Self {
            raw_definitions: RawDefinitions {
                source_module,
                meta_tokens,
            },
            per_group_values,
            all_values,
        })
    }

    pub fn render_module(&self) -> ValuesResult<String> {
        let mut lines = Vec::with_capacity(self.per_group_values.len() + 2);
        lines.push(format!(
            "export * from '{}'",
            self.raw_definitions.source_module
        ));
        for (group_name, values) in &self.per_group_values {
            lines.push(const_export(group_name, values)?);
        }
        lines.push(const_export(ALL_TOKENS_EXPORT, &self.all_values)?);
        Ok(lines.join("\n"))
    }
}

fn const_export<T: serde::Serialize>(name: &str, value: &T) -> ValuesResult<String> {
    let literal = serde_json::to_string(value)?;
    Ok(format!("export const {name} = {literal} as const;"))
}

pub fn to_token_values(
    meta_tokens: &MetaTokens,
    layout: &OutputLayout,
    source_module: &str,
) -> ValuesResult<PathBuf> {
    let bundle = TokenBundle::new(meta_tokens, source_module)?;
    let module = bundle.render_module()?;
    tracing::debug!(
        groups = bundle.per_group_values.len(),
        bytes = module.len(),
        "rendered token values module"
    );

    let path = layout.values_path();
    write_artifact_in(&layout.values_dir(), &path, &module)?;
    Ok(path)
}
