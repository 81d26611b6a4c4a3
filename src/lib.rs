pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod stylesheet;
pub mod tokens;
pub mod values;

use std::path::PathBuf;

pub use config::BuildConfig;
pub use error::{AppError, AppResult};

use crate::storage::OutputLayout;

/// Artifacts written by one [`build`] call, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub artifacts: Vec<PathBuf>,
}

/// Loads the token source and runs each enabled stage.
///
/// The stylesheet stage runs first. A failure in the values stage leaves the
/// stylesheet artifacts in place.
pub fn build(config: &BuildConfig) -> AppResult<BuildReport> {
    let meta_tokens = tokens::load_meta_tokens(&config.token_source)?;
    let layout = OutputLayout::new(&config.root);
    let mut report = BuildReport::default();

    if config.stylesheet {
        report
            .artifacts
            .extend(stylesheet::to_style_sheet(&meta_tokens, &layout)?);
    }
    if config.values {
        report.artifacts.push(values::to_token_values(
            &meta_tokens,
            &layout,
            &config.source_module,
        )?);
    }

    Ok(report)
}

/// Entrypoint used by the `tokensmith` binary.
pub fn run() -> AppResult<()> {
    logging::init();
    let config = config::load_build_config()?;
    tracing::info!(
        root = %config.root.display(),
        source = %config.token_source.display(),
        "starting token build"
    );

    let report = build(&config)?;
    tracing::info!(artifacts = report.artifacts.len(), "token build complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const SOURCE: &str = r##"{
        "color": {
            "color-bg": { "value": "#f6f6f7", "description": "Page background" }
        },
        "motion": {
            "duration-100": { "value": "100ms" },
            "keyframes-fade-in": { "value": "{to{opacity:1}}" }
        }
    }"##;

    fn write_source(root: &Path, source: &str) -> BuildConfig {
        fs::write(root.join("tokens.json"), source).unwrap();
        BuildConfig::with_root(root)
    }

    #[test]
    fn build_writes_all_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let config = write_source(root.path(), SOURCE);

        let report = build(&config).unwrap();
        let layout = OutputLayout::new(root.path());
        assert_eq!(
            report.artifacts,
            vec![layout.css_path(), layout.sass_path(), layout.values_path()]
        );

        let css = fs::read_to_string(layout.css_path()).unwrap();
        assert_eq!(
            css,
            ":root{color-scheme:light;--p-color-bg:#f6f6f7;--p-duration-100:100ms;\
             --p-keyframes-fade-in:p-keyframes-fade-in;}@keyframes p-keyframes-fade-in{to{opacity:1}}"
        );
        assert_eq!(fs::read_to_string(layout.sass_path()).unwrap(), css);

        let module = fs::read_to_string(layout.values_path()).unwrap();
        assert!(module.starts_with("export * from '../src/index'\n"));
        assert!(module.contains(r##"export const color = {"color-bg":"#f6f6f7"} as const;"##));
        assert!(!module.contains("Page background"));
    }

    #[test]
    fn build_respects_disabled_stages() {
        let root = tempfile::tempdir().unwrap();
        let mut config = write_source(root.path(), SOURCE);
        config.stylesheet = false;

        let report = build(&config).unwrap();
        assert_eq!(report.artifacts, vec![root.path().join("build/index.ts")]);
        assert!(!root.path().join("dist").exists());
    }

    #[test]
    fn build_without_motion_fails_before_writing() {
        let root = tempfile::tempdir().unwrap();
        let config = write_source(root.path(), r##"{"color": {"color-bg": {"value": "#fff"}}}"##);

        let err = build(&config).unwrap_err();
        assert!(matches!(
            err,
            AppError::StyleSheet(stylesheet::StyleSheetError::MissingRequiredGroup { .. })
        ));
        assert!(!root.path().join("dist").exists());
        assert!(!root.path().join("build").exists());
    }

    #[test]
    fn invalid_group_name_keeps_stylesheet_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let config = write_source(
            root.path(),
            r#"{"font-size": {"font-size-100": {"value": "12px"}}, "motion": {}}"#,
        );

        let err = build(&config).unwrap_err();
        assert!(matches!(err, AppError::Values(_)));
        assert!(root.path().join("dist/css/styles.css").exists());
        assert!(!root.path().join("build").exists());
    }

    #[test]
    fn missing_token_source_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let err = build(&BuildConfig::with_root(root.path())).unwrap_err();
        assert!(matches!(err, AppError::TokenSource(_)));
    }
}
