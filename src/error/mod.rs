use crate::config::ConfigError;
use crate::stylesheet::StyleSheetError;
use crate::tokens::TokenSourceError;
use crate::values::ValuesError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    TokenSource(#[from] TokenSourceError),
    #[error(transparent)]
    StyleSheet(#[from] StyleSheetError),
    #[error(transparent)]
    Values(#[from] ValuesError),
}
