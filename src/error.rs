use thiserror::Error;

pub type OptionsResult<T> = Result<T, OptionsError>;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid property key: {name:?}")]
    InvalidKey { name: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported defaults schema version: {0}")]
    UnsupportedSchemaVersion(u32),
}
