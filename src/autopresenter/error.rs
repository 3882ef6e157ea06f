use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoPresenterError {
    #[error("Undefined attribute: {0}")]
    UndefinedAttribute(String),

    #[error("Route key error: {0}")]
    RouteKey(String),

    #[error(transparent)]
    Model(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutoPresenterError>;
