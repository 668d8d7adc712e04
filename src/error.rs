//! Error types for the farming subgraph client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("subgraph returned errors: {0}")]
    Subgraph(String),

    #[error("no data in subgraph response")]
    MissingData,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
