use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Endpoint configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint returned HTTP status {0}")]
    Status(u16),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Endpoint rejected the request: {0}")]
    Rejected(String),
}
