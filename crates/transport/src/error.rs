use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request body: {0}")]
    Body(String),

    #[error("metadata envelope error: {0}")]
    Envelope(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
