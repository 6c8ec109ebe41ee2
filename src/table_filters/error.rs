use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid query string: {0}")]
    Query(#[from] serde_urlencoded::de::Error),

    #[error("Render error: {0}")]
    Render(#[from] formkit::Error),

    #[error("Invalid table config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
