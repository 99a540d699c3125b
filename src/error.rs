#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The auction data provider answered with a non-success status.
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    #[error("Validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure inside the library itself, such as a panicked blocking task.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl AuctionError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AuctionError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuctionError>;
