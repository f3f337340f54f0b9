use thiserror::Error;

/// Error type for loading the corpus and answering queries
#[derive(Error, Debug)]
pub enum EngineError {
    /// Startup data problems: missing columns, empty corpus, empty vocabulary.
    /// The engine never becomes ready when this is returned.
    #[error("Data error: {0}")]
    Data(String),

    /// Caller supplied an empty or otherwise unusable query argument
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (configuration or output) errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn data(msg: impl Into<String>) -> Self {
        EngineError::Data(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        EngineError::InvalidQuery(msg.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
