use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaqRagError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Corpus is empty")]
    EmptyCorpus,

    #[error("No stored answer for question: {0}")]
    AnswerNotFound(String),

    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Store write failed: {0}")]
    StoreWriteError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Custom error: {0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, FaqRagError>;
