//! Error types for the pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while indexing or retrieving.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Embedding error (API, store serialization, vector math).
    #[error("embedding error: {0}")]
    Embedding(#[from] ragline_embeddings::EmbeddingError),

    /// Configuration error: bad chunk length, missing credential or source
    /// file. Always raised before any API call.
    #[error("configuration error: {0}")]
    Config(String),

    /// The store was built with a different embedding model than the one
    /// configured for query embedding; similarity scores across models are
    /// meaningless.
    #[error("store was built with model {stored}, retrieval is configured for {requested}")]
    ModelMismatch { stored: String, requested: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
