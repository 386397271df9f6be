//! Configuration for the indexing and retrieval stages.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-ada-002";

/// Default chunk length in characters.
pub const DEFAULT_CHUNK_LENGTH: usize = 150;

/// Default cap on the number of chunks submitted to the API.
pub const DEFAULT_MAX_CHUNKS: usize = 10_000;

/// Default number of snippets retrieved per target.
pub const DEFAULT_TOP_N: usize = 6;

/// Default header filename looked up inside each target directory.
pub const DEFAULT_HEADER_FILENAME: &str = "sketch.ts";

/// Default output filename written inside each target directory.
pub const DEFAULT_OUTPUT_FILENAME: &str = "RAG.txt";

/// Configuration for the indexing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Embedding model identifier.
    pub model: String,

    /// Chunk length in characters.
    pub chunk_length: usize,

    /// Maximum number of chunks submitted to the API; chunks past the cap
    /// are not indexed (documented truncation, logged once).
    pub max_chunks: usize,
}

impl IndexConfig {
    /// Set the embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the chunk length.
    pub fn with_chunk_length(mut self, chunk_length: usize) -> Self {
        self.chunk_length = chunk_length;
        self
    }

    /// Set the chunk cap.
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            chunk_length: DEFAULT_CHUNK_LENGTH,
            max_chunks: DEFAULT_MAX_CHUNKS,
        }
    }
}

/// Configuration for the retrieval stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieveConfig {
    /// Embedding model identifier; must match the model the store was built
    /// with.
    pub model: String,

    /// Number of snippets to select per target.
    pub top_n: usize,

    /// Filename of the query header inside each target directory.
    pub header_filename: String,

    /// Filename of the snippet file written inside each target directory.
    pub output_filename: String,
}

impl RetrieveConfig {
    /// Set the embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the number of snippets per target.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the header filename.
    pub fn with_header_filename(mut self, name: impl Into<String>) -> Self {
        self.header_filename = name.into();
        self
    }

    /// Set the output filename.
    pub fn with_output_filename(mut self, name: impl Into<String>) -> Self {
        self.output_filename = name.into();
        self
    }
}

impl Default for RetrieveConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            top_n: DEFAULT_TOP_N,
            header_filename: DEFAULT_HEADER_FILENAME.to_string(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}

/// Read the API credential from a plain-text file.
///
/// The content is trimmed; a missing file or an empty credential is a fatal
/// configuration error, raised before any API call.
pub fn read_api_key(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| PipelineError::Config(format!("credential file {}: {e}", path.display())))?;

    let key = content.trim();
    if key.is_empty() {
        return Err(PipelineError::Config(format!(
            "credential file {} is empty",
            path.display()
        )));
    }

    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_index_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.model, "text-embedding-ada-002");
        assert_eq!(config.chunk_length, 150);
        assert_eq!(config.max_chunks, 10_000);
    }

    #[test]
    fn test_retrieve_defaults() {
        let config = RetrieveConfig::default();
        assert_eq!(config.top_n, 6);
        assert_eq!(config.header_filename, "sketch.ts");
        assert_eq!(config.output_filename, "RAG.txt");
    }

    #[test]
    fn test_read_api_key_trims() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "sk-secret\n").unwrap();

        assert_eq!(read_api_key(&path).unwrap(), "sk-secret");
    }

    #[test]
    fn test_read_api_key_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_api_key(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_read_api_key_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "  \n").unwrap();

        let err = read_api_key(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
