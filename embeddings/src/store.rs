//! Persistent embedding store.
//!
//! The store is an ordered sequence of (chunk text, vector) records plus the
//! identifier of the model that produced the vectors. It is serialized as a
//! single JSON document, rewritten in full on every indexing run and loaded
//! in full on every retrieval run. Lookups are a brute-force cosine scan,
//! which is fine at the corpus sizes this pipeline targets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::Embedding;
use crate::error::Result;
use crate::similarity::rank;

/// A single (chunk text, embedding) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// The chunk text that was embedded.
    pub chunk: String,

    /// The embedding vector.
    pub embedding: Embedding,
}

/// An ordered collection of embedding records plus the model that made them.
///
/// Record order is the order of insertion (source-text order for the
/// indexer). Ranking ignores it, but it makes indexing output reproducible
/// and gives ties a deterministic break.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingStore {
    /// Model identifier the records were embedded with.
    pub model: String,

    /// Stored records, in insertion order.
    pub records: Vec<EmbeddingRecord>,
}

/// A single search result borrowed from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    /// The matched chunk text.
    pub chunk: &'a str,

    /// Cosine similarity to the query.
    pub score: f32,
}

impl EmbeddingStore {
    /// Create an empty store for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            records: Vec::new(),
        }
    }

    /// Append a record.
    pub fn push(&mut self, chunk: impl Into<String>, embedding: Embedding) {
        self.records.push(EmbeddingRecord {
            chunk: chunk.into(),
            embedding,
        });
    }

    /// Get the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the `top_n` records most similar to the query vector.
    ///
    /// Results are ranked by descending cosine similarity; ties keep store
    /// order. An empty store yields an empty result, and a store with fewer
    /// than `top_n` records yields all of them.
    pub fn search(&self, query: &[f32], top_n: usize) -> Result<Vec<SearchHit<'_>>> {
        let embeddings: Vec<&[f32]> = self.records.iter().map(|r| r.embedding.as_slice()).collect();
        let ranked = rank(query, &embeddings)?;

        Ok(ranked
            .into_iter()
            .take(top_n)
            .map(|(i, score)| SearchHit {
                chunk: &self.records[i].chunk,
                score,
            })
            .collect())
    }

    /// Save the store to a JSON file, replacing any previous content.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write atomically using a temp file
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, path).await?;

        debug!("Saved {} records to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Load a store from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let store: Self = serde_json::from_str(&content)?;

        info!(
            "Loaded {} records ({}) from {}",
            store.records.len(),
            store.model,
            path.display()
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_store() -> EmbeddingStore {
        let mut store = EmbeddingStore::new("test-model");
        store.push("cat food", vec![1.0, 0.0, 0.0]);
        store.push("dog leash", vec![0.0, 1.0, 0.0]);
        store.push("pet toys", vec![0.0, 0.0, 1.0]);
        store
    }

    #[test]
    fn test_search_nearest_first() {
        let store = sample_store();
        let query = vec![0.1, 0.9, 0.1];

        let hits = store.search(&query, 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk, "dog leash");
    }

    #[test]
    fn test_search_empty_store() {
        let store = EmbeddingStore::new("test-model");
        let hits = store.search(&[1.0, 0.0, 0.0], 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_fewer_records_than_n() {
        let store = sample_store();
        let hits = store.search(&[1.0, 1.0, 1.0], 10).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_search_scores_descending() {
        let store = sample_store();
        let hits = store.search(&[0.8, 0.5, 0.1], 3).unwrap();
        assert!(hits[0].score >= hits[1].score);
        assert!(hits[1].score >= hits[2].score);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("embeddings.json");

        let store = sample_store();
        store.save(&path).await.unwrap();

        let loaded = EmbeddingStore::load(&path).await.unwrap();
        assert_eq!(loaded.model, "test-model");
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.records[1].chunk, "dog leash");
    }

    #[tokio::test]
    async fn test_load_corrupt_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("embeddings.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let err = EmbeddingStore::load(&path).await.unwrap_err();
        assert!(matches!(err, crate::EmbeddingError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("embeddings.json");

        sample_store().save(&path).await.unwrap();

        let mut smaller = EmbeddingStore::new("test-model");
        smaller.push("only one", vec![1.0]);
        smaller.save(&path).await.unwrap();

        let loaded = EmbeddingStore::load(&path).await.unwrap();
        assert_eq!(loaded.len(), 1);
    }
}
