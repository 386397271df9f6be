//! Offline indexing of a source text into an embedding store.

use std::path::Path;

use tracing::{info, warn};

use ragline_embeddings::{EmbeddingProvider, EmbeddingRequest, EmbeddingStore};

use crate::chunker::FixedChunker;
use crate::config::IndexConfig;
use crate::error::{PipelineError, Result};

/// Counts reported by an indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSummary {
    /// Chunks produced from the source text.
    pub total_chunks: usize,

    /// Chunks successfully embedded and stored.
    pub embedded: usize,

    /// Chunks whose embedding request failed and were skipped.
    pub failed: usize,
}

/// Splits a source text into chunks, embeds each one, and persists the
/// resulting store.
///
/// Chunks are embedded strictly one at a time, in source order. A failed
/// embedding request drops that chunk and nothing else; the store is written
/// once, after the whole pass.
#[derive(Debug)]
pub struct Indexer<P> {
    provider: P,
    chunker: FixedChunker,
    config: IndexConfig,
}

impl<P: EmbeddingProvider> Indexer<P> {
    /// Create an indexer.
    ///
    /// Fails fast on an invalid chunk length, before any API call.
    pub fn new(provider: P, config: IndexConfig) -> Result<Self> {
        let chunker = FixedChunker::new(config.chunk_length)?;
        Ok(Self {
            provider,
            chunker,
            config,
        })
    }

    /// Index a source file and write the store to `store_path`.
    pub async fn index_file(&self, source: &Path, store_path: &Path) -> Result<IndexSummary> {
        let text = tokio::fs::read_to_string(source).await.map_err(|e| {
            PipelineError::Config(format!("source file {}: {e}", source.display()))
        })?;

        let (store, summary) = self.index_text(&text).await;
        store.save(store_path).await?;

        info!(
            "Indexed {} of {} chunks into {}",
            summary.embedded,
            summary.total_chunks,
            store_path.display()
        );
        Ok(summary)
    }

    /// Index a text in memory, returning the store and the run summary.
    pub async fn index_text(&self, text: &str) -> (EmbeddingStore, IndexSummary) {
        let chunks = self.chunker.chunk(text);
        let total_chunks = chunks.len();
        info!("Total chunks: {total_chunks}");

        if total_chunks > self.config.max_chunks {
            warn!(
                "Chunk cap reached: indexing the first {} of {total_chunks} chunks",
                self.config.max_chunks
            );
        }
        let submitted = total_chunks.min(self.config.max_chunks);

        let mut store = EmbeddingStore::new(&self.config.model);
        let mut failed = 0;

        for (i, chunk) in chunks.into_iter().take(submitted).enumerate() {
            info!("Processing chunk {}/{submitted}", i + 1);

            let request = EmbeddingRequest::new(&chunk).with_model(&self.config.model);
            match self.provider.embed(request).await {
                Ok(response) => store.push(chunk, response.embedding),
                Err(e) => {
                    warn!("Error processing chunk {}: {e}", i + 1);
                    failed += 1;
                }
            }
        }

        let summary = IndexSummary {
            total_chunks,
            embedded: store.len(),
            failed,
        };
        (store, summary)
    }
}
