//! Context retrieval for target directories.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use ragline_embeddings::{EmbeddingProvider, EmbeddingRequest, EmbeddingStore, SearchHit};

use crate::config::RetrieveConfig;
use crate::error::{PipelineError, Result};

/// Counts reported by a retrieval run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrieveSummary {
    /// Targets for which a snippet file was written.
    pub written: usize,

    /// Targets skipped because their header file was missing.
    pub skipped: usize,

    /// Targets abandoned because embedding their header failed.
    pub failed: usize,
}

/// Assembles a per-target context file from the most similar stored chunks.
///
/// Each target directory is processed independently: a missing header or a
/// failed query embedding abandons that target only. A corrupt store or a
/// store/query model mismatch aborts the whole run before any target is
/// touched.
pub struct Retriever<P> {
    provider: P,
    config: RetrieveConfig,
}

impl<P: EmbeddingProvider> Retriever<P> {
    /// Create a retriever.
    pub fn new(provider: P, config: RetrieveConfig) -> Self {
        Self { provider, config }
    }

    /// Run retrieval for every target directory against the given store.
    pub async fn run(&self, store_path: &Path, targets: &[PathBuf]) -> Result<RetrieveSummary> {
        let store = EmbeddingStore::load(store_path).await?;

        if store.model != self.config.model {
            return Err(PipelineError::ModelMismatch {
                stored: store.model,
                requested: self.config.model.clone(),
            });
        }

        let mut summary = RetrieveSummary {
            written: 0,
            skipped: 0,
            failed: 0,
        };

        for target in targets {
            match self.process_target(&store, target).await {
                Ok(true) => summary.written += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    warn!("Skipping target {}: {e}", target.display());
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Process one target directory.
    ///
    /// Returns `Ok(false)` when the header file is absent (target skipped),
    /// `Ok(true)` when the snippet file was written.
    async fn process_target(&self, store: &EmbeddingStore, target: &Path) -> Result<bool> {
        let header_path = target.join(&self.config.header_filename);
        if !header_path.is_file() {
            warn!(
                "{} not found in {}",
                self.config.header_filename,
                target.display()
            );
            return Ok(false);
        }

        let header = tokio::fs::read_to_string(&header_path).await?;

        let request = EmbeddingRequest::new(header).with_model(&self.config.model);
        let response = self.provider.embed(request).await?;

        let hits = store.search(&response.embedding, self.config.top_n)?;
        let result = format_snippets(&hits);

        let output_path = target.join(&self.config.output_filename);
        tokio::fs::write(&output_path, result).await?;

        info!(
            "{} file created in {}",
            self.config.output_filename,
            target.display()
        );
        Ok(true)
    }
}

/// Format selected chunks as numbered snippet sections.
pub fn format_snippets(hits: &[SearchHit<'_>]) -> String {
    let mut result = String::new();
    for (i, hit) in hits.iter().enumerate() {
        result.push_str(&format!("# SNIPPET {} #\n{}\n\n", i + 1, hit.chunk));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_snippets() {
        let hits = [
            SearchHit {
                chunk: "first",
                score: 0.9,
            },
            SearchHit {
                chunk: "second",
                score: 0.5,
            },
        ];

        let result = format_snippets(&hits);
        assert_eq!(result, "# SNIPPET 1 #\nfirst\n\n# SNIPPET 2 #\nsecond\n\n");
    }

    #[test]
    fn test_format_snippets_empty() {
        assert_eq!(format_snippets(&[]), "");
    }
}
