//! # Pipeline
//!
//! Two-stage batch pipeline over an embedding store:
//!
//! 1. **Indexing** ([`Indexer`]): split a source text into fixed-length
//!    character chunks, embed each chunk, and persist the (chunk, vector)
//!    records as a JSON store.
//! 2. **Retrieval** ([`Retriever`]): for each target directory, embed its
//!    header file, rank the stored chunks by cosine similarity, and write
//!    the top-N chunk texts as a numbered snippet file into the directory.
//!
//! ```text
//! source text ──► FixedChunker ──► Indexer ──► EmbeddingStore (JSON)
//!                                                    │
//! target dir ──► header file ──► Retriever ◄─────────┘
//!                                    │
//!                                    ▼
//!                             snippet file (top-N chunks)
//! ```
//!
//! Both stages run strictly sequentially, one embedding request at a time,
//! and isolate failures at the unit of work: a failed chunk is skipped
//! during indexing, a failed target is skipped during retrieval.

pub mod chunker;
pub mod config;
pub mod error;
pub mod indexer;
pub mod retriever;

pub use chunker::FixedChunker;
pub use config::{IndexConfig, RetrieveConfig, read_api_key};
pub use error::{PipelineError, Result};
pub use indexer::{IndexSummary, Indexer};
pub use retriever::{RetrieveSummary, Retriever};

// Re-export from dependencies for convenience
pub use ragline_embeddings::{EmbeddingProvider, EmbeddingStore, OpenAIProvider};
