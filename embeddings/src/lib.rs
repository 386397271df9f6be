//! # Embeddings
//!
//! Embedding generation and similarity search for the ragline pipeline.
//!
//! - **Provider**: [`EmbeddingProvider`] turns text into dense vectors via a
//!   remote API; [`OpenAIProvider`] is the concrete client.
//! - **Similarity**: [`cosine_similarity`] and score ranking.
//! - **Store**: [`EmbeddingStore`] persists (chunk, vector) records as JSON
//!   and answers top-N queries with a brute-force scan.

pub mod error;
pub mod provider;
pub mod similarity;
pub mod store;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};
pub use similarity::{cosine_similarity, rank};
pub use store::{EmbeddingRecord, EmbeddingStore, SearchHit};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
