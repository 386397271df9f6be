//! Fixed-length document chunking.
//!
//! Chunks are contiguous runs of characters cut at fixed offsets, with no
//! word or sentence boundary awareness. The chunks partition the input with
//! no gaps and no overlap, so concatenating them in order reproduces the
//! source text exactly.

use crate::error::{PipelineError, Result};

/// Splits text into fixed-length, non-overlapping character chunks.
///
/// Every chunk except possibly the last has exactly `chunk_length`
/// characters. Lengths are counted in Unicode scalar values, never raw
/// bytes, so a chunk boundary can never split a multi-byte character.
#[derive(Debug, Clone)]
pub struct FixedChunker {
    chunk_length: usize,
}

impl FixedChunker {
    /// Create a chunker with the given chunk length.
    ///
    /// A zero chunk length is rejected here, before any text is touched.
    pub fn new(chunk_length: usize) -> Result<Self> {
        if chunk_length == 0 {
            return Err(PipelineError::Config(
                "chunk length must be a positive integer".to_string(),
            ));
        }
        Ok(Self { chunk_length })
    }

    /// The configured chunk length in characters.
    pub fn chunk_length(&self) -> usize {
        self.chunk_length
    }

    /// Split `text` into chunks. Empty text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.chunk_length)
            .map(|c| c.iter().collect())
            .collect()
    }
}
