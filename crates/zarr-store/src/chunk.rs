//! Chunk partitioning along the step dimension.

use crate::error::{Result, StoreError};

/// The logical chunk partition of the `step` dimension.
///
/// A partitioning directive only: it never alters data values. All chunks
/// have the configured length except a possibly shorter final chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    chunk_len: usize,
    lengths: Vec<usize>,
}

impl ChunkPlan {
    /// Partition `step_count` steps into chunks of at most `chunk_len`.
    pub fn along_step(chunk_len: usize, step_count: usize) -> Result<Self> {
        if chunk_len == 0 {
            return Err(StoreError::InvalidChunkPlan(
                "step chunk length must be > 0".to_string(),
            ));
        }

        let mut lengths = Vec::with_capacity(step_count.div_ceil(chunk_len));
        let mut remaining = step_count;
        while remaining > 0 {
            let take = remaining.min(chunk_len);
            lengths.push(take);
            remaining -= take;
        }

        Ok(Self { chunk_len, lengths })
    }

    /// The configured maximum chunk length.
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// The concrete chunk lengths, in order.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Number of chunks in the partition.
    pub fn num_chunks(&self) -> usize {
        self.lengths.len()
    }

    /// Total number of steps covered by the partition.
    pub fn total(&self) -> usize {
        self.lengths.iter().sum()
    }
}
