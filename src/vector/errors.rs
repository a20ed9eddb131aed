// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the vector store

use thiserror::Error;

/// Errors returned by [`VectorStore`](super::VectorStore) operations
///
/// Every rejected call leaves the store exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorStoreError {
    /// Store constructed with a zero dimension
    #[error("Invalid dimension: {0} (must be greater than 0)")]
    InvalidDimension(usize),

    /// A vector or query length disagrees with the store dimension
    #[error("Dimension mismatch at position {position}: expected {expected}, got {actual}")]
    DimensionMismatch {
        position: usize,
        expected: usize,
        actual: usize,
    },

    /// `vectors` and `metadata` passed to `add` differ in length
    #[error("Length mismatch: {vectors} vectors but {metadata} metadata records")]
    LengthMismatch { vectors: usize, metadata: usize },

    /// A component is NaN or infinite
    #[error("Invalid vector values at position {position}: contains NaN or Infinity")]
    NonFiniteComponent { position: usize },

    /// Search requested zero neighbours
    #[error("Invalid k: must be greater than 0")]
    InvalidK,
}
