// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Append-only vector store with positional metadata
//!
//! The i-th metadata record always belongs to the i-th inserted vector.
//! `add` validates the whole batch before touching either side, so the
//! index row count and the metadata count never drift apart.

use super::{FlatL2Index, VectorStoreError};

/// Number of neighbours returned when the caller does not choose one
pub const DEFAULT_K: usize = 5;

/// Search result carrying the distance alongside the metadata
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<M> {
    pub position: usize,
    pub distance: f32,
    pub metadata: M,
}

#[derive(Debug, Clone)]
pub struct VectorStore<M> {
    index: FlatL2Index,
    metadata: Vec<M>,
}

impl<M: Clone> VectorStore<M> {
    /// Create an empty store for `dim`-dimensional vectors
    ///
    /// # Errors
    /// `InvalidDimension` if `dim` is 0
    pub fn new(dim: usize) -> Result<Self, VectorStoreError> {
        Ok(Self {
            index: FlatL2Index::new(dim)?,
            metadata: Vec::new(),
        })
    }

    /// Append vectors and their metadata in lock-step
    ///
    /// # Errors
    /// - `LengthMismatch` if the two sequences differ in length
    /// - `DimensionMismatch` if any vector's length is not `dim`
    /// - `NonFiniteComponent` if any vector holds NaN or Infinity
    pub fn add(&mut self, vectors: Vec<Vec<f32>>, metadata: Vec<M>) -> Result<(), VectorStoreError> {
        if vectors.len() != metadata.len() {
            return Err(VectorStoreError::LengthMismatch {
                vectors: vectors.len(),
                metadata: metadata.len(),
            });
        }

        self.index.add(&vectors)?;
        self.metadata.extend(metadata);
        debug_assert_eq!(self.index.len(), self.metadata.len());

        Ok(())
    }

    /// Metadata of the `k` nearest vectors to `query`, closest first
    ///
    /// Returns every record when `k` exceeds the store size and an empty
    /// vector when the store is empty.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<M>, VectorStoreError> {
        Ok(self
            .index
            .search(query, k)?
            .into_iter()
            .map(|n| self.metadata[n.position].clone())
            .collect())
    }

    /// Like [`search`](Self::search) but keeps positions and distances
    pub fn search_with_distances(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<SearchHit<M>>, VectorStoreError> {
        Ok(self
            .index
            .search(query, k)?
            .into_iter()
            .map(|n| SearchHit {
                position: n.position,
                distance: n.distance,
                metadata: self.metadata[n.position].clone(),
            })
            .collect())
    }

    pub fn dim(&self) -> usize {
        self.index.dim()
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }

    pub fn metadata(&self) -> &[M] {
        &self.metadata
    }
}
