// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Flat (brute-force) L2 index
//!
//! Rows live in one contiguous `Array2<f32>` of shape `[len, dim]`. Search is
//! exact: every row is scored by squared Euclidean distance to the query and
//! the `k` smallest are returned, ties resolved by insertion order.

use ndarray::{Array2, ArrayView1, Axis};

use super::VectorStoreError;

/// A row position paired with its squared L2 distance to a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dim: usize,
    rows: Array2<f32>,
}

impl FlatL2Index {
    pub fn new(dim: usize) -> Result<Self, VectorStoreError> {
        if dim == 0 {
            return Err(VectorStoreError::InvalidDimension(dim));
        }
        Ok(Self {
            dim,
            rows: Array2::zeros((0, dim)),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks one vector against the index dimension and for finite values
    pub fn validate(&self, position: usize, vector: &[f32]) -> Result<(), VectorStoreError> {
        if vector.len() != self.dim {
            return Err(VectorStoreError::DimensionMismatch {
                position,
                expected: self.dim,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(VectorStoreError::NonFiniteComponent { position });
        }
        Ok(())
    }

    /// Appends all vectors or none of them
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<(), VectorStoreError> {
        for (position, vector) in vectors.iter().enumerate() {
            self.validate(position, vector)?;
        }
        if vectors.is_empty() {
            return Ok(());
        }

        let flat: Vec<f32> = vectors.iter().flatten().copied().collect();
        let batch = Array2::from_shape_vec((vectors.len(), self.dim), flat).map_err(|_| {
            VectorStoreError::DimensionMismatch {
                position: 0,
                expected: self.dim,
                actual: vectors[0].len(),
            }
        })?;

        // Validated above, so the shapes always agree
        self.rows
            .append(Axis(0), batch.view())
            .map_err(|_| VectorStoreError::DimensionMismatch {
                position: 0,
                expected: self.dim,
                actual: batch.ncols(),
            })
    }

    /// Returns up to `k` rows closest to `query`, nearest first
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, VectorStoreError> {
        self.validate(0, query)?;
        if k == 0 {
            return Err(VectorStoreError::InvalidK);
        }
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let query = ArrayView1::from(query);
        let mut neighbors: Vec<Neighbor> = self
            .rows
            .outer_iter()
            .enumerate()
            .map(|(position, row)| {
                let diff = &row - &query;
                Neighbor {
                    position,
                    distance: diff.dot(&diff),
                }
            })
            .collect();

        // Stable sort: equal distances keep insertion order
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k);

        Ok(neighbors)
    }
}
