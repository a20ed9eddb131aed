// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared handle over a [`VectorStore`]
//!
//! `add` holds the write lock for the whole append and `search` holds the
//! read lock, so a search never sees the index and metadata out of step.

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::debug;

use super::{SearchHit, VectorStore, VectorStoreError};

#[derive(Debug)]
pub struct SharedVectorStore<M> {
    dim: usize,
    inner: Arc<RwLock<VectorStore<M>>>,
}

impl<M> Clone for SharedVectorStore<M> {
    fn clone(&self) -> Self {
        Self {
            dim: self.dim,
            inner: self.inner.clone(),
        }
    }
}

impl<M: Clone + Send + Sync> SharedVectorStore<M> {
    pub fn new(dim: usize) -> Result<Self, VectorStoreError> {
        Ok(Self::from_store(VectorStore::new(dim)?))
    }

    pub fn from_store(store: VectorStore<M>) -> Self {
        Self {
            dim: store.dim(),
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Appends a batch; returns the store size after the append
    pub async fn add(&self, vectors: Vec<Vec<f32>>, metadata: Vec<M>) -> Result<usize, VectorStoreError> {
        let batch = vectors.len();
        let mut store = self.inner.write().await;
        store.add(vectors, metadata)?;
        debug!(batch, total = store.len(), "Appended vectors to store");
        Ok(store.len())
    }

    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<M>, VectorStoreError> {
        self.inner.read().await.search(query, k)
    }

    pub async fn search_with_distances(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<SearchHit<M>>, VectorStoreError> {
        self.inner.read().await.search_with_distances(query, k)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Read access to the underlying store for consistent multi-field reads
    pub async fn read(&self) -> RwLockReadGuard<'_, VectorStore<M>> {
        self.inner.read().await
    }
}
