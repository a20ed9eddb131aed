// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// In-memory knowledge base
// Facts are embedded on insert and kept as metadata beside their vectors;
// nothing survives a restart

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::embeddings::EmbeddingProvider;
use crate::rag::RagError;
use crate::vector::{SharedVectorStore, VectorStoreError};

/// Fact returned from a knowledge search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeHit {
    pub text: String,
    pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    embeddings: Arc<EmbeddingProvider>,
    store: SharedVectorStore<String>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for `dim`-dimensional embeddings
    ///
    /// # Arguments
    /// * `embeddings` - Provider used for both facts and queries
    /// * `dim` - Output width of that provider's model
    pub fn new(embeddings: Arc<EmbeddingProvider>, dim: usize) -> Result<Self, RagError> {
        Ok(Self {
            embeddings,
            store: SharedVectorStore::new(dim)?,
        })
    }

    /// Embeds `facts` and appends them in order
    ///
    /// # Returns
    /// * `(added, total)` - facts appended by this call and the store size after it
    pub async fn add_facts(&self, facts: Vec<String>) -> Result<(usize, usize), RagError> {
        if facts.is_empty() {
            return Ok((0, self.store.len().await));
        }

        let vectors = self.embeddings.embed(&facts).await?;
        let added = facts.len();
        let total = self.store.add(vectors, facts).await?;

        info!(added, total, "Added facts to knowledge base");
        Ok((added, total))
    }

    /// Returns the `k` facts nearest to `query`, closest first
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RagError> {
        Ok(self
            .search_with_distances(query, k)
            .await?
            .into_iter()
            .map(|hit| hit.text)
            .collect())
    }

    pub async fn search_with_distances(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<KnowledgeHit>, RagError> {
        // Reject before paying for an embedding
        if k == 0 {
            return Err(VectorStoreError::InvalidK.into());
        }

        let vector = self.embeddings.embed_one(query).await?;
        let hits = self.store.search_with_distances(&vector, k).await?;

        debug!(k, found = hits.len(), "Knowledge search complete");

        Ok(hits
            .into_iter()
            .map(|hit| KnowledgeHit {
                text: hit.metadata,
                distance: hit.distance,
            })
            .collect())
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }

    pub fn dim(&self) -> usize {
        self.store.dim()
    }

    pub fn store(&self) -> &SharedVectorStore<String> {
        &self.store
    }
}
