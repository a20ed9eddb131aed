// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for KnowledgeBase: embedding provider and shared vector store together

use std::sync::Arc;
use vittmoney_nlp::embeddings::EmbeddingProvider;
use vittmoney_nlp::rag::{KnowledgeBase, RagError};
use vittmoney_nlp::vector::VectorStoreError;

use crate::common::{hash_embeddings, unloadable_embeddings, FailingEncoder, TEST_DIM};

#[cfg(test)]
mod knowledge_base_tests {
    use super::*;

    fn facts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_exact_fact_is_nearest() {
        let kb = KnowledgeBase::new(hash_embeddings(), TEST_DIM).unwrap();
        let all = facts(&[
            "Spotify is Entertainment",
            "Pharmacy is Health",
            "Lyft is Transport",
        ]);
        kb.add_facts(all.clone()).await.unwrap();

        for fact in &all {
            let hits = kb.search_with_distances(fact, 1).await.unwrap();
            assert_eq!(&hits[0].text, fact);
            assert_eq!(hits[0].distance, 0.0);
        }
    }

    #[tokio::test]
    async fn test_large_k_returns_all_facts() {
        let kb = KnowledgeBase::new(hash_embeddings(), TEST_DIM).unwrap();
        kb.add_facts(facts(&["a", "b", "c"])).await.unwrap();

        let hits = kb.search_with_distances("a", 50).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[tokio::test]
    async fn test_embedding_failure_leaves_store_unchanged() {
        let embeddings = Arc::new(EmbeddingProvider::with_encoder(
            "failing",
            Arc::new(FailingEncoder),
        ));
        let kb = KnowledgeBase::new(embeddings, TEST_DIM).unwrap();

        let err = kb.add_facts(facts(&["gym membership"])).await.unwrap_err();
        assert!(matches!(err, RagError::Embedding(_)));
        assert!(kb.is_empty().await);
    }

    #[tokio::test]
    async fn test_unloadable_model_is_retryable() {
        let kb = KnowledgeBase::new(unloadable_embeddings(), TEST_DIM).unwrap();

        let err = kb.search("anything", 3).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_zero_dimension_rejected() {
        let err = KnowledgeBase::new(hash_embeddings(), 0).unwrap_err();
        assert_eq!(err, RagError::Store(VectorStoreError::InvalidDimension(0)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_fact_batches() {
        let kb = KnowledgeBase::new(hash_embeddings(), TEST_DIM).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|w| {
                let kb = kb.clone();
                tokio::spawn(async move {
                    let batch: Vec<String> = (0..5).map(|i| format!("fact {}-{}", w, i)).collect();
                    kb.add_facts(batch).await.unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().0, 5);
        }

        assert_eq!(kb.len().await, 40);
        let guard = kb.store().read().await;
        assert_eq!(guard.metadata().len(), guard.index().len());
    }
}
