// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbeddingProvider tests with a deterministic encoder
//!
//! The hash encoder stands in for the ONNX model so determinism, order
//! preservation and error propagation can be checked without model files.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vittmoney_nlp::embeddings::{EmbeddingProvider, SentenceEncoder};
use vittmoney_nlp::models::{LazyModel, ModelError};

use crate::common::{unloadable_embeddings, FailingEncoder, HashEncoder, TEST_DIM};

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod provider_tests {
    use super::*;

    #[tokio::test]
    async fn test_same_text_same_vector() {
        let provider = EmbeddingProvider::with_encoder("hash", Arc::new(HashEncoder::new(TEST_DIM)));

        let first = provider.embed(&texts(&["Netflix subscription"])).await.unwrap();
        let second = provider.embed(&texts(&["Netflix subscription"])).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].len(), TEST_DIM);
    }

    #[tokio::test]
    async fn test_batch_matches_single_calls() {
        let provider = EmbeddingProvider::new(
            LazyModel::loaded(
                "hash",
                Arc::new(HashEncoder::new(TEST_DIM)) as Arc<dyn SentenceEncoder>,
            ),
            2,
        );
        let inputs = texts(&["pharmacy", "cinema", "groceries", "bus pass", "water bill"]);

        let batch = provider.embed(&inputs).await.unwrap();

        assert_eq!(batch.len(), inputs.len());
        for (i, text) in inputs.iter().enumerate() {
            let single = provider.embed_one(text).await.unwrap();
            assert_eq!(batch[i], single, "item {} differs from its single-call vector", i);
        }
    }

    #[tokio::test]
    async fn test_inference_error_propagates() {
        let provider = EmbeddingProvider::with_encoder("failing", Arc::new(FailingEncoder));

        let err = provider.embed(&texts(&["gym"])).await.unwrap_err();
        assert!(matches!(err, ModelError::InferenceFailed(_)));
    }

    #[tokio::test]
    async fn test_load_error_propagates_and_retries() {
        let provider = unloadable_embeddings();

        for _ in 0..2 {
            let err = provider.embed(&texts(&["gym"])).await.unwrap_err();
            assert!(err.is_unavailable());
        }
        assert!(!provider.is_loaded());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_load_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        let model: LazyModel<dyn SentenceEncoder> = LazyModel::new("slow-hash", move || {
            let counter = counter.clone();
            async move {
                tokio::time::sleep(std::time::Duration::from_millis(30)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(HashEncoder::new(TEST_DIM)) as Arc<dyn SentenceEncoder>)
            }
        });
        let provider = Arc::new(EmbeddingProvider::new(model, 8));

        let handles: Vec<_> = (0..12)
            .map(|i| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.embed(&[format!("text {}", i)]).await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().len(), 1);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(provider.is_loaded());
    }

    #[tokio::test]
    async fn test_preload_loads_model() {
        let model: LazyModel<dyn SentenceEncoder> = LazyModel::new("hash", || async {
            Ok(Arc::new(HashEncoder::new(TEST_DIM)) as Arc<dyn SentenceEncoder>)
        });
        let provider = EmbeddingProvider::new(model, 8);

        assert!(!provider.is_loaded());
        provider.preload().await.unwrap();
        assert!(provider.is_loaded());
        assert_eq!(provider.dimension().await.unwrap(), TEST_DIM);
    }
}
