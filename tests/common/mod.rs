// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Deterministic stand-ins for the ONNX models, shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vittmoney_nlp::api::{AppState, RequestLimits};
use vittmoney_nlp::classification::{
    Category, ClassificationCache, ClassificationProvider, Ranking, ZeroShotClassifier,
};
use vittmoney_nlp::embeddings::{EmbeddingProvider, SentenceEncoder};
use vittmoney_nlp::models::{LazyModel, ModelError};
use vittmoney_nlp::rag::KnowledgeBase;

pub const TEST_DIM: usize = 16;

/// Hashes each text into a fixed vector in [-1, 1]; same text, same vector
#[derive(Debug, Default)]
pub struct HashEncoder {
    dim: usize,
    pub calls: AtomicUsize,
}

impl HashEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        (0..self.dim)
            .map(|i| {
                let byte_value = hash[i % hash.len()].wrapping_add((i / hash.len()) as u8);
                (byte_value as f32 / 255.0) * 2.0 - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl SentenceEncoder for HashEncoder {
    fn dimension(&self) -> usize {
        self.dim
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}

/// Encoder whose every call fails
#[derive(Debug)]
pub struct FailingEncoder;

#[async_trait]
impl SentenceEncoder for FailingEncoder {
    fn dimension(&self) -> usize {
        TEST_DIM
    }

    async fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        Err(ModelError::InferenceFailed("onnx runtime crashed".to_string()))
    }
}

/// Picks a category from keywords in the text, `Other` otherwise
#[derive(Debug, Default)]
pub struct KeywordClassifier {
    pub calls: AtomicUsize,
}

impl KeywordClassifier {
    fn category_for(text: &str) -> Category {
        let lower = text.to_lowercase();
        let rules = [
            (Category::Transport, ["uber", "taxi", "train"]),
            (Category::Food, ["pizza", "coffee", "lunch"]),
            (Category::Bills, ["rent", "electricity", "internet"]),
        ];
        rules
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

#[async_trait]
impl ZeroShotClassifier for KeywordClassifier {
    async fn rank(&self, text: &str, candidate_labels: &[String]) -> Result<Ranking, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let winner = Self::category_for(text);
        let others = (candidate_labels.len().max(2) - 1) as f32;
        let scores: Vec<f32> = candidate_labels
            .iter()
            .map(|label| {
                if label == winner.as_str() {
                    0.76
                } else {
                    0.24 / others
                }
            })
            .collect();
        Ok(Ranking::from_scores(candidate_labels, &scores))
    }
}

/// Classifier whose every call fails
#[derive(Debug)]
pub struct FailingClassifier;

#[async_trait]
impl ZeroShotClassifier for FailingClassifier {
    async fn rank(&self, _text: &str, _labels: &[String]) -> Result<Ranking, ModelError> {
        Err(ModelError::InferenceFailed("tensor shape mismatch".to_string()))
    }
}

pub fn hash_embeddings() -> Arc<EmbeddingProvider> {
    Arc::new(EmbeddingProvider::with_encoder(
        "hash-encoder",
        Arc::new(HashEncoder::new(TEST_DIM)),
    ))
}

pub fn keyword_classifier() -> Arc<ClassificationProvider> {
    Arc::new(ClassificationProvider::with_classifier(
        "keyword-classifier",
        Arc::new(KeywordClassifier::default()),
    ))
}

/// Embedding provider whose model can never be loaded
pub fn unloadable_embeddings() -> Arc<EmbeddingProvider> {
    let model: LazyModel<dyn SentenceEncoder> = LazyModel::new("missing-encoder", || async {
        Err(ModelError::load_failed(
            "missing-encoder",
            "ONNX model file not found: ./models/missing/model.onnx",
        ))
    });
    Arc::new(EmbeddingProvider::new(model, 32))
}

/// Classification provider whose model can never be loaded
pub fn unloadable_classifier() -> Arc<ClassificationProvider> {
    let model: LazyModel<dyn ZeroShotClassifier> = LazyModel::new("missing-nli", || async {
        Err(ModelError::load_failed(
            "missing-nli",
            "ONNX model file not found: ./models/missing/model.onnx",
        ))
    });
    Arc::new(ClassificationProvider::new(model, ClassificationCache::new(8)))
}

pub fn state_with(
    embeddings: Arc<EmbeddingProvider>,
    classifier: Arc<ClassificationProvider>,
) -> AppState {
    let knowledge = KnowledgeBase::new(embeddings.clone(), TEST_DIM)
        .expect("test dimension is non-zero");
    AppState {
        embeddings,
        classifier,
        knowledge,
        limits: RequestLimits::default(),
    }
}

pub fn test_state() -> AppState {
    state_with(hash_embeddings(), keyword_classifier())
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
