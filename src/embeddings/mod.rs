// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sentence embeddings
//!
//! [`EmbeddingProvider`] turns texts into fixed-width vectors, one per input
//! and in input order. The underlying [`SentenceEncoder`] is loaded at most
//! once per process; failures propagate to the caller as [`ModelError`].

pub mod onnx_model;
pub mod provider;

pub use onnx_model::OnnxEmbeddingModel;
pub use provider::EmbeddingProvider;

use async_trait::async_trait;
use std::env;

use crate::models::ModelError;

/// A loaded sentence-embedding model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentenceEncoder: Send + Sync {
    /// Width of every vector returned by [`encode`](Self::encode)
    fn dimension(&self) -> usize;

    /// One vector per text, in input order
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError>;
}

/// Configuration for loading the embedding model
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingModelConfig {
    /// Model name (e.g., "all-MiniLM-L6-v2")
    pub name: String,
    /// Path to ONNX model file
    pub model_path: String,
    /// Path to tokenizer JSON file
    pub tokenizer_path: String,
    /// Maximum tokens per text; longer texts are truncated
    pub max_length: usize,
    /// Texts per forward pass
    pub batch_size: usize,
    /// L2-normalize output vectors
    pub normalize: bool,
}

impl EmbeddingModelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("EMBEDDING_MODEL_NAME").unwrap_or(defaults.name),
            model_path: env::var("EMBEDDING_MODEL_PATH").unwrap_or(defaults.model_path),
            tokenizer_path: env::var("EMBEDDING_TOKENIZER_PATH")
                .unwrap_or(defaults.tokenizer_path),
            max_length: env::var("EMBEDDING_MAX_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_length),
            batch_size: env::var("EMBEDDING_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.batch_size),
            normalize: env::var("EMBEDDING_NORMALIZE")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.normalize),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Embedding model name cannot be empty".to_string());
        }
        if self.max_length == 0 {
            return Err("Embedding max_length must be greater than 0".to_string());
        }
        if self.batch_size == 0 {
            return Err("Embedding batch_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for EmbeddingModelConfig {
    fn default() -> Self {
        Self {
            name: "all-MiniLM-L6-v2".to_string(),
            model_path: "./models/all-MiniLM-L6-v2-onnx/model.onnx".to_string(),
            tokenizer_path: "./models/all-MiniLM-L6-v2-onnx/tokenizer.json".to_string(),
            max_length: 256,
            batch_size: 32,
            normalize: true,
        }
    }
}
