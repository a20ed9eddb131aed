// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding provider: lazily loaded encoder behind a chunked `embed` call

use std::sync::Arc;
use tracing::debug;

use crate::embeddings::{EmbeddingModelConfig, OnnxEmbeddingModel, SentenceEncoder};
use crate::models::{LazyModel, ModelError};

/// Process-wide entry point for text embeddings
///
/// Errors are never swallowed here: a load or inference failure reaches the
/// caller as a [`ModelError`].
#[derive(Debug)]
pub struct EmbeddingProvider {
    model: LazyModel<dyn SentenceEncoder>,
    batch_size: usize,
}

impl EmbeddingProvider {
    pub fn new(model: LazyModel<dyn SentenceEncoder>, batch_size: usize) -> Self {
        Self {
            model,
            batch_size: batch_size.max(1),
        }
    }

    /// Provider backed by the ONNX model in `config`, loaded on first use
    pub fn from_config(config: EmbeddingModelConfig) -> Self {
        let batch_size = config.batch_size;
        let name = config.name.clone();
        let model = LazyModel::new(name, move || {
            let config = config.clone();
            async move {
                let model = OnnxEmbeddingModel::new(&config)
                    .await
                    .map_err(|e| ModelError::load_failed(&config.name, format!("{:#}", e)))?;
                Ok(Arc::new(model) as Arc<dyn SentenceEncoder>)
            }
        });
        Self::new(model, batch_size)
    }

    /// Provider around an already-constructed encoder
    pub fn with_encoder(name: impl Into<String>, encoder: Arc<dyn SentenceEncoder>) -> Self {
        Self::new(LazyModel::loaded(name, encoder), usize::MAX)
    }

    /// Embeds `texts`, returning one vector per text in the same order
    ///
    /// An empty input returns an empty result without loading the model.
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = self.model.get().await?;
        let dimension = model.dimension();
        let mut embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let vectors = model.encode(chunk).await?;
            if vectors.len() != chunk.len() {
                return Err(ModelError::MalformedOutput(format!(
                    "expected {} embeddings, got {}",
                    chunk.len(),
                    vectors.len()
                )));
            }
            if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
                return Err(ModelError::MalformedOutput(format!(
                    "embedding has {} dimensions (expected {})",
                    bad.len(),
                    dimension
                )));
            }
            embeddings.extend(vectors);
        }

        debug!(
            model = self.model.name(),
            count = embeddings.len(),
            dimension,
            "Generated embeddings"
        );

        Ok(embeddings)
    }

    /// Embeds a single text
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        self.embed(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| ModelError::MalformedOutput("no embedding returned".to_string()))
    }

    /// Output width of the model (loads it if needed)
    pub async fn dimension(&self) -> Result<usize, ModelError> {
        Ok(self.model.get().await?.dimension())
    }

    /// Loads the model now instead of on the first request
    pub async fn preload(&self) -> Result<(), ModelError> {
        self.model.get().await.map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}
