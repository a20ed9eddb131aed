// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running a
//! sentence-transformer model (all-MiniLM-L6-v2 by default).
//!
//! Features:
//! - ONNX model loading from disk (CPU execution provider)
//! - BERT tokenization with truncation to `max_length`
//! - Batch embedding generation, padded to the longest text in the batch
//! - Attention-masked mean pooling over token embeddings
//! - Optional L2 normalization (sentence-transformers applies it for MiniLM)
//! - Output dimension discovered from the model at load time

use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::{ArrayView1, ArrayView2, ArrayView3, Ix3};
use ort::session::Session;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embeddings::{EmbeddingModelConfig, SentenceEncoder};
use crate::models::onnx::{self, PaddedBatch};
use crate::models::ModelError;

/// ONNX-based sentence embedding model
///
/// # Model Details
/// - Input: text strings (truncated to `max_length` tokens)
/// - Output: `dimension`-wide f32 vectors (384 for all-MiniLM-L6-v2)
///
/// # Thread Safety
/// The session sits behind `Arc<Mutex<_>>` since `Session::run` needs
/// exclusive access; the tokenizer is shared read-only.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
    normalize: bool,
    with_token_type_ids: bool,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("normalize", &self.normalize)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Loads the model and tokenizer named in `config`
    ///
    /// Runs one validation inference to check the output is
    /// `[batch, seq_len, hidden]` and to record `hidden` as the dimension.
    ///
    /// # Errors
    /// Returns error if:
    /// - Model or tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - Model output is not rank 3
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxEmbeddingModel::new(&EmbeddingModelConfig::default()).await?;
    /// assert_eq!(model.dimension(), 384);
    /// ```
    pub async fn new(config: &EmbeddingModelConfig) -> Result<Self> {
        let model_path = Path::new(&config.model_path);
        let tokenizer_path = Path::new(&config.tokenizer_path);

        info!(
            model = %config.name,
            path = %model_path.display(),
            "🚀 Initializing ONNX embedding model"
        );

        let session = onnx::load_session(model_path, 4)?;
        let tokenizer = onnx::load_tokenizer(tokenizer_path, config.max_length)?;
        let with_token_type_ids = onnx::declares_input(&session, "token_type_ids");

        let mut model = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name: config.name.clone(),
            dimension: 0,
            normalize: config.normalize,
            with_token_type_ids,
        };

        let probe = model.forward(&["validation test".to_string()])?;
        model.dimension = probe
            .first()
            .map(|v| v.len())
            .filter(|&dim| dim > 0)
            .context("Model produced an empty embedding during validation")?;

        info!(
            model = %model.model_name,
            dimension = model.dimension,
            "✅ ONNX embedding model loaded successfully"
        );

        Ok(model)
    }

    /// Generates embeddings for multiple texts in one padded batch
    ///
    /// # Example
    /// ```ignore
    /// let texts = vec!["Hello".to_string(), "World".to_string()];
    /// let embeddings = model.embed_batch(&texts).await?;
    /// assert_eq!(embeddings.len(), 2);
    /// ```
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        let embeddings = self.forward(texts)?;

        for (i, emb) in embeddings.iter().enumerate() {
            if emb.len() != self.dimension {
                return Err(ModelError::MalformedOutput(format!(
                    "Unexpected embedding dimension at index {}: {} (expected {})",
                    i,
                    emb.len(),
                    self.dimension
                )));
            }
        }

        Ok(embeddings)
    }

    fn forward(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| ModelError::InferenceFailed(format!("Tokenization failed: {}", e)))?;
        let batch = PaddedBatch::from_encodings(&encodings)?;

        let output = onnx::run_first_output(&self.session, &batch, self.with_token_type_ids)?;
        let output = output.into_dimensionality::<Ix3>().map_err(|_| {
            ModelError::MalformedOutput("Model output is not [batch, seq_len, hidden_dim]".into())
        })?;

        debug!(batch = texts.len(), seq_len = batch.seq_len(), "Ran embedding batch");

        pool_batch(output.view(), &batch, self.normalize)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl SentenceEncoder for OnnxEmbeddingModel {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        self.embed_batch(texts).await
    }
}

/// Pools a `[batch, seq_len, hidden_dim]` output into one vector per item
///
/// The output must have exactly one row per batch item and one position per
/// padded token, otherwise it is `MalformedOutput`.
pub fn pool_batch(
    output: ArrayView3<'_, f32>,
    batch: &PaddedBatch,
    normalize: bool,
) -> Result<Vec<Vec<f32>>, ModelError> {
    let (rows, positions, _) = output.dim();
    if rows != batch.batch_size() || positions != batch.seq_len() {
        return Err(ModelError::MalformedOutput(format!(
            "Model output shape {:?} does not match input batch [{}, {}]",
            output.shape(),
            batch.batch_size(),
            batch.seq_len()
        )));
    }

    Ok(output
        .outer_iter()
        .enumerate()
        .map(|(i, hidden)| {
            let pooled = mean_pool(hidden, batch.mask(i));
            if normalize {
                l2_normalize(pooled)
            } else {
                pooled
            }
        })
        .collect())
}

/// Mean of token embeddings weighted by the attention mask
///
/// `hidden` is `[seq_len, hidden_dim]`; padding rows have mask 0.
pub fn mean_pool(hidden: ArrayView2<'_, f32>, mask: ArrayView1<'_, i64>) -> Vec<f32> {
    let mut pooled = vec![0.0f32; hidden.ncols()];
    let mut sum_mask = 0.0f32;

    for (row, &m) in hidden.outer_iter().zip(mask.iter()) {
        let weight = m as f32;
        sum_mask += weight;
        for (acc, value) in pooled.iter_mut().zip(row.iter()) {
            *acc += value * weight;
        }
    }

    for val in &mut pooled {
        *val /= sum_mask.max(1e-9); // Avoid division by zero
    }

    pooled
}

/// Scales a vector to unit length; zero vectors are returned unchanged
pub fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }
    vector
}
