// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX Runtime helpers shared by the embedding and zero-shot models
//!
//! - CPU session construction
//! - tokenizer loading with truncation and padding disabled (we pad per batch)
//! - padded `[batch, seq_len]` input tensors
//! - a single forward pass returning the first output as an owned array

use anyhow::{anyhow, Context, Result};
use ndarray::{Array2, ArrayD, ArrayView1};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Value;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Mutex;
use tokenizers::{Encoding, Tokenizer, TruncationParams};

/// Builds a CPU session for the model at `model_path`
pub fn load_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
    if !model_path.exists() {
        anyhow::bail!("ONNX model file not found: {}", model_path.display());
    }

    Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .context("Failed to set CPU execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(intra_threads)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path)
        .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))
}

/// Loads `tokenizer.json`, truncating inputs to `max_length` tokens
pub fn load_tokenizer(tokenizer_path: &Path, max_length: usize) -> Result<Tokenizer> {
    if !tokenizer_path.exists() {
        anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
    }

    let mut tokenizer = Tokenizer::from_file(tokenizer_path)
        .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
    tokenizer.with_padding(None);
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

    Ok(tokenizer)
}

/// Whether the graph declares an input called `name`
pub fn declares_input(session: &Session, name: &str) -> bool {
    session.inputs.iter().any(|input| input.name == name)
}

/// Token ids, attention mask and segment ids padded to the longest encoding
#[derive(Debug, Clone)]
pub struct PaddedBatch {
    pub input_ids: Array2<i64>,
    pub attention_mask: Array2<i64>,
    pub token_type_ids: Array2<i64>,
}

impl PaddedBatch {
    pub fn from_encodings(encodings: &[Encoding]) -> Result<Self> {
        let batch = encodings.len();
        let max_len = encodings
            .iter()
            .map(|enc| enc.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut input_ids = Vec::with_capacity(batch * max_len);
        let mut attention_mask = Vec::with_capacity(batch * max_len);
        let mut token_type_ids = Vec::with_capacity(batch * max_len);

        for encoding in encodings {
            let ids = encoding.get_ids();
            let padding = max_len - ids.len();

            input_ids.extend(ids.iter().map(|&id| id as i64));
            attention_mask.extend(encoding.get_attention_mask().iter().map(|&m| m as i64));
            token_type_ids.extend(encoding.get_type_ids().iter().map(|&t| t as i64));

            input_ids.extend(std::iter::repeat(0i64).take(padding));
            attention_mask.extend(std::iter::repeat(0i64).take(padding));
            token_type_ids.extend(std::iter::repeat(0i64).take(padding));
        }

        Ok(Self {
            input_ids: Array2::from_shape_vec((batch, max_len), input_ids)
                .context("Failed to create input_ids array")?,
            attention_mask: Array2::from_shape_vec((batch, max_len), attention_mask)
                .context("Failed to create attention_mask array")?,
            token_type_ids: Array2::from_shape_vec((batch, max_len), token_type_ids)
                .context("Failed to create token_type_ids array")?,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.input_ids.nrows()
    }

    pub fn seq_len(&self) -> usize {
        self.input_ids.ncols()
    }

    pub fn mask(&self, item: usize) -> ArrayView1<'_, i64> {
        self.attention_mask.row(item)
    }
}

/// Runs one forward pass and returns output 0 as an owned f32 array
///
/// Output names differ between exports, so the first output is used.
pub fn run_first_output(
    session: &Mutex<Session>,
    batch: &PaddedBatch,
    with_token_type_ids: bool,
) -> Result<ArrayD<f32>> {
    let mut inputs: Vec<(Cow<'_, str>, SessionInputValue<'_>)> = vec![
        (
            "input_ids".into(),
            Value::from_array(batch.input_ids.clone())?.into(),
        ),
        (
            "attention_mask".into(),
            Value::from_array(batch.attention_mask.clone())?.into(),
        ),
    ];
    if with_token_type_ids {
        inputs.push((
            "token_type_ids".into(),
            Value::from_array(batch.token_type_ids.clone())?.into(),
        ));
    }

    let mut session = session
        .lock()
        .map_err(|_| anyhow!("ONNX session lock poisoned"))?;
    let outputs = session.run(inputs)?;
    let output = outputs[0]
        .try_extract_array::<f32>()
        .context("Failed to extract output tensor")?;

    Ok(output.to_owned())
}
