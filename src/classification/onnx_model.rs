// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX zero-shot classifier (NLI cross-encoder)
//!
//! Each candidate label becomes a hypothesis ("This example is Food.") paired
//! with the input text as premise. All pairs run as one padded batch; the
//! entailment logit of each pair is softmaxed across the candidates, so the
//! scores sum to 1 and the best label is the most entailed one.

use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::Ix2;
use ort::session::Session;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{EncodeInput, Tokenizer};
use tracing::{debug, info, warn};

use crate::classification::ranking::softmax;
use crate::classification::{ClassifierModelConfig, Ranking, ZeroShotClassifier};
use crate::models::onnx::{self, PaddedBatch};
use crate::models::ModelError;

#[derive(Clone)]
pub struct OnnxZeroShotModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    config: ClassifierModelConfig,
    entailment_index: usize,
    with_token_type_ids: bool,
}

impl std::fmt::Debug for OnnxZeroShotModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxZeroShotModel")
            .field("model_name", &self.config.name)
            .field("entailment_index", &self.entailment_index)
            .finish_non_exhaustive()
    }
}

impl OnnxZeroShotModel {
    /// Loads the NLI model, tokenizer and (optionally) its label mapping
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxZeroShotModel::new(&ClassifierModelConfig::default()).await?;
    /// let ranking = model.rank_labels("Uber to airport", &Category::labels())?;
    /// ```
    pub async fn new(config: &ClassifierModelConfig) -> Result<Self> {
        info!(
            model = %config.name,
            path = %config.model_path,
            "🚀 Initializing ONNX zero-shot classifier"
        );

        let session = onnx::load_session(Path::new(&config.model_path), 4)?;
        let tokenizer = onnx::load_tokenizer(Path::new(&config.tokenizer_path), config.max_length)?;
        let with_token_type_ids = onnx::declares_input(&session, "token_type_ids");

        let entailment_index = match config.config_path.as_deref().map(Path::new) {
            Some(path) if path.exists() => match entailment_index_from_config(path)? {
                Some(index) => index,
                None => {
                    warn!(
                        path = %path.display(),
                        fallback = config.entailment_index,
                        "No entailment label in id2label, using configured index"
                    );
                    config.entailment_index
                }
            },
            _ => config.entailment_index,
        };

        info!(
            model = %config.name,
            entailment_index,
            "✅ ONNX zero-shot classifier loaded successfully"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            config: config.clone(),
            entailment_index,
            with_token_type_ids,
        })
    }

    /// Ranks `labels` for `text` by entailment probability
    pub fn rank_labels(&self, text: &str, labels: &[String]) -> Result<Ranking, ModelError> {
        if labels.is_empty() {
            return Ok(Ranking::default());
        }

        let pairs: Vec<EncodeInput> = labels
            .iter()
            .map(|label| (text.to_string(), self.config.hypothesis(label)).into())
            .collect();
        let encodings = self
            .tokenizer
            .encode_batch(pairs, true)
            .map_err(|e| ModelError::InferenceFailed(format!("Tokenization failed: {}", e)))?;
        let batch = PaddedBatch::from_encodings(&encodings)?;

        let logits = onnx::run_first_output(&self.session, &batch, self.with_token_type_ids)?
            .into_dimensionality::<Ix2>()
            .map_err(|_| {
                ModelError::MalformedOutput("logits are not [pairs, classes]".to_string())
            })?;

        if logits.nrows() != labels.len() || self.entailment_index >= logits.ncols() {
            return Err(ModelError::MalformedOutput(format!(
                "logits shape {:?} does not fit {} labels with entailment column {}",
                logits.shape(),
                labels.len(),
                self.entailment_index
            )));
        }

        let entailment: Vec<f32> = logits.column(self.entailment_index).to_vec();
        let ranking = Ranking::from_scores(labels, &softmax(&entailment));

        debug!(
            model = %self.config.name,
            top = ?ranking.top(),
            "Ranked candidate labels"
        );

        Ok(ranking)
    }

    pub fn model_name(&self) -> &str {
        &self.config.name
    }
}

#[async_trait]
impl ZeroShotClassifier for OnnxZeroShotModel {
    async fn rank(&self, text: &str, candidate_labels: &[String]) -> Result<Ranking, ModelError> {
        self.rank_labels(text, candidate_labels)
    }
}

/// Finds the entailment class in a HuggingFace `config.json` `id2label` map
pub fn entailment_index_from_config(path: &Path) -> Result<Option<usize>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model config {}", path.display()))?;
    let config: serde_json::Value =
        serde_json::from_str(&raw).context("Failed to parse model config")?;

    let Some(id2label) = config.get("id2label").and_then(|v| v.as_object()) else {
        return Ok(None);
    };

    Ok(id2label.iter().find_map(|(id, label)| {
        let label = label.as_str()?.to_lowercase();
        if label.starts_with("entail") {
            id.parse::<usize>().ok()
        } else {
            None
        }
    }))
}
