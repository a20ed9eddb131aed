// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Zero-shot expense classification
//!
//! [`ClassificationProvider::classify`] always answers: any failure while
//! loading the model or interpreting its output becomes the safe default
//! `("Other", 0.0)`. The fallible path is [`ClassificationProvider::try_classify`].

pub mod cache;
pub mod labels;
pub mod onnx_model;
pub mod provider;
pub mod ranking;

pub use cache::ClassificationCache;
pub use labels::Category;
pub use onnx_model::OnnxZeroShotModel;
pub use provider::{or_fallback, ClassificationProvider};
pub use ranking::{LabelScore, Ranking};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::models::ModelError;

/// A loaded zero-shot classifier
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Scores `text` against every candidate label, best first
    async fn rank(&self, text: &str, candidate_labels: &[String]) -> Result<Ranking, ModelError>;
}

/// Category and confidence for one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: f32,
}

impl Classification {
    /// Safe default returned whenever classification fails
    pub fn fallback() -> Self {
        Self {
            category: Category::Other,
            confidence: 0.0,
        }
    }

    /// Takes the top-ranked label and its score
    pub fn from_ranking(ranking: &Ranking) -> Result<Self, ClassificationError> {
        let top = ranking.top().ok_or(ClassificationError::EmptyRanking)?;
        let category = top
            .label
            .parse::<Category>()
            .map_err(|_| ClassificationError::UnknownLabel(top.label.clone()))?;

        if !top.score.is_finite() || !(0.0..=1.0).contains(&top.score) {
            return Err(ClassificationError::ScoreOutOfRange(top.score));
        }

        Ok(Self {
            category,
            confidence: top.score,
        })
    }
}

/// Why a classification attempt failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Classifier returned no labels")]
    EmptyRanking,

    #[error("Classifier returned a label outside the category set: {0}")]
    UnknownLabel(String),

    #[error("Classifier returned a score outside [0, 1]: {0}")]
    ScoreOutOfRange(f32),
}

/// Configuration for loading the zero-shot (NLI) model
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierModelConfig {
    /// Model name (e.g., "distilbert-base-uncased-mnli")
    pub name: String,
    /// Path to ONNX model file
    pub model_path: String,
    /// Path to tokenizer JSON file
    pub tokenizer_path: String,
    /// Path to the HuggingFace `config.json` holding `id2label`
    pub config_path: Option<String>,
    /// Hypothesis with `{}` standing for the candidate label
    pub hypothesis_template: String,
    /// Entailment logit column when `config.json` is unavailable
    pub entailment_index: usize,
    /// Maximum tokens per premise/hypothesis pair
    pub max_length: usize,
}

impl ClassifierModelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("CLASSIFIER_MODEL_NAME").unwrap_or(defaults.name),
            model_path: env::var("CLASSIFIER_MODEL_PATH").unwrap_or(defaults.model_path),
            tokenizer_path: env::var("CLASSIFIER_TOKENIZER_PATH")
                .unwrap_or(defaults.tokenizer_path),
            config_path: env::var("CLASSIFIER_CONFIG_PATH")
                .ok()
                .or(defaults.config_path),
            hypothesis_template: env::var("CLASSIFIER_HYPOTHESIS_TEMPLATE")
                .unwrap_or(defaults.hypothesis_template),
            entailment_index: env::var("CLASSIFIER_ENTAILMENT_INDEX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.entailment_index),
            max_length: env::var("CLASSIFIER_MAX_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_length),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.hypothesis_template.contains("{}") {
            return Err("Hypothesis template must contain '{}' for the label".to_string());
        }
        if self.max_length == 0 {
            return Err("Classifier max_length must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Hypothesis sentence for one candidate label
    pub fn hypothesis(&self, label: &str) -> String {
        self.hypothesis_template.replacen("{}", label, 1)
    }
}

impl Default for ClassifierModelConfig {
    fn default() -> Self {
        Self {
            name: "distilbert-base-uncased-mnli".to_string(),
            model_path: "./models/distilbert-base-uncased-mnli-onnx/model.onnx".to_string(),
            tokenizer_path: "./models/distilbert-base-uncased-mnli-onnx/tokenizer.json"
                .to_string(),
            config_path: Some(
                "./models/distilbert-base-uncased-mnli-onnx/config.json".to_string(),
            ),
            hypothesis_template: "This example is {}.".to_string(),
            entailment_index: 0,
            max_length: 512,
        }
    }
}
