// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for model loading and inference

use thiserror::Error;

/// Failure raised by a model while loading or running inference
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Model files missing, unreadable or rejected by ONNX Runtime
    #[error("Failed to load model {model}: {reason}")]
    LoadFailed { model: String, reason: String },

    /// Tokenization or runtime failure during a forward pass
    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    /// The model ran but produced output of an unexpected shape or size
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}

impl ModelError {
    pub fn load_failed(model: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ModelError::LoadFailed {
            model: model.into(),
            reason: err.to_string(),
        }
    }

    /// Whether retrying later could succeed without a code change
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ModelError::LoadFailed { .. })
    }
}

impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ModelError>() {
            Ok(model_error) => model_error,
            Err(err) => ModelError::InferenceFailed(format!("{:#}", err)),
        }
    }
}
