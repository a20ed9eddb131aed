// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the knowledge base
//!
//! Embedding failures and vector store rejections are kept apart so the API
//! layer can tell "model unavailable" from "bad request".

use thiserror::Error;

use crate::models::ModelError;
use crate::vector::VectorStoreError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RagError {
    /// The embedding model failed to load or run
    #[error("Embedding failed: {0}")]
    Embedding(#[from] ModelError),

    /// The vector store rejected the operation
    #[error("Vector store error: {0}")]
    Store(#[from] VectorStoreError),
}

impl RagError {
    /// Stable error code, logged alongside the message
    pub fn error_code(&self) -> &'static str {
        match self {
            RagError::Embedding(ModelError::LoadFailed { .. }) => "MODEL_UNAVAILABLE",
            RagError::Embedding(_) => "EMBEDDING_FAILED",
            RagError::Store(VectorStoreError::InvalidK) => "INVALID_K",
            RagError::Store(VectorStoreError::DimensionMismatch { .. }) => "DIMENSION_MISMATCH",
            RagError::Store(_) => "STORE_REJECTED",
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, RagError::Embedding(e) if e.is_unavailable())
    }
}
