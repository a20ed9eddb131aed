// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request types for the knowledge endpoints

use serde::{Deserialize, Serialize};

use crate::api::embed::request::{validate_text, validate_texts};
use crate::api::{ApiError, RequestLimits};
use crate::vector::DEFAULT_K;

/// Request body for POST /knowledge/facts
///
/// # Example
/// ```json
/// { "texts": ["Coffee shops are Food", "Bus passes are Transport"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFactsRequest {
    pub texts: Vec<String>,
}

impl AddFactsRequest {
    pub fn validate(&self, limits: &RequestLimits) -> Result<(), ApiError> {
        validate_texts("texts", &self.texts, limits)
    }
}

/// Request body for POST /knowledge/search
///
/// # Example
/// ```json
/// { "query": "latte", "k": 3 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSearchRequest {
    pub query: String,
    /// Number of facts to return (default: 5)
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    DEFAULT_K
}

impl KnowledgeSearchRequest {
    pub fn validate(&self, limits: &RequestLimits) -> Result<(), ApiError> {
        validate_text("query", &self.query, limits)
    }
}
