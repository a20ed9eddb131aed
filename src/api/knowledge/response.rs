// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response types for the knowledge endpoints

use serde::{Deserialize, Serialize};

/// Response body for POST /knowledge/facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFactsResponse {
    /// Facts appended by this request
    pub added: usize,
    /// Facts in the knowledge base after this request
    pub total: usize,
}

/// Response body for POST /knowledge/search
///
/// # Example
/// ```json
/// { "results": ["Coffee shops are Food"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSearchResponse {
    /// Facts ordered closest first
    pub results: Vec<String>,
}
