// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedResponse type for POST /embed endpoint

use serde::{Deserialize, Serialize};

/// Response body for POST /embed endpoint
///
/// `embeddings[i]` belongs to `texts[i]` of the request.
///
/// # Example
/// ```json
/// { "embeddings": [[0.01, -0.12, ...], [0.07, 0.03, ...]] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<Vec<f32>>,
}
