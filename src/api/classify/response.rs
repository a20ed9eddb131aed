// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ClassifyResponse type for POST /classify endpoint

use serde::{Deserialize, Serialize};

use crate::classification::{Category, Classification};

/// Response body for POST /classify endpoint
///
/// # Example
/// ```json
/// { "category": "Transport", "confidence": 0.91 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub category: Category,
    pub confidence: f32,
}

impl From<Classification> for ClassifyResponse {
    fn from(result: Classification) -> Self {
        Self {
            category: result.category,
            confidence: result.confidence,
        }
    }
}
