// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for POST /embed endpoint

use crate::api::{ApiError, RequestLimits};
use serde::{Deserialize, Serialize};

/// Request body for POST /embed endpoint
///
/// # Example
/// ```json
/// { "texts": ["Starbucks latte", "Monthly rent"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Texts to embed; an empty list is allowed
    pub texts: Vec<String>,
}

impl EmbedRequest {
    /// Validates the embed request
    ///
    /// # Validation Rules
    /// 1. **texts**: At most `limits.max_texts_per_request` items
    /// 2. **text length**: Each text at most `limits.max_text_length` bytes
    pub fn validate(&self, limits: &RequestLimits) -> Result<(), ApiError> {
        validate_texts("texts", &self.texts, limits)
    }
}

/// Shared by every endpoint that accepts a batch of texts
pub(crate) fn validate_texts(
    field: &str,
    texts: &[String],
    limits: &RequestLimits,
) -> Result<(), ApiError> {
    if texts.len() > limits.max_texts_per_request {
        return Err(ApiError::validation(
            field,
            format!(
                "{} array cannot contain more than {} items (got {})",
                field,
                limits.max_texts_per_request,
                texts.len()
            ),
        ));
    }

    for (index, text) in texts.iter().enumerate() {
        validate_text(&format!("{}[{}]", field, index), text, limits)?;
    }

    Ok(())
}

pub(crate) fn validate_text(field: &str, text: &str, limits: &RequestLimits) -> Result<(), ApiError> {
    if text.len() > limits.max_text_length {
        return Err(ApiError::validation(
            field,
            format!(
                "text cannot exceed {} bytes (got {} bytes)",
                limits.max_text_length,
                text.len()
            ),
        ));
    }
    Ok(())
}
