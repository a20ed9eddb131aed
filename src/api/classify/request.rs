// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ClassifyRequest type for POST /classify endpoint

use serde::{Deserialize, Serialize};

/// Request body for POST /classify endpoint
///
/// # Example
/// ```json
/// { "text": "Uber ride to the airport" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}
