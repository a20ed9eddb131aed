// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the expense NLP service

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-13";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "zero-shot-classification",
    "classification-cache",
    "sentence-embeddings",
    "lazy-model-loading",
    "knowledge-base",
    "flat-l2-search",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("VittMoney NLP {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Version info served by GET /version
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
