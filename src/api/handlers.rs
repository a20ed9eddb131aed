// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::extract::State;
use axum::http::Uri;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::version;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<ModelStatus>,
}

/// Which models are resident; neither is required for the service to be healthy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub embedding_loaded: bool,
    pub classifier_loaded: bool,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            models: None,
        }
    }
}

/// GET /health handler
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        models: Some(ModelStatus {
            embedding_loaded: state.embeddings.is_loaded(),
            classifier_loaded: state.classifier.is_loaded(),
        }),
        ..HealthResponse::healthy()
    })
}

/// GET /version handler
pub async fn version_handler() -> Json<serde_json::Value> {
    Json(version::get_version_info())
}

/// Fallback for unknown routes
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
