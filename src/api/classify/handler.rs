// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /classify HTTP handler

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::classify::{ClassifyRequest, ClassifyResponse};
use crate::api::{ApiError, AppState};

/// POST /classify handler
///
/// Only a malformed body is an error here; the provider itself never fails.
pub async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Json(request) = payload?;

    let result = state.classifier.classify(&request.text).await;

    info!(
        category = %result.category,
        confidence = result.confidence,
        "Classification request completed"
    );

    Ok(Json(result.into()))
}
