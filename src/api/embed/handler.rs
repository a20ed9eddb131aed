// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embed HTTP handler

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::{ApiError, AppState};

/// POST /embed handler
///
/// Model failures are not hidden: a model that cannot be loaded answers 503,
/// any other inference failure answers 500.
pub async fn embed_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate(&state.limits)?;

    let embeddings = state.embeddings.embed(&request.texts).await?;

    info!(count = embeddings.len(), "Embedding request completed");

    Ok(Json(EmbedResponse { embeddings }))
}
