// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Knowledge HTTP handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::knowledge::{
    AddFactsRequest, AddFactsResponse, KnowledgeSearchRequest, KnowledgeSearchResponse,
};
use crate::api::{ApiError, AppState};

/// POST /knowledge/facts handler
pub async fn add_facts_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddFactsRequest>, JsonRejection>,
) -> Result<Json<AddFactsResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate(&state.limits)?;

    let (added, total) = state.knowledge.add_facts(request.texts).await?;

    Ok(Json(AddFactsResponse { added, total }))
}

/// POST /knowledge/search handler
pub async fn search_knowledge_handler(
    State(state): State<AppState>,
    payload: Result<Json<KnowledgeSearchRequest>, JsonRejection>,
) -> Result<Json<KnowledgeSearchResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate(&state.limits)?;

    let results = state.knowledge.search(&request.query, request.k).await?;

    info!(k = request.k, found = results.len(), "Knowledge search completed");

    Ok(Json(KnowledgeSearchResponse { results }))
}
