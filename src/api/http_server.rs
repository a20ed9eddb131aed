// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::classify::classify_handler;
use super::embed::embed_handler;
use super::handlers::{health_handler, not_found_handler, version_handler};
use super::knowledge::{add_facts_handler, search_knowledge_handler};
use crate::classification::ClassificationProvider;
use crate::embeddings::EmbeddingProvider;
use crate::rag::KnowledgeBase;

/// Per-request size limits for endpoints that accept texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_texts_per_request: usize,
    pub max_text_length: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_texts_per_request: 96,
            max_text_length: 8192,
        }
    }
}

/// Shared handles passed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub embeddings: Arc<EmbeddingProvider>,
    pub classifier: Arc<ClassificationProvider>,
    pub knowledge: KnowledgeBase,
    pub limits: RequestLimits,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Zero-shot classification
        .route("/classify", post(classify_handler))
        // Sentence embeddings
        .route("/embed", post(embed_handler))
        // Knowledge base
        .route("/knowledge/facts", post(add_facts_handler))
        .route("/knowledge/search", post(search_knowledge_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves `state` on `addr` until `shutdown` resolves
pub async fn start_server<F>(
    addr: SocketAddr,
    state: AppState,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("API server stopped");
    Ok(())
}
