// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod classify;
pub mod embed;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod knowledge;

pub use classify::{classify_handler, ClassifyRequest, ClassifyResponse};
pub use embed::{embed_handler, EmbedRequest, EmbedResponse};
pub use errors::{ApiError, ErrorResponse};
pub use handlers::{HealthResponse, ModelStatus};
pub use http_server::{create_app, start_server, AppState, RequestLimits};
pub use knowledge::{
    AddFactsRequest, AddFactsResponse, KnowledgeSearchRequest, KnowledgeSearchResponse,
};
