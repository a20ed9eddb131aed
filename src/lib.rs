// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classification;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod models;
pub mod rag;
pub mod vector;
pub mod version;

pub use classification::{Category, Classification, ClassificationProvider};
pub use config::ServiceConfig;
pub use embeddings::EmbeddingProvider;
pub use models::{LazyModel, ModelError};
pub use rag::KnowledgeBase;
pub use vector::{SharedVectorStore, VectorStore, VectorStoreError};
