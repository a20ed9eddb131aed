// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Knowledge base: text facts embedded into a shared in-memory vector store

pub mod errors;
pub mod knowledge_base;

pub use errors::RagError;
pub use knowledge_base::{KnowledgeBase, KnowledgeHit};
