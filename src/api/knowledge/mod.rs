// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Knowledge API Module
//!
//! POST /knowledge/facts appends facts to the in-memory knowledge base and
//! POST /knowledge/search returns the facts nearest to a query.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{add_facts_handler, search_knowledge_handler};
pub use request::{AddFactsRequest, KnowledgeSearchRequest};
pub use response::{AddFactsResponse, KnowledgeSearchResponse};
