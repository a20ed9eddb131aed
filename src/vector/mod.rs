// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory vector index with parallel metadata
//!
//! - [`FlatL2Index`]: dense row storage with exact squared-L2 k-NN search
//! - [`VectorStore`]: index plus one metadata record per vector, append-only
//! - [`SharedVectorStore`]: lock-guarded handle for use across requests

pub mod errors;
pub mod index;
pub mod shared;
pub mod store;

pub use errors::VectorStoreError;
pub use index::{FlatL2Index, Neighbor};
pub use shared::SharedVectorStore;
pub use store::{SearchHit, VectorStore, DEFAULT_K};
