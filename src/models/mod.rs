// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared model plumbing for the embedding and classification providers
//!
//! Both providers own their model through a [`LazyModel`] slot: the model is
//! loaded at most once per process and concurrent first callers wait on the
//! same load instead of starting their own.

pub mod errors;
pub mod lazy;
pub mod onnx;

pub use errors::ModelError;
pub use lazy::{LazyModel, ModelFuture};
