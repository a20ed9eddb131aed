// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Lazily-initialized, single-flight model slot
//!
//! A `LazyModel<T>` holds an `Arc<T>` that is produced by an async loader the
//! first time it is needed. Loading is guarded by a `tokio::sync::OnceCell`:
//! - concurrent first callers block on one in-flight load and all observe the
//!   same `Arc<T>`
//! - once loaded, `get()` reads the cell without taking any lock
//! - a failed load leaves the slot empty so the next caller retries

use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{error, info};

use super::ModelError;

/// Boxed future returned by a model loader
pub type ModelFuture<T> = BoxFuture<'static, Result<Arc<T>, ModelError>>;

type Loader<T> = Box<dyn Fn() -> ModelFuture<T> + Send + Sync>;

pub struct LazyModel<T: ?Sized + Send + Sync> {
    name: String,
    cell: OnceCell<Arc<T>>,
    loader: Loader<T>,
}

impl<T: ?Sized + Send + Sync> std::fmt::Debug for LazyModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyModel")
            .field("name", &self.name)
            .field("loaded", &self.cell.initialized())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized + Send + Sync + 'static> LazyModel<T> {
    /// Creates an empty slot; `loader` runs on the first call to [`get`](Self::get)
    ///
    /// # Example
    /// ```ignore
    /// let model = LazyModel::new("all-MiniLM-L6-v2", move || {
    ///     let config = config.clone();
    ///     async move { load_encoder(config).await }
    /// });
    /// ```
    pub fn new<F, Fut>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<T>, ModelError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            cell: OnceCell::new(),
            loader: Box::new(move || loader().boxed()),
        }
    }

    /// Creates a slot that already holds `model`
    pub fn loaded(name: impl Into<String>, model: Arc<T>) -> Self {
        let for_loader = model.clone();
        Self {
            name: name.into(),
            cell: OnceCell::new_with(Some(model)),
            loader: Box::new(move || {
                let model = for_loader.clone();
                async move { Ok(model) }.boxed()
            }),
        }
    }

    /// Returns the loaded model, loading it first if needed
    pub async fn get(&self) -> Result<Arc<T>, ModelError> {
        if let Some(model) = self.cell.get() {
            return Ok(model.clone());
        }

        let model = self
            .cell
            .get_or_try_init(|| async {
                info!(model = %self.name, "Loading model (first request)...");
                let started = Instant::now();
                match (self.loader)().await {
                    Ok(model) => {
                        info!(
                            model = %self.name,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "✅ Model loaded and ready"
                        );
                        Ok(model)
                    }
                    Err(e) => {
                        error!(model = %self.name, error = %e, "❌ Model load failed");
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(model.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
