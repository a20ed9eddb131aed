// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classification provider: lazily loaded zero-shot model, result cache and
//! the safe-default fallback

use std::sync::Arc;
use tracing::{debug, warn};

use crate::classification::{
    Category, Classification, ClassificationCache, ClassificationError, ClassifierModelConfig,
    OnnxZeroShotModel, ZeroShotClassifier,
};
use crate::models::{LazyModel, ModelError};

/// Maps a classification attempt to its answer, using `("Other", 0.0)` on failure
pub fn or_fallback(result: Result<Classification, ClassificationError>) -> Classification {
    result.unwrap_or_else(|_| Classification::fallback())
}

#[derive(Debug)]
pub struct ClassificationProvider {
    model: LazyModel<dyn ZeroShotClassifier>,
    labels: Vec<String>,
    cache: ClassificationCache,
}

impl ClassificationProvider {
    pub fn new(model: LazyModel<dyn ZeroShotClassifier>, cache: ClassificationCache) -> Self {
        Self {
            model,
            labels: Category::labels(),
            cache,
        }
    }

    /// Provider backed by the ONNX NLI model in `config`, loaded on first use
    pub fn from_config(config: ClassifierModelConfig, cache_size: usize) -> Self {
        let name = config.name.clone();
        let model = LazyModel::new(name, move || {
            let config = config.clone();
            async move {
                let model = OnnxZeroShotModel::new(&config)
                    .await
                    .map_err(|e| ModelError::load_failed(&config.name, format!("{:#}", e)))?;
                Ok(Arc::new(model) as Arc<dyn ZeroShotClassifier>)
            }
        });
        Self::new(model, ClassificationCache::new(cache_size))
    }

    /// Provider around an already-constructed classifier, without a cache
    pub fn with_classifier(name: impl Into<String>, classifier: Arc<dyn ZeroShotClassifier>) -> Self {
        Self::new(
            LazyModel::loaded(name, classifier),
            ClassificationCache::disabled(),
        )
    }

    /// Classifies `text`, surfacing every failure
    pub async fn try_classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        if let Some(hit) = self.cache.get(text) {
            debug!(category = %hit.category, "Classification cache hit");
            return Ok(hit);
        }

        let model = self.model.get().await?;
        let ranking = model.rank(text, &self.labels).await?;
        let classification = Classification::from_ranking(&ranking)?;

        self.cache.insert(text, classification);
        Ok(classification)
    }

    /// Classifies `text`; never fails
    ///
    /// Any failure, including a model that will not load, becomes
    /// `("Other", 0.0)`. Fallbacks are not cached.
    pub async fn classify(&self, text: &str) -> Classification {
        let result = self.try_classify(text).await;
        if let Err(e) = &result {
            warn!(
                model = self.model.name(),
                error = %e,
                "⚠️ Classification failed, returning fallback"
            );
        }
        or_fallback(result)
    }

    /// Loads the model now instead of on the first request
    pub async fn preload(&self) -> Result<(), ModelError> {
        self.model.get().await.map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }
}
