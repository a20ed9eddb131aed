// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Service configuration
// Every field is read from the environment (after `.env` is loaded) and can
// be overridden by startup flags

use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::api::RequestLimits;
use crate::classification::ClassifierModelConfig;
use crate::embeddings::EmbeddingModelConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Interface to bind
    pub host: String,
    /// HTTP port
    pub port: u16,
    pub embedding: EmbeddingModelConfig,
    pub classifier: ClassifierModelConfig,
    /// Load both models at startup instead of on first use
    pub eager_load: bool,
    /// Cached classifications; 0 disables the cache
    pub classification_cache_size: usize,
    pub max_texts_per_request: usize,
    /// Bytes per text
    pub max_text_length: usize,
    /// Width of the knowledge base vectors; must match the embedding model
    pub knowledge_dimension: usize,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("API_HOST").unwrap_or(defaults.host),
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            embedding: EmbeddingModelConfig::from_env(),
            classifier: ClassifierModelConfig::from_env(),
            eager_load: env::var("EAGER_MODEL_LOADING")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.eager_load),
            classification_cache_size: env::var("CLASSIFICATION_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.classification_cache_size),
            max_texts_per_request: env::var("MAX_EMBED_TEXTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_texts_per_request),
            max_text_length: env::var("MAX_TEXT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_text_length),
            knowledge_dimension: env::var("KNOWLEDGE_DIMENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.knowledge_dimension),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("API port must be greater than 0".to_string());
        }
        if self.max_texts_per_request == 0 {
            return Err("MAX_EMBED_TEXTS must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("MAX_TEXT_LENGTH must be greater than 0".to_string());
        }
        if self.knowledge_dimension == 0 {
            return Err("KNOWLEDGE_DIMENSION must be greater than 0".to_string());
        }
        self.embedding.validate()?;
        self.classifier.validate()?;
        Ok(())
    }

    /// Listen address; `host` is an IPv4 or IPv6 literal
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .map_err(|e| format!("Invalid API_HOST {}: {}", self.host, e))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_limits(&self) -> RequestLimits {
        RequestLimits {
            max_texts_per_request: self.max_texts_per_request,
            max_text_length: self.max_text_length,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let limits = RequestLimits::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            embedding: EmbeddingModelConfig::default(),
            classifier: ClassifierModelConfig::default(),
            eager_load: false,
            classification_cache_size: 1000,
            max_texts_per_request: limits.max_texts_per_request,
            max_text_length: limits.max_text_length,
            knowledge_dimension: 384,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
