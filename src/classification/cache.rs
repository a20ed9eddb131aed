// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! LRU cache of successful classifications
//!
//! Keys are the SHA-256 of the trimmed, lower-cased text so "Uber " and
//! "uber" share an entry. Only real model answers are stored; fallbacks
//! never enter the cache.

use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::classification::Classification;

#[derive(Debug)]
pub struct ClassificationCache {
    entries: Option<Mutex<LruCache<String, Classification>>>,
}

impl ClassificationCache {
    /// A capacity of 0 disables caching
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn disabled() -> Self {
        Self { entries: None }
    }

    pub fn key(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.trim().to_lowercase().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, text: &str) -> Option<Classification> {
        let entries = self.entries.as_ref()?;
        let mut cache = entries.lock().ok()?;
        cache.get(&Self::key(text)).copied()
    }

    pub fn insert(&self, text: &str, classification: Classification) {
        if let Some(entries) = &self.entries {
            if let Ok(mut cache) = entries.lock() {
                cache.put(Self::key(text), classification);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .and_then(|entries| entries.lock().ok().map(|cache| cache.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            if let Ok(mut cache) = entries.lock() {
                cache.clear();
            }
        }
    }
}
