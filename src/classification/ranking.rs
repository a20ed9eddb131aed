// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Typed classifier output: candidate labels ranked by score

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Label–score pairs, highest score first
///
/// Equal scores keep the order the candidates were given in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ranking {
    entries: Vec<LabelScore>,
}

impl Ranking {
    pub fn new(mut entries: Vec<LabelScore>) -> Self {
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries }
    }

    /// Pairs `labels[i]` with `scores[i]`
    pub fn from_scores(labels: &[String], scores: &[f32]) -> Self {
        Self::new(
            labels
                .iter()
                .zip(scores.iter())
                .map(|(label, &score)| LabelScore {
                    label: label.clone(),
                    score,
                })
                .collect(),
        )
    }

    pub fn top(&self) -> Option<&LabelScore> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[LabelScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Numerically stable softmax
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
