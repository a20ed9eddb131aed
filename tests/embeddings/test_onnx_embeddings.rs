// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! OnnxEmbeddingModel tests against the real all-MiniLM-L6-v2 export
//!
//! Ignored by default; run with `--ignored` after downloading the model into
//! ./models/all-MiniLM-L6-v2-onnx/.

use vittmoney_nlp::embeddings::{EmbeddingModelConfig, OnnxEmbeddingModel};

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (na * nb)
}

#[cfg(test)]
mod onnx_embedding_tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_model_discovers_384_dimensions() {
        let model = OnnxEmbeddingModel::new(&EmbeddingModelConfig::default())
            .await
            .expect("Failed to load model");

        assert_eq!(model.dimension(), 384);
        assert_eq!(model.model_name(), "all-MiniLM-L6-v2");
    }

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_batch_equals_single() {
        let model = OnnxEmbeddingModel::new(&EmbeddingModelConfig::default())
            .await
            .expect("Failed to load model");
        let texts = vec![
            "Coffee at Starbucks".to_string(),
            "Electricity bill for March, paid online".to_string(),
        ];

        let batch = model.embed_batch(&texts).await.unwrap();
        for (i, text) in texts.iter().enumerate() {
            let single = model.embed_batch(&[text.clone()]).await.unwrap();
            // Padding differs between the two calls, so allow float noise
            assert!(cosine(&batch[i], &single[0]) > 0.9999);
        }
    }

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_related_texts_are_closer() {
        let model = OnnxEmbeddingModel::new(&EmbeddingModelConfig::default())
            .await
            .expect("Failed to load model");
        let texts = vec![
            "Taxi to the airport".to_string(),
            "Uber ride downtown".to_string(),
            "Monthly apartment rent".to_string(),
        ];

        let vectors = model.embed_batch(&texts).await.unwrap();
        assert!(cosine(&vectors[0], &vectors[1]) > cosine(&vectors[0], &vectors[2]));
    }

    #[tokio::test]
    async fn test_missing_model_file_fails() {
        let config = EmbeddingModelConfig {
            model_path: "/nonexistent/model.onnx".to_string(),
            ..EmbeddingModelConfig::default()
        };

        let err = OnnxEmbeddingModel::new(&config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("not found"));
    }
}
