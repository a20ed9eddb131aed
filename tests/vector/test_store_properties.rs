// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for VectorStore behaviour over randomised inputs
// Flat index: results are exact, so every property holds deterministically

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vittmoney_nlp::vector::{VectorStore, VectorStoreError, DEFAULT_K};

#[cfg(test)]
mod store_property_tests {
    use super::*;

    /// Helper: Create `count` random vectors from a fixed seed
    fn random_vectors(seed: u64, count: usize, dim: usize) -> Vec<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect())
            .collect()
    }

    fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
    }

    #[test]
    fn test_fresh_store_search_is_empty() {
        for dim in [1, 3, 384] {
            let store: VectorStore<String> = VectorStore::new(dim).unwrap();
            let query = vec![0.5; dim];

            for k in [1, DEFAULT_K, 100] {
                assert!(store.search(&query, k).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = VectorStore::<u32>::new(0).unwrap_err();
        assert_eq!(err, VectorStoreError::InvalidDimension(0));
    }

    #[test]
    fn test_every_vector_is_its_own_nearest_neighbour() {
        let dim = 8;
        let vectors = random_vectors(7, 50, dim);
        let metadata: Vec<usize> = (0..vectors.len()).collect();

        let mut store = VectorStore::new(dim).unwrap();
        store.add(vectors.clone(), metadata).unwrap();

        for (i, vector) in vectors.iter().enumerate() {
            assert_eq!(store.search(vector, 1).unwrap(), vec![i]);
        }
    }

    #[test]
    fn test_length_mismatch_leaves_store_unchanged() {
        let dim = 4;
        let mut store = VectorStore::new(dim).unwrap();
        store
            .add(random_vectors(1, 3, dim), vec!["a", "b", "c"])
            .unwrap();

        let err = store
            .add(random_vectors(2, 2, dim), vec!["d", "e", "f"])
            .unwrap_err();

        assert_eq!(
            err,
            VectorStoreError::LengthMismatch {
                vectors: 2,
                metadata: 3
            }
        );
        assert_eq!(store.len(), 3);
        assert_eq!(store.index().len(), 3);
        assert_eq!(store.metadata().len(), 3);
    }

    #[test]
    fn test_dimension_mismatch_in_batch_leaves_store_unchanged() {
        let mut store = VectorStore::new(3).unwrap();
        let batch = vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0, 2.0]];

        let err = store.add(batch, vec![1, 2, 3]).unwrap_err();

        assert_eq!(
            err,
            VectorStoreError::DimensionMismatch {
                position: 1,
                expected: 3,
                actual: 2
            }
        );
        assert!(store.is_empty());
        assert!(store.metadata().is_empty());
    }

    #[test]
    fn test_query_dimension_checked() {
        let store: VectorStore<u8> = VectorStore::new(3).unwrap();
        assert!(matches!(
            store.search(&[1.0, 2.0], 1),
            Err(VectorStoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_large_k_returns_everything_in_distance_order() {
        let dim = 5;
        let vectors = random_vectors(42, 20, dim);
        let metadata: Vec<usize> = (0..vectors.len()).collect();
        let mut store = VectorStore::new(dim).unwrap();
        store.add(vectors.clone(), metadata).unwrap();

        let query = random_vectors(99, 1, dim).remove(0);
        let results = store.search(&query, 1000).unwrap();

        assert_eq!(results.len(), 20);
        let distances: Vec<f32> = results
            .iter()
            .map(|&i| squared_l2(&vectors[i], &query))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_ties_resolved_by_insertion_order() {
        let mut store = VectorStore::new(2).unwrap();
        store
            .add(
                vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0], vec![1.0, 0.0]],
                vec!["east", "north", "west", "east-again"],
            )
            .unwrap();

        let results = store.search(&[0.0, 0.0], 4).unwrap();
        assert_eq!(results, vec!["east", "north", "west", "east-again"]);

        let results = store.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(results, vec!["east", "east-again"]);
    }

    #[test]
    fn test_distances_are_squared_l2() {
        let mut store = VectorStore::new(2).unwrap();
        store
            .add(vec![vec![3.0, 4.0], vec![1.0, 1.0]], vec!["far", "near"])
            .unwrap();

        let hits = store.search_with_distances(&[0.0, 0.0], 2).unwrap();
        assert_eq!(hits[0].metadata, "near");
        assert_eq!(hits[0].distance, 2.0);
        assert_eq!(hits[1].metadata, "far");
        assert_eq!(hits[1].distance, 25.0);
    }

    #[test]
    fn test_pairing_survives_many_batches() {
        let dim = 6;
        let mut store = VectorStore::new(dim).unwrap();
        let mut all = Vec::new();

        for batch in 0..10u64 {
            let vectors = random_vectors(batch, 7, dim);
            let metadata: Vec<String> = (0..7).map(|i| format!("b{}-{}", batch, i)).collect();
            all.extend(vectors.iter().cloned().zip(metadata.iter().cloned()));
            store.add(vectors, metadata).unwrap();
        }

        assert_eq!(store.len(), 70);
        for (vector, label) in &all {
            assert_eq!(&store.search(vector, 1).unwrap()[0], label);
        }
    }
}
