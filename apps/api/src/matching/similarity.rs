//! Cosine similarity between embedding vectors.

/// Computes cosine similarity between two vectors: dot(a,b) / (||a||·||b||).
///
/// Returns 0.0 when either vector is empty, the lengths differ, or either
/// norm is zero. Malformed or missing embeddings must never crash a ranking
/// pass, so the degenerate cases all collapse to "no similarity" rather
/// than an error.
///
/// The result is clamped to [-1, 1]; floating point drift can otherwise
/// produce values like 1.0000001 for identical vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_are_one() {
        let a = [0.3_f32, -1.2, 4.5, 0.01];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_are_zero() {
        let a = [1.0_f32, 0.0];
        let b = [0.0_f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_opposite_vectors_are_minus_one() {
        let a = [2.0_f32, 1.0];
        let b = [-2.0_f32, -1.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_mismatch_is_zero() {
        let a = [1.0_f32, 2.0, 3.0];
        let b = [1.0_f32, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_vector_is_zero() {
        let a: [f32; 0] = [];
        assert_eq!(cosine_similarity(&a, &a), 0.0);
        assert_eq!(cosine_similarity(&a, &[1.0]), 0.0);
    }

    #[test]
    fn test_zero_norm_is_zero() {
        let a = [0.0_f32, 0.0, 0.0];
        let b = [1.0_f32, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = [0.5_f32, -0.3, 2.2];
        let b = [1.1_f32, 0.9, -0.4];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_scale_invariance() {
        let a = [1.0_f32, 2.0, 3.0];
        let b = [10.0_f32, 20.0, 30.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }
}
