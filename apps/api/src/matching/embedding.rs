//! Typed decode of stored embeddings.
//!
//! Profile embeddings are persisted as JSON text. The decode happens here,
//! at the storage boundary, so raw strings never reach the numeric code in
//! `similarity` or `select`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingParseError {
    #[error("stored embedding is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored embedding decoded to an empty vector")]
    Empty,
}

/// Decodes a JSON-text serialized embedding into a vector.
/// A candidate whose embedding fails here is skipped by the selector, so
/// this returns a typed error instead of logging on its own.
pub fn decode_embedding(text: &str) -> Result<Vec<f32>, EmbeddingParseError> {
    let vector: Vec<f32> = serde_json::from_str(text)?;
    if vector.is_empty() {
        return Err(EmbeddingParseError::Empty);
    }
    Ok(vector)
}

/// Serializes an embedding for storage. Inverse of `decode_embedding`.
pub fn encode_embedding(vector: &[f32]) -> String {
    serde_json::to_string(vector).expect("Vec<f32> serialization cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_json_array() {
        let decoded = decode_embedding("[0.5, -1.25, 3.0]").unwrap();
        assert_eq!(decoded, vec![0.5, -1.25, 3.0]);
    }

    #[test]
    fn test_decode_garbage_is_error() {
        assert!(decode_embedding("not json").is_err());
        assert!(decode_embedding("{\"a\": 1}").is_err());
    }

    #[test]
    fn test_decode_empty_array_is_error() {
        assert!(matches!(
            decode_embedding("[]"),
            Err(EmbeddingParseError::Empty)
        ));
    }

    #[test]
    fn test_encode_round_trips() {
        let original = vec![1.0_f32, 0.25, -2.5];
        let decoded = decode_embedding(&encode_embedding(&original)).unwrap();
        assert_eq!(decoded, original);
    }
}
