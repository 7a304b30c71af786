//! Best-match selection: linear arg-max scan over candidate embeddings.

use tracing::warn;

use crate::matching::embedding::decode_embedding;
use crate::matching::similarity::cosine_similarity;
use crate::models::candidate::CandidateRow;

/// The winning candidate and its similarity to the query.
#[derive(Debug, Clone)]
pub struct BestMatch<'a> {
    pub candidate: &'a CandidateRow,
    pub similarity: f32,
}

/// Scans all candidates and returns the one most similar to the query
/// embedding, or `None` when the set is empty or no candidate has a usable
/// embedding (the "no match found" outcome — distinct from the store and
/// embedding-provider failures, which abort before this is called).
///
/// Candidates without an embedding, or whose stored embedding fails to
/// decode, are skipped before any similarity call — they are excluded, not
/// scored as zero. Decode failures are logged and never abort the scan.
///
/// Ties keep the first-seen candidate (strict `>` on the running maximum).
/// O(n·d) with no index; this is a one-shot client-invoked scan.
pub fn select_best_match<'a>(
    query_embedding: &[f32],
    candidates: &'a [CandidateRow],
) -> Option<BestMatch<'a>> {
    let mut best: Option<BestMatch<'a>> = None;

    for candidate in candidates {
        let stored = match &candidate.embedding {
            Some(text) => text,
            None => continue,
        };

        let vector = match decode_embedding(stored) {
            Ok(v) => v,
            Err(e) => {
                warn!(
                    "Skipping candidate '{}': unparsable stored embedding: {e}",
                    candidate.username
                );
                continue;
            }
        };

        let similarity = cosine_similarity(query_embedding, &vector);

        let is_better = match &best {
            Some(current) => similarity > current.similarity,
            None => true,
        };
        if is_better {
            best = Some(BestMatch {
                candidate,
                similarity,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_candidate(username: &str, embedding: Option<&str>) -> CandidateRow {
        CandidateRow {
            username: username.to_string(),
            display_name: None,
            headline: None,
            bio: None,
            skills: vec![],
            rating: None,
            num_reviews: None,
            review_breakdown: None,
            seller_level: None,
            avg_response_time: None,
            num_projects: None,
            email: None,
            phone: None,
            embedding: embedding.map(String::from),
            competence_score: 0.0,
            agency_score: 0.0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_selects_most_similar_candidate() {
        let candidates = vec![
            make_candidate("a", Some("[1.0, 0.0]")),
            make_candidate("b", Some("[0.0, 1.0]")),
        ];
        let best = select_best_match(&[1.0, 0.0], &candidates).unwrap();
        assert_eq!(best.candidate.username, "a");
        assert!((best.similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_candidate_set_is_none() {
        assert!(select_best_match(&[1.0, 0.0], &[]).is_none());
    }

    #[test]
    fn test_sole_unparsable_embedding_is_none() {
        let candidates = vec![make_candidate("broken", Some("not a vector"))];
        assert!(select_best_match(&[1.0, 0.0], &candidates).is_none());
    }

    #[test]
    fn test_missing_embedding_is_skipped_not_scored() {
        // The embedding-less candidate must not win even though every scored
        // candidate has negative similarity.
        let candidates = vec![
            make_candidate("no-embedding", None),
            make_candidate("opposite", Some("[-1.0, 0.0]")),
        ];
        let best = select_best_match(&[1.0, 0.0], &candidates).unwrap();
        assert_eq!(best.candidate.username, "opposite");
        assert!(best.similarity < 0.0);
    }

    #[test]
    fn test_unparsable_candidate_does_not_abort_scan() {
        let candidates = vec![
            make_candidate("broken", Some("[[nested]]")),
            make_candidate("good", Some("[0.6, 0.8]")),
        ];
        let best = select_best_match(&[0.6, 0.8], &candidates).unwrap();
        assert_eq!(best.candidate.username, "good");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let candidates = vec![
            make_candidate("first", Some("[1.0, 0.0]")),
            make_candidate("second", Some("[2.0, 0.0]")), // same direction, same cosine
        ];
        let best = select_best_match(&[1.0, 0.0], &candidates).unwrap();
        assert_eq!(best.candidate.username, "first");
    }

    #[test]
    fn test_all_embeddings_unusable_is_none() {
        let candidates = vec![
            make_candidate("a", None),
            make_candidate("b", Some("oops")),
            make_candidate("c", Some("[]")),
        ];
        assert!(select_best_match(&[1.0], &candidates).is_none());
    }
}
