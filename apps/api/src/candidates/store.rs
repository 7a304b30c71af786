//! Candidate store reader/writer.
//!
//! The matching pipeline only ever reads. The single mutation path is the
//! ingest upsert: idempotent, keyed by username, last-write-wins — no
//! reconciliation beyond Postgres's native conflict resolution.

use sqlx::PgPool;
use tracing::info;

use crate::models::candidate::{CandidateProfile, CandidateRow};
use crate::scoring::Scores;

/// Returns every candidate record. A full scan is fine here: matching is a
/// one-shot client-invoked operation, not a high-QPS service.
pub async fn fetch_all_candidates(pool: &PgPool) -> Result<Vec<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY username")
        .fetch_all(pool)
        .await
}

/// Upserts one candidate together with its freshly computed scores and
/// embedding. Conflicts on username overwrite the previous row wholesale.
pub async fn upsert_candidate(
    pool: &PgPool,
    profile: &CandidateProfile,
    scores: Scores,
    embedding: Option<&str>,
) -> Result<(), sqlx::Error> {
    let review_breakdown = serde_json::to_value(&profile.review_breakdown).ok();
    let seller_level = profile.seller_level.map(|l| l.as_label());

    sqlx::query(
        r#"
        INSERT INTO candidates
            (username, display_name, headline, bio, skills, rating, num_reviews,
             review_breakdown, seller_level, avg_response_time, num_projects,
             email, phone, embedding, competence_score, agency_score, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, NOW())
        ON CONFLICT (username) DO UPDATE SET
            display_name = EXCLUDED.display_name,
            headline = EXCLUDED.headline,
            bio = EXCLUDED.bio,
            skills = EXCLUDED.skills,
            rating = EXCLUDED.rating,
            num_reviews = EXCLUDED.num_reviews,
            review_breakdown = EXCLUDED.review_breakdown,
            seller_level = EXCLUDED.seller_level,
            avg_response_time = EXCLUDED.avg_response_time,
            num_projects = EXCLUDED.num_projects,
            email = EXCLUDED.email,
            phone = EXCLUDED.phone,
            embedding = EXCLUDED.embedding,
            competence_score = EXCLUDED.competence_score,
            agency_score = EXCLUDED.agency_score,
            updated_at = NOW()
        "#,
    )
    .bind(&profile.username)
    .bind(&profile.display_name)
    .bind(&profile.headline)
    .bind(&profile.bio)
    .bind(&profile.skills)
    .bind(profile.rating)
    .bind(profile.num_reviews.map(i64::from))
    .bind(review_breakdown)
    .bind(seller_level)
    .bind(&profile.avg_response_time)
    .bind(profile.num_projects.map(i64::from))
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(embedding)
    .bind(scores.competence_score)
    .bind(scores.agency_score)
    .execute(pool)
    .await?;

    info!("Upserted candidate '{}'", profile.username);
    Ok(())
}
