//! Composite scoring engine.
//!
//! Converts a normalized candidate profile into two bounded scores:
//!
//! - `competence_score` — how strong the candidate's track record is.
//! - `agency_score` — how responsive and self-directed they appear.
//!
//! Both are weighted sums of normalized sub-metrics, clamped at 1.0 before
//! the final ×100 scaling and rounded to two decimals. The function is
//! total: absent fields contribute 0, never an error. Unbounded counts
//! (reviews, projects) are log-scaled so a handful of outlier profiles
//! cannot drown the linear rating/tier signals.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::candidate::CandidateProfile;

/// Competence sub-metric weights. Must sum to 1.0.
const W_RATING: f64 = 0.40;
const W_REVIEW_VOLUME: f64 = 0.15;
const W_SKILL_BREADTH: f64 = 0.10;
const W_SELLER_TIER: f64 = 0.20;
const W_FIVE_STAR_RATIO: f64 = 0.10;
const W_PROJECT_VOLUME: f64 = 0.05;

/// Agency sub-metric weights. Must sum to 1.0.
const W_RESPONSE_SPEED: f64 = 0.50;
const W_AGENCY_TIER: f64 = 0.30;
const W_AGENCY_PROJECTS: f64 = 0.20;

const MAX_TIER: f64 = 4.0;
const MAX_RESPONSE_BUCKET: f64 = 3.0;
const SKILL_BREADTH_CAP: f64 = 10.0;

/// Saturation points for the log-scaled count sub-metrics.
/// Tunable constants, not derived from any calibration dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub review_saturation: u32,
    pub project_saturation: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            review_saturation: 100,
            project_saturation: 50,
        }
    }
}

impl ScoringConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            review_saturation: config.review_saturation,
            project_saturation: config.project_saturation,
        }
    }
}

/// Derived scores for one profile snapshot. Recomputed at every
/// (re)ingestion, immutable otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub competence_score: f64,
    pub agency_score: f64,
}

/// Computes both composite scores for a profile. Deterministic and total.
pub fn compute_scores(profile: &CandidateProfile, config: &ScoringConfig) -> Scores {
    let rating_norm = profile.rating.unwrap_or(0.0) / 5.0;
    let review_volume = log_saturated(profile.num_reviews.unwrap_or(0), config.review_saturation);
    let skill_breadth = (profile.skills.len() as f64 / SKILL_BREADTH_CAP).min(1.0);
    let tier = profile
        .seller_level
        .map(|l| l.tier_numeric() as f64 / MAX_TIER)
        .unwrap_or(0.0);
    let five_star_ratio = five_star_ratio(profile);
    let project_volume =
        log_saturated(profile.num_projects.unwrap_or(0), config.project_saturation);

    let competence = W_RATING * clamp01(rating_norm)
        + W_REVIEW_VOLUME * review_volume
        + W_SKILL_BREADTH * skill_breadth
        + W_SELLER_TIER * tier
        + W_FIVE_STAR_RATIO * five_star_ratio
        + W_PROJECT_VOLUME * project_volume;

    let response_speed = response_bucket(profile.avg_response_time.as_deref()) / MAX_RESPONSE_BUCKET;

    let agency = W_RESPONSE_SPEED * response_speed
        + W_AGENCY_TIER * tier
        + W_AGENCY_PROJECTS * project_volume;

    Scores {
        competence_score: round2(clamp01(competence) * 100.0),
        agency_score: round2(clamp01(agency) * 100.0),
    }
}

/// log(count+1)/log(saturation), clamped into [0, 1].
/// Reaches 1.0 at (just under) the saturation count.
fn log_saturated(count: u32, saturation: u32) -> f64 {
    if saturation <= 1 {
        return 0.0;
    }
    let scaled = ((count as f64) + 1.0).ln() / (saturation as f64).ln();
    clamp01(scaled)
}

/// Share of reviews at five stars, 0 when there are no reviews.
/// Clamped so a breakdown count exceeding num_reviews cannot push past 1.
fn five_star_ratio(profile: &CandidateProfile) -> f64 {
    let num_reviews = profile.num_reviews.unwrap_or(0);
    if num_reviews == 0 {
        return 0.0;
    }
    clamp01(profile.five_star_count() as f64 / num_reviews as f64)
}

/// Buckets the free-text response-time descriptor: faster is higher.
/// "within 24 hours" must be checked before the generic hours bucket.
fn response_bucket(descriptor: Option<&str>) -> f64 {
    let descriptor = match descriptor {
        Some(d) => d.to_lowercase(),
        None => return 0.0,
    };
    if descriptor.contains("24") {
        2.0
    } else if descriptor.contains("hour") {
        3.0
    } else if descriptor.contains("day") {
        1.0
    } else {
        0.0
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
