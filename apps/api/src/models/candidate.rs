//! Candidate profile data model.
//!
//! Two representations:
//! - `CandidateRow` — the persisted shape, read straight out of Postgres.
//! - `CandidateProfile` — the normalized shape the scoring engine consumes.
//!
//! Ingested payloads arrive as `RawProfile` (scraped data, every field
//! unreliable) and pass through a single normalization step so that every
//! "missing" representation (null, empty string, negative count) becomes a
//! canonical `None` before any scoring or embedding happens.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Seller tier as advertised on the source marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SellerLevel {
    New,
    LevelOne,
    LevelTwo,
    TopRated,
}

impl SellerLevel {
    /// Numeric tier used by the scoring engine: new=1 .. top-rated=4.
    /// An absent tier contributes 0.
    pub fn tier_numeric(self) -> u32 {
        match self {
            SellerLevel::New => 1,
            SellerLevel::LevelOne => 2,
            SellerLevel::LevelTwo => 3,
            SellerLevel::TopRated => 4,
        }
    }

    /// Canonical marketplace label, persisted in the store.
    /// Always round-trips through `parse`.
    pub fn as_label(self) -> &'static str {
        match self {
            SellerLevel::New => "New Seller",
            SellerLevel::LevelOne => "Level 1",
            SellerLevel::LevelTwo => "Level 2",
            SellerLevel::TopRated => "Top Rated",
        }
    }

    /// Parses the free-text tier label from scraped data.
    /// Unrecognized labels map to `None` (tier 0), never to an error.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "new seller" | "new" => Some(SellerLevel::New),
            "level 1" | "level 1 seller" | "level one" => Some(SellerLevel::LevelOne),
            "level 2" | "level 2 seller" | "level two" => Some(SellerLevel::LevelTwo),
            "top rated" | "top rated seller" | "top rated plus" => Some(SellerLevel::TopRated),
            _ => None,
        }
    }
}

/// One persisted candidate record, keyed by username.
/// Read-only from the matching pipeline's perspective; the only writer is
/// the ingest upsert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub username: String,
    pub display_name: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i64>,
    /// Star-level (1-5) to review count, stored as JSONB.
    pub review_breakdown: Option<Value>,
    pub seller_level: Option<String>,
    pub avg_response_time: Option<String>,
    pub num_projects: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Embedding vector serialized as JSON text. Decoded at the storage
    /// boundary by `matching::embedding::decode_embedding`.
    pub embedding: Option<String>,
    pub competence_score: f64,
    pub agency_score: f64,
    pub updated_at: DateTime<Utc>,
}

/// Normalized candidate profile — canonical `None` for every missing field.
/// This is the only shape the scoring engine accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub username: String,
    pub display_name: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub rating: Option<f64>,
    pub num_reviews: Option<u32>,
    pub review_breakdown: BTreeMap<u8, u32>,
    pub seller_level: Option<SellerLevel>,
    pub avg_response_time: Option<String>,
    pub num_projects: Option<u32>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CandidateProfile {
    /// Count of five-star reviews, 0 when the breakdown is absent.
    pub fn five_star_count(&self) -> u32 {
        self.review_breakdown.get(&5).copied().unwrap_or(0)
    }

    /// Text fed to the embedding provider at ingestion time.
    pub fn embedding_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(name) = &self.display_name {
            parts.push(name.clone());
        }
        if let Some(headline) = &self.headline {
            parts.push(headline.clone());
        }
        if !self.skills.is_empty() {
            parts.push(self.skills.join(", "));
        }
        if let Some(bio) = &self.bio {
            parts.push(bio.clone());
        }
        parts.join("\n")
    }
}

/// Raw scraped profile as submitted to the ingest endpoint.
/// Every field may be null, absent, empty, or nonsensical.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub num_reviews: Option<i64>,
    #[serde(default)]
    pub review_breakdown: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    pub seller_level: Option<String>,
    #[serde(default)]
    pub avg_response_time: Option<String>,
    #[serde(default)]
    pub num_projects: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl RawProfile {
    /// The single normalization step: collapses every missing-data
    /// representation into canonical `None` and drops out-of-range values.
    /// Total over its input; scraped garbage degrades to absent fields.
    pub fn normalize(self) -> CandidateProfile {
        let rating = self.rating.filter(|r| (0.0..=5.0).contains(r));
        let num_reviews = self.num_reviews.and_then(non_negative);
        let num_projects = self.num_projects.and_then(non_negative);

        let review_breakdown = self
            .review_breakdown
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(star, count)| {
                let star = star.parse::<u8>().ok().filter(|s| (1..=5).contains(s))?;
                let count = non_negative(count)?;
                Some((star, count))
            })
            .collect();

        let seller_level = self
            .seller_level
            .as_deref()
            .and_then(SellerLevel::parse);

        CandidateProfile {
            username: self.username,
            display_name: non_empty(self.display_name),
            headline: non_empty(self.headline),
            bio: non_empty(self.bio),
            skills: self
                .skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rating,
            num_reviews,
            review_breakdown,
            seller_level,
            avg_response_time: non_empty(self.avg_response_time),
            num_projects,
            email: non_empty(self.email),
            phone: non_empty(self.phone),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn non_negative(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(username: &str) -> RawProfile {
        RawProfile {
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
        }
    }

    #[test]
    fn test_seller_level_parse_known_labels() {
        assert_eq!(SellerLevel::parse("Top Rated Seller"), Some(SellerLevel::TopRated));
        assert_eq!(SellerLevel::parse("Level 2"), Some(SellerLevel::LevelTwo));
        assert_eq!(SellerLevel::parse("level 1 seller"), Some(SellerLevel::LevelOne));
        assert_eq!(SellerLevel::parse("New Seller"), Some(SellerLevel::New));
    }

    #[test]
    fn test_seller_level_parse_unknown_is_none() {
        assert_eq!(SellerLevel::parse("Grandmaster"), None);
        assert_eq!(SellerLevel::parse(""), None);
    }

    #[test]
    fn test_as_label_round_trips_through_parse() {
        for level in [
            SellerLevel::New,
            SellerLevel::LevelOne,
            SellerLevel::LevelTwo,
            SellerLevel::TopRated,
        ] {
            assert_eq!(SellerLevel::parse(level.as_label()), Some(level));
        }
    }

    #[test]
    fn test_tier_numeric_ordering() {
        assert_eq!(SellerLevel::New.tier_numeric(), 1);
        assert_eq!(SellerLevel::TopRated.tier_numeric(), 4);
    }

    #[test]
    fn test_normalize_empty_strings_become_none() {
        let mut profile = raw("alice");
        profile.display_name = Some("  ".to_string());
        profile.headline = Some(String::new());
        let normalized = profile.normalize();
        assert_eq!(normalized.display_name, None);
        assert_eq!(normalized.headline, None);
    }

    #[test]
    fn test_normalize_drops_out_of_range_rating() {
        let mut profile = raw("bob");
        profile.rating = Some(7.5);
        assert_eq!(profile.normalize().rating, None);

        let mut profile = raw("bob");
        profile.rating = Some(4.9);
        assert_eq!(profile.normalize().rating, Some(4.9));
    }

    #[test]
    fn test_normalize_drops_negative_counts() {
        let mut profile = raw("carol");
        profile.num_reviews = Some(-3);
        profile.num_projects = Some(12);
        let normalized = profile.normalize();
        assert_eq!(normalized.num_reviews, None);
        assert_eq!(normalized.num_projects, Some(12));
    }

    #[test]
    fn test_normalize_review_breakdown_filters_bad_keys() {
        let mut profile = raw("dave");
        let mut breakdown = BTreeMap::new();
        breakdown.insert("5".to_string(), 40_i64);
        breakdown.insert("9".to_string(), 7_i64);
        breakdown.insert("stars".to_string(), 3_i64);
        breakdown.insert("1".to_string(), -2_i64);
        profile.review_breakdown = Some(breakdown);

        let normalized = profile.normalize();
        assert_eq!(normalized.review_breakdown.len(), 1);
        assert_eq!(normalized.five_star_count(), 40);
    }

    #[test]
    fn test_normalize_trims_and_drops_empty_skills() {
        let mut profile = raw("erin");
        profile.skills = vec![" rust ".to_string(), String::new(), "sql".to_string()];
        let normalized = profile.normalize();
        assert_eq!(normalized.skills, vec!["rust", "sql"]);
    }

    #[test]
    fn test_embedding_text_joins_present_fields() {
        let mut profile = raw("frank").normalize();
        profile.headline = Some("Senior data engineer".to_string());
        profile.skills = vec!["python".to_string(), "airflow".to_string()];
        let text = profile.embedding_text();
        assert!(text.contains("Senior data engineer"));
        assert!(text.contains("python, airflow"));
    }

    #[test]
    fn test_five_star_count_absent_breakdown() {
        let profile = raw("grace").normalize();
        assert_eq!(profile.five_star_count(), 0);
    }
}
