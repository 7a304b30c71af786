//! Similarity-ranked candidate matching: query embedding → linear scan →
//! arg-max over cosine similarity.

pub mod embedding;
pub mod handlers;
pub mod select;
pub mod similarity;
