//! Conversational role refinement: free-text hiring need → confirmed job
//! title + search query, with at most one clarification round.

pub mod handlers;
pub mod prompts;
pub mod roles;
pub mod sequencer;
