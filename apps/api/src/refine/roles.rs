#![allow(dead_code)]

//! LLM collaborator calls for role refinement.
//!
//! Each call deserializes the model's reply against a fixed serde shape.
//! A reply that parses as JSON but violates the shape is a schema
//! validation failure, treated identically to a hard LLM failure — never
//! silently coerced.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::refine::prompts::{
    CLARIFY_PROMPT_TEMPLATE, CLARIFY_SYSTEM, REFINE_ROLE_PROMPT_TEMPLATE, REFINE_ROLE_SYSTEM,
    SUGGEST_ROLE_PROMPT_TEMPLATE, SUGGEST_ROLE_SYSTEM,
};
use crate::refine::sequencer::{PendingCall, SequencerEvent};

/// A suggested role: job title plus the derived search query.
/// Held for one user session only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleSuggestion {
    pub title: String,
    pub final_query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClarifyingQuestion {
    pub question: String,
}

/// Suggests a role from the client's free-text hiring need.
pub async fn suggest_role(need: &str, llm: &LlmClient) -> Result<RoleSuggestion, AppError> {
    let prompt = SUGGEST_ROLE_PROMPT_TEMPLATE.replace("{need}", need);
    let suggestion: RoleSuggestion = llm
        .call_json(&prompt, SUGGEST_ROLE_SYSTEM)
        .await
        .map_err(map_llm_error)?;
    validate_suggestion(&suggestion)?;
    Ok(suggestion)
}

/// Asks one clarifying question after the client rejects a suggestion.
pub async fn ask_clarifying_question(
    need: &str,
    rejected_title: &str,
    llm: &LlmClient,
) -> Result<ClarifyingQuestion, AppError> {
    let prompt = CLARIFY_PROMPT_TEMPLATE
        .replace("{need}", need)
        .replace("{rejected_title}", rejected_title);
    let question: ClarifyingQuestion = llm
        .call_json(&prompt, CLARIFY_SYSTEM)
        .await
        .map_err(map_llm_error)?;
    if question.question.trim().is_empty() {
        return Err(AppError::SchemaValidation(
            "clarifying question was empty".to_string(),
        ));
    }
    Ok(question)
}

/// Suggests a refined role using the client's answer to the clarifying question.
pub async fn refine_role(
    need: &str,
    rejected_title: &str,
    answer: &str,
    llm: &LlmClient,
) -> Result<RoleSuggestion, AppError> {
    let prompt = REFINE_ROLE_PROMPT_TEMPLATE
        .replace("{need}", need)
        .replace("{rejected_title}", rejected_title)
        .replace("{answer}", answer);
    let suggestion: RoleSuggestion = llm
        .call_json(&prompt, REFINE_ROLE_SYSTEM)
        .await
        .map_err(map_llm_error)?;
    validate_suggestion(&suggestion)?;
    Ok(suggestion)
}

/// The three role-refinement collaborator calls behind a trait, so
/// sequencer drivers can run against a canned implementation in tests.
/// Production drivers use the `LlmClient` impl below.
#[async_trait]
pub trait RoleCollaborators: Send + Sync {
    async fn suggest(&self, need: &str) -> Result<RoleSuggestion, AppError>;
    async fn clarify(
        &self,
        need: &str,
        rejected_title: &str,
    ) -> Result<ClarifyingQuestion, AppError>;
    async fn refine(
        &self,
        need: &str,
        rejected_title: &str,
        answer: &str,
    ) -> Result<RoleSuggestion, AppError>;
}

#[async_trait]
impl RoleCollaborators for LlmClient {
    async fn suggest(&self, need: &str) -> Result<RoleSuggestion, AppError> {
        suggest_role(need, self).await
    }

    async fn clarify(
        &self,
        need: &str,
        rejected_title: &str,
    ) -> Result<ClarifyingQuestion, AppError> {
        ask_clarifying_question(need, rejected_title, self).await
    }

    async fn refine(
        &self,
        need: &str,
        rejected_title: &str,
        answer: &str,
    ) -> Result<RoleSuggestion, AppError> {
        refine_role(need, rejected_title, answer, self).await
    }
}

/// Executes the collaborator call a loading state is waiting on and maps
/// the outcome to the sequencer event that resolves it. Drivers feed the
/// returned event straight into `SequencerState::apply`.
pub async fn execute_call(
    call: &PendingCall,
    collaborators: &impl RoleCollaborators,
) -> SequencerEvent {
    match call {
        PendingCall::Suggest { need } => match collaborators.suggest(need).await {
            Ok(s) => SequencerEvent::SuggestionLoaded(s),
            Err(e) => SequencerEvent::LoadFailed(e.to_string()),
        },
        PendingCall::Clarify {
            need,
            rejected_title,
        } => match collaborators.clarify(need, rejected_title).await {
            Ok(q) => SequencerEvent::QuestionLoaded(q.question),
            Err(e) => SequencerEvent::LoadFailed(e.to_string()),
        },
        PendingCall::Refine {
            need,
            rejected_title,
            answer,
        } => match collaborators.refine(need, rejected_title, answer).await {
            Ok(s) => SequencerEvent::RefinementLoaded(s),
            Err(e) => SequencerEvent::LoadFailed(e.to_string()),
        },
    }
}

fn validate_suggestion(suggestion: &RoleSuggestion) -> Result<(), AppError> {
    if suggestion.title.trim().is_empty() || suggestion.final_query.trim().is_empty() {
        return Err(AppError::SchemaValidation(
            "role suggestion had an empty title or final_query".to_string(),
        ));
    }
    Ok(())
}

fn map_llm_error(e: LlmError) -> AppError {
    match e {
        LlmError::Parse(e) => {
            AppError::SchemaValidation(format!("LLM reply did not match schema: {e}"))
        }
        other => AppError::Llm(other.to_string()),
    }
}
