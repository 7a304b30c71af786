#![allow(dead_code)]

//! Role-refinement sequencer — an explicit finite state machine.
//!
//! Pure transitions `(state, event) -> state` with no I/O, so the whole
//! conversational flow is unit-testable without a UI harness or a live
//! LLM. Async drivers inspect `pending_call()` to learn which collaborator
//! call a loading state is waiting on, issue it (see
//! `roles::execute_call`), and feed the resulting event back in.
//!
//! Flow: LoadingSuggestion → ShowingSuggestion → {Confirmed |
//! LoadingQuestion → ShowingQuestion → LoadingRefinement →
//! ShowingRefinement → {Confirmed | Editing → ShowingRefinement}}.
//! Error is reachable from every loading state and carries the exact
//! failed call so Retry re-attempts the same request parameters. At most
//! one clarification round; there is no edge back to LoadingQuestion.

use crate::refine::roles::RoleSuggestion;

/// A collaborator call with its exact request parameters. Stored in the
/// Error state so a retry re-issues precisely what failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCall {
    Suggest {
        need: String,
    },
    Clarify {
        need: String,
        rejected_title: String,
    },
    Refine {
        need: String,
        rejected_title: String,
        answer: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerState {
    LoadingSuggestion {
        need: String,
    },
    ShowingSuggestion {
        need: String,
        suggestion: RoleSuggestion,
    },
    LoadingQuestion {
        need: String,
        rejected_title: String,
    },
    ShowingQuestion {
        need: String,
        rejected_title: String,
        question: String,
    },
    LoadingRefinement {
        need: String,
        rejected_title: String,
        answer: String,
    },
    ShowingRefinement {
        need: String,
        suggestion: RoleSuggestion,
    },
    Editing {
        need: String,
        suggestion: RoleSuggestion,
    },
    Confirmed {
        suggestion: RoleSuggestion,
    },
    Error {
        failed: PendingCall,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    SuggestionLoaded(RoleSuggestion),
    QuestionLoaded(String),
    RefinementLoaded(RoleSuggestion),
    LoadFailed(String),
    Accept,
    Reject,
    SubmitAnswer(String),
    BeginEdit,
    /// Edited title; `final_query` is derived by lower-casing it.
    SubmitEdit(String),
    Retry,
}

impl SequencerState {
    /// Entry point: a fresh need immediately requests an initial suggestion.
    pub fn start(need: String) -> Self {
        SequencerState::LoadingSuggestion { need }
    }

    /// The collaborator call this state is waiting on, if any.
    pub fn pending_call(&self) -> Option<PendingCall> {
        match self {
            SequencerState::LoadingSuggestion { need } => Some(PendingCall::Suggest {
                need: need.clone(),
            }),
            SequencerState::LoadingQuestion {
                need,
                rejected_title,
            } => Some(PendingCall::Clarify {
                need: need.clone(),
                rejected_title: rejected_title.clone(),
            }),
            SequencerState::LoadingRefinement {
                need,
                rejected_title,
                answer,
            } => Some(PendingCall::Refine {
                need: need.clone(),
                rejected_title: rejected_title.clone(),
                answer: answer.clone(),
            }),
            _ => None,
        }
    }

    /// The confirmed role, once the machine has terminated.
    pub fn confirmed(&self) -> Option<&RoleSuggestion> {
        match self {
            SequencerState::Confirmed { suggestion } => Some(suggestion),
            _ => None,
        }
    }

    /// Pure transition function. Events that do not apply to the current
    /// state leave it unchanged; no partial state is ever committed.
    pub fn apply(self, event: SequencerEvent) -> Self {
        match (self, event) {
            (
                SequencerState::LoadingSuggestion { need },
                SequencerEvent::SuggestionLoaded(suggestion),
            ) => SequencerState::ShowingSuggestion { need, suggestion },

            (
                SequencerState::ShowingSuggestion { suggestion, .. },
                SequencerEvent::Accept,
            ) => SequencerState::Confirmed { suggestion },

            (
                SequencerState::ShowingSuggestion { need, suggestion },
                SequencerEvent::Reject,
            ) => SequencerState::LoadingQuestion {
                need,
                rejected_title: suggestion.title,
            },

            (
                SequencerState::LoadingQuestion {
                    need,
                    rejected_title,
                },
                SequencerEvent::QuestionLoaded(question),
            ) => SequencerState::ShowingQuestion {
                need,
                rejected_title,
                question,
            },

            (
                SequencerState::ShowingQuestion {
                    need,
                    rejected_title,
                    ..
                },
                SequencerEvent::SubmitAnswer(answer),
            ) => SequencerState::LoadingRefinement {
                need,
                rejected_title,
                answer,
            },

            (
                SequencerState::LoadingRefinement { need, .. },
                SequencerEvent::RefinementLoaded(suggestion),
            ) => SequencerState::ShowingRefinement { need, suggestion },

            (
                SequencerState::ShowingRefinement { suggestion, .. },
                SequencerEvent::Accept,
            ) => SequencerState::Confirmed { suggestion },

            (
                SequencerState::ShowingRefinement { need, suggestion },
                SequencerEvent::BeginEdit,
            ) => SequencerState::Editing { need, suggestion },

            (
                SequencerState::Editing { need, .. },
                SequencerEvent::SubmitEdit(title),
            ) => {
                let final_query = title.to_lowercase();
                SequencerState::ShowingRefinement {
                    need,
                    suggestion: RoleSuggestion { title, final_query },
                }
            }

            // Any loading state can fail; the Error state remembers what
            // was being attempted so Retry re-issues the same call.
            (state, SequencerEvent::LoadFailed(message)) => match state.pending_call() {
                Some(failed) => SequencerState::Error { failed, message },
                None => state,
            },

            (SequencerState::Error { failed, .. }, SequencerEvent::Retry) => match failed {
                PendingCall::Suggest { need } => SequencerState::LoadingSuggestion { need },
                PendingCall::Clarify {
                    need,
                    rejected_title,
                } => SequencerState::LoadingQuestion {
                    need,
                    rejected_title,
                },
                PendingCall::Refine {
                    need,
                    rejected_title,
                    answer,
                } => SequencerState::LoadingRefinement {
                    need,
                    rejected_title,
                    answer,
                },
            },

            // Everything else is a no-op: stay put.
            (state, _) => state,
        }
    }
}
