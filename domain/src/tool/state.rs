//! Invocation state machine.
//!
//! Every dispatch walks the same path; nothing is persisted between states.
//!
//! ```text
//! Received ──> Validated ──> Executing  ──> Completed
//!    │                  └──> Generating ──┘
//!    └──────────────────────────────────────> Failed
//! ```
//!
//! `Failed` is reachable from every non-terminal state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationState {
    Received,
    Validated,
    /// External process running
    Executing,
    /// Template rendering
    Generating,
    Completed,
    Failed,
}

impl InvocationState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Executing => "executing",
            Self::Generating => "generating",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn can_transition_to(&self, next: InvocationState) -> bool {
        use InvocationState::*;
        match (self, next) {
            (Completed | Failed, _) => false,
            (_, Failed) => true,
            (Received, Validated) => true,
            (Validated, Executing | Generating) => true,
            (Executing | Generating, Completed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for InvocationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::InvocationState::*;

    #[test]
    fn test_happy_paths() {
        assert!(Received.can_transition_to(Validated));
        assert!(Validated.can_transition_to(Executing));
        assert!(Validated.can_transition_to(Generating));
        assert!(Executing.can_transition_to(Completed));
        assert!(Generating.can_transition_to(Completed));
    }

    #[test]
    fn test_failure_from_any_live_state() {
        for state in [Received, Validated, Executing, Generating] {
            assert!(state.can_transition_to(Failed), "{state} -> failed");
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(Completed.is_terminal());
        assert!(Failed.is_terminal());
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Received));
    }

    #[test]
    fn test_no_skipping_validation() {
        assert!(!Received.can_transition_to(Executing));
        assert!(!Received.can_transition_to(Completed));
        assert!(!Validated.can_transition_to(Completed));
    }
}
