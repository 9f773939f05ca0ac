//! Operator confirmation as an injected capability.
//!
//! The orchestrator never reads the terminal directly; it asks a
//! [`DecisionProvider`]. The interactive implementation wraps a dialoguer
//! confirm prompt, while [`FixedAnswer`] serves `--yes` runs and tests with
//! a policy answer instead of a human.

use dialoguer::Confirm;

pub trait DecisionProvider {
    /// Asks a yes/no question and returns the decision.
    fn confirm(&self, question: &str) -> bool;
}

/// Interactive terminal prompt, defaulting to yes on plain Enter.
pub struct TerminalPrompt;

impl DecisionProvider for TerminalPrompt {
    fn confirm(&self, question: &str) -> bool {
        Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact()
            .unwrap_or(false)
    }
}

/// Answers every question the same way. Used for non-interactive runs.
pub struct FixedAnswer(pub bool);

impl DecisionProvider for FixedAnswer {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}
