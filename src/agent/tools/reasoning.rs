//! Reasoning scratchpad backing the `think` and `analyze` tools.
//!
//! Both tools execute locally: they echo the model's reasoning back as a
//! tool result so it stays in the conversation context. Constructed with
//! a flag controlling whether usage instructions are contributed to the
//! system prompt.

/// Instructions contributed to the system prompt when enabled.
const REASONING_INSTRUCTIONS: &str = r"# Reasoning Tools

You have think and analyze tools for structured reasoning:
- Call think BEFORE researching to lay out your plan.
- Call analyze AFTER gathering sources to assess what the evidence shows
  and decide whether to continue, validate, or write the final answer.
- Reasoning recorded with these tools is for your own use; do not repeat
  it verbatim in the final report.";

/// Local reasoning toolkit.
#[derive(Debug, Clone)]
pub struct ReasoningToolkit {
    add_instructions: bool,
}

impl ReasoningToolkit {
    /// Creates the toolkit. When `add_instructions` is set, usage
    /// instructions are appended to the agent's system prompt.
    #[must_use]
    pub const fn new(add_instructions: bool) -> Self {
        Self { add_instructions }
    }

    /// System-prompt instructions for these tools, if enabled.
    #[must_use]
    pub const fn instructions(&self) -> Option<&'static str> {
        if self.add_instructions {
            Some(REASONING_INSTRUCTIONS)
        } else {
            None
        }
    }

    /// Executes the `think` tool: acknowledges the recorded thought.
    #[must_use]
    pub fn think(&self, thought: &str) -> String {
        format!("Thought recorded: {thought}")
    }

    /// Executes the `analyze` tool: acknowledges the analysis and the
    /// chosen next action.
    #[must_use]
    pub fn analyze(&self, analysis: &str, next_action: &str) -> String {
        format!("Analysis recorded (next action: {next_action}): {analysis}")
    }
}
