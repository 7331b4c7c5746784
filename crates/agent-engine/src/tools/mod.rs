//! Tool layer: the [`Tool`](self::core::Tool) trait, the [`ToolSet`](self::core::ToolSet)
//! dispatcher, and the prompt-configuration tools built on them.

pub mod core;
pub mod names;
pub mod prompt_configuration;
pub mod reflection;
pub mod spec;

pub use prompt_configuration::{
    ComposePrompt, GetAvailablePipelines, GetAvailableStages, GetAvailableStrategies,
};

use crate::error::{AgentError, Result};
use self::core::ToolSet;
use prompt_engine::SharedOrchestrator;

// ── Extension trait ─────────────────────────────────────────────────

/// Extension trait for registering the prompt-configuration tools on a
/// [`ToolSet`].
///
/// ```ignore
/// let tools = ToolSet::new().with_prompt_configuration_tools(&orchestrator);
/// ```
pub trait PromptConfigurationToolsExt: Sized {
    /// Register all four tools, in workflow order.
    fn with_prompt_configuration_tools(self, orchestrator: &SharedOrchestrator) -> Self;

    /// Register only the named tools, in the order given. Fails on an
    /// unknown name.
    fn with_named_tools<S: AsRef<str>>(
        self,
        orchestrator: &SharedOrchestrator,
        tool_names: &[S],
    ) -> Result<Self>;
}

impl PromptConfigurationToolsExt for ToolSet {
    fn with_prompt_configuration_tools(self, orchestrator: &SharedOrchestrator) -> Self {
        self.with(GetAvailablePipelines::new(orchestrator.clone()))
            .with(GetAvailableStages::new(orchestrator.clone()))
            .with(GetAvailableStrategies::new(orchestrator.clone()))
            .with(ComposePrompt::new(orchestrator.clone()))
    }

    fn with_named_tools<S: AsRef<str>>(
        mut self,
        orchestrator: &SharedOrchestrator,
        tool_names: &[S],
    ) -> Result<Self> {
        for name in tool_names {
            let orchestrator = orchestrator.clone();
            match name.as_ref() {
                names::GET_AVAILABLE_PIPELINES => {
                    self.register(GetAvailablePipelines::new(orchestrator))
                }
                names::GET_AVAILABLE_STAGES => self.register(GetAvailableStages::new(orchestrator)),
                names::GET_AVAILABLE_STRATEGIES => {
                    self.register(GetAvailableStrategies::new(orchestrator))
                }
                names::COMPOSE_PROMPT => self.register(ComposePrompt::new(orchestrator)),
                other => {
                    return Err(AgentError::UnknownTool {
                        name: other.to_string(),
                    });
                }
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_all_in_workflow_order() {
        let tools = ToolSet::new().with_prompt_configuration_tools(&SharedOrchestrator::default());
        assert_eq!(tools.names(), names::ALL);
    }

    #[test]
    fn named_subset_keeps_given_order() {
        let tools = ToolSet::new()
            .with_named_tools(
                &SharedOrchestrator::default(),
                &[names::COMPOSE_PROMPT, names::GET_AVAILABLE_PIPELINES],
            )
            .unwrap();
        assert_eq!(tools.names(), vec!["compose_prompt", "get_available_pipelines"]);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = ToolSet::new()
            .with_named_tools(&SharedOrchestrator::default(), &["shell"])
            .unwrap_err();
        assert!(matches!(err, AgentError::UnknownTool { name } if name == "shell"));
    }
}
