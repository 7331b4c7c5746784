//! Workflow configuration with sensible defaults.
//!
//! [`WorkflowConfig`] captures what a prompt-configuration agent needs and
//! converts it into engine types via
//! [`build_orchestrator`](WorkflowConfig::build_orchestrator) and
//! [`build_tool_set`](WorkflowConfig::build_tool_set). Every field has a
//! default, so a config file only lists what it overrides:
//!
//! ```json
//! {
//!   "llm": { "model": "claude-sonnet-4", "temperature": 0.2 },
//!   "tool_names": ["get_available_pipelines", "compose_prompt"]
//! }
//! ```

use crate::ToolDef;
use crate::error::{AgentError, Result};
use crate::prompt::planning_system_prompt;
use crate::tools::PromptConfigurationToolsExt;
use crate::tools::core::ToolSet;
use crate::tools::names;
use prompt_engine::{Orchestrator, SharedOrchestrator, catalog};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// LLM settings the hosting agent should use. Nothing here is called by
/// this crate; it is carried so one file configures the whole workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name. Default: `"anthropic"`.
    pub provider: String,
    /// Model identifier. Default: provider's choice.
    pub model: Option<String>,
    /// Sampling temperature in `[0, 1]`. Default: `0.0`.
    pub temperature: f32,
    /// Maximum tokens per response. Default: `3000`.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: None,
            temperature: 0.0,
            max_tokens: 3000,
        }
    }
}

/// Configuration for a prompt-configuration workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub llm: LlmConfig,
    /// Tools to expose, in order. Default: all four.
    pub tool_names: Vec<String>,
    /// System prompt for the agent. Default: [`planning_system_prompt`].
    pub system_prompt: String,
    /// Validate tool arguments against their JSON Schema. Default: `true`.
    pub validate_args: bool,
    /// Register the built-in catalog on startup. Default: `true`.
    pub register_builtin_catalog: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            tool_names: names::ALL.iter().map(|s| (*s).to_string()).collect(),
            system_prompt: planning_system_prompt(),
            validate_args: true,
            register_builtin_catalog: true,
        }
    }
}

impl WorkflowConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AgentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(AgentError::config(format!(
                "llm.temperature must be within [0, 1], got {}",
                self.llm.temperature
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(AgentError::config("llm.max_tokens must be positive"));
        }
        if self.tool_names.is_empty() {
            return Err(AgentError::config("tool_names must list at least one tool"));
        }
        for name in &self.tool_names {
            if !names::ALL.contains(&name.as_str()) {
                return Err(AgentError::UnknownTool { name: name.clone() });
            }
        }
        if self.system_prompt.trim().is_empty() {
            return Err(AgentError::config("system_prompt must not be empty"));
        }
        Ok(())
    }

    /// Build the shared orchestrator, with the built-in catalog if enabled.
    pub fn build_orchestrator(&self) -> Result<SharedOrchestrator> {
        let mut orchestrator = Orchestrator::new();
        if self.register_builtin_catalog {
            catalog::register_builtins(&mut orchestrator)?;
        }
        info!(
            "Orchestrator ready: {} pipeline(s), {} stage(s), {} strategy(ies)",
            orchestrator.pipelines().len(),
            orchestrator.stages().len(),
            orchestrator.strategies().len()
        );
        Ok(orchestrator.into())
    }

    /// Build a [`ToolSet`] holding the configured tools.
    pub fn build_tool_set(&self, orchestrator: &SharedOrchestrator) -> Result<ToolSet> {
        self.validate()?;
        ToolSet::new()
            .with_arg_validation(self.validate_args)
            .with_named_tools(orchestrator, &self.tool_names)
    }

    /// Definitions of the configured tools, as sent to an LLM API.
    pub fn tool_manifest(&self) -> Result<Vec<ToolDef>> {
        let tools = self.build_tool_set(&SharedOrchestrator::default())?;
        Ok(tools.definitions())
    }
}
