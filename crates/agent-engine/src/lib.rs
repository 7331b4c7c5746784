//! Agent-facing tools over the prompt-engine registry.
//!
//! An LLM agent configures its own working prompt in four calls: list the
//! pipelines, list the stages of the chosen pipelines, list the strategies of
//! the chosen stages, then compose the chosen strategies into one prompt.
//! Each call is a function-calling [`Tool`](tools::core::Tool) dispatched
//! through a [`ToolSet`](tools::core::ToolSet).
//!
//! # Library usage
//!
//! ```
//! use agent_engine::WorkflowConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> agent_engine::Result<()> {
//! let config = WorkflowConfig::default();
//! let orchestrator = config.build_orchestrator()?;
//! let tools = config.build_tool_set(&orchestrator)?;
//!
//! let pipelines = tools.execute("get_available_pipelines", "{}").await;
//! assert!(pipelines.contains("EDA"));
//!
//! let prompt = tools
//!     .execute("compose_prompt", r#"{"strategy_ids": ["csv", "impute_median"]}"#)
//!     .await;
//! assert!(prompt.starts_with("## Data ingestion: CSV"));
//! # Ok(())
//! # }
//! ```
//!
//! # Binary
//!
//! The `agent-engine` binary inspects the same setup without an LLM:
//!
//! ```sh
//! agent-engine tools
//! agent-engine call get_available_stages --args '{"pipeline_ids": ["eda"]}'
//! ```

pub mod config;
pub mod error;
pub mod prompt;
pub mod tools;

pub use config::{LlmConfig, WorkflowConfig};
pub use error::{AgentError, Result};
pub use prompt::planning_system_prompt;
pub use tools::PromptConfigurationToolsExt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generate a JSON Schema `serde_json::Value` from a type implementing
/// [`JsonSchema`].
///
/// ```
/// use agent_engine::json_schema_for;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct ComposeArgs {
///     /// Strategy ids, in order.
///     strategy_ids: Vec<String>,
/// }
///
/// let schema = json_schema_for::<ComposeArgs>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"strategy_ids".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

// ── Tool definitions ───────────────────────────────────────────────

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ToolType {
    #[serde(rename = "function")]
    Function,
}

/// Tool definition handed to an LLM API (OpenAI function-calling format).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolDef {
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub function: FunctionDef,
}

impl ToolDef {
    /// Create a function-calling tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: ToolType::Function,
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
