//! Tool abstraction for LLM function-calling agents.
//!
//! The [`Tool`] trait defines what every tool provides: a static API
//! definition (name, description, JSON schema) and an async `execute`
//! method. Tools are collected into a [`ToolSet`] which handles dispatch,
//! argument validation and definition export.

use crate::ToolDef;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info, trace};

/// Boxed future returned by [`Tool::execute`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = String> + Send + 'a>>;

// ── Tool trait ─────────────────────────────────────────────────────

/// A tool that an LLM agent can invoke via function-calling.
///
/// Implementors provide:
/// - A static definition ([`Tool::definition`]) describing the tool's name,
///   description, and JSON Schema parameters for the LLM.
/// - An async [`Tool::execute`] method that receives the raw JSON arguments
///   string and returns the observation text.
pub trait Tool: Send + Sync {
    /// The tool definition sent to the LLM API.
    fn definition(&self) -> ToolDef;

    /// Execute the tool with the given raw JSON arguments string.
    ///
    /// Failures are reported as `"Error ..."` text, never as panics: the
    /// caller relays the string to the agent either way.
    fn execute(&self, arguments: &str) -> ToolFuture<'_>;

    /// The tool's name (delegates to the definition).
    fn name(&self) -> String {
        self.definition().function.name
    }
}

// ── ToolSet ────────────────────────────────────────────────────────

/// A collection of tools dispatched by name.
///
/// Tools keep their registration order, so [`definitions`](Self::definitions)
/// lists them the way the agent is expected to use them.
///
/// ```ignore
/// let tools = ToolSet::new()
///     .with_arg_validation(true)
///     .with_prompt_configuration_tools(&orchestrator);
/// let defs = tools.definitions();
/// ```
pub struct ToolSet {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
    /// Whether to validate tool arguments against JSON Schema before execution.
    validate_args: bool,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.names())
            .field("validate_args", &self.validate_args)
            .finish()
    }
}

impl ToolSet {
    /// Create an empty tool set.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            validate_args: false,
        }
    }

    /// Enable JSON Schema argument validation before tool execution.
    pub fn with_arg_validation(mut self, enabled: bool) -> Self {
        self.validate_args = enabled;
        self
    }

    /// Register a tool. Replaces any existing tool with the same name,
    /// keeping its original position.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name();
        match self.index.get(&name) {
            Some(&pos) => self.tools[pos] = Box::new(tool),
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(Box::new(tool));
            }
        }
    }

    /// Register a tool (builder pattern).
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(tool);
        self
    }

    /// All tool definitions for the LLM API, in registration order.
    pub fn definitions(&self) -> Vec<ToolDef> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Registered tool names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool call by name.
    ///
    /// Blank arguments are read as `{}`. With validation enabled, arguments
    /// are checked against the tool's declared JSON Schema first so the LLM
    /// gets a precise error to self-correct from. Unknown tool names produce
    /// an error string.
    pub async fn execute(&self, name: &str, arguments: &str) -> String {
        let Some(tool) = self.index.get(name).map(|&pos| &self.tools[pos]) else {
            return format!("Error: unknown tool '{name}'");
        };
        let arguments = if arguments.trim().is_empty() {
            "{}"
        } else {
            arguments
        };

        if self.validate_args
            && let Some(error) = validate_tool_arguments(tool.as_ref(), arguments)
        {
            debug!("Tool {name} rejected arguments");
            return error;
        }

        log_tool_call(name, arguments);
        let start = std::time::Instant::now();
        let result = tool.execute(arguments).await;
        let elapsed = start.elapsed();
        debug!(
            "Tool {name} completed in {:.2}ms ({} bytes)",
            elapsed.as_secs_f64() * 1000.0,
            result.len()
        );
        trace!(
            "Tool {name} result preview: {}",
            result.chars().take(300).collect::<String>()
        );
        result
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Validate tool arguments against the tool's declared JSON Schema.
///
/// Returns `None` if valid, or `Some(error_string)` formatted for the LLM.
pub fn validate_tool_arguments(tool: &dyn Tool, arguments: &str) -> Option<String> {
    let args_value: serde_json::Value = match serde_json::from_str(arguments) {
        Ok(v) => v,
        Err(e) => {
            return Some(format!(
                "Error: invalid JSON arguments for tool '{}': {e}. \
                 Please provide valid JSON matching the tool's parameter schema.",
                tool.name()
            ));
        }
    };

    let schema = tool.definition().function.parameters;
    // An invalid schema is the tool author's bug; skip validation.
    let validator = jsonschema::validator_for(&schema).ok()?;

    let errors: Vec<String> = validator
        .iter_errors(&args_value)
        .map(|e| format!("  - {}: {e}", e.instance_path()))
        .collect();

    if errors.is_empty() {
        None
    } else {
        Some(format!(
            "Error: argument validation failed for tool '{}':\n{}\n\
             Please fix the arguments and try again.",
            tool.name(),
            errors.join("\n")
        ))
    }
}

/// Log a tool call at INFO level with a truncated preview of arguments.
pub fn log_tool_call(name: &str, arguments: &str) {
    let args_preview: String = arguments.chars().take(120).collect();
    info!(
        "[tool] {}({args_preview}{})",
        name,
        if arguments.chars().count() > 120 { "..." } else { "" }
    );
    trace!("[tool] {name} arguments: {arguments}");
}

/// Parse raw JSON arguments into a typed struct.
///
/// The error string is suitable for returning directly from
/// [`Tool::execute`].
pub fn parse_tool_args<T: serde::de::DeserializeOwned>(arguments: &str) -> Result<T, String> {
    serde_json::from_str(arguments).map_err(|e| {
        format!(
            "Error: invalid tool arguments: {e}. \
             Please provide valid JSON matching the tool's parameter schema."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct EchoArgs {
        /// Text to echo back.
        text: String,
    }

    struct Echo(&'static str);

    impl Tool for Echo {
        fn definition(&self) -> ToolDef {
            ToolDef::new(self.0, "Echo text", crate::json_schema_for::<EchoArgs>())
        }

        fn execute(&self, arguments: &str) -> ToolFuture<'_> {
            let arguments = arguments.to_string();
            Box::pin(async move {
                match parse_tool_args::<EchoArgs>(&arguments) {
                    Ok(args) => args.text,
                    Err(e) => e,
                }
            })
        }
    }

    #[test]
    fn registration_order_is_kept() {
        let tools = ToolSet::new().with(Echo("b")).with(Echo("a")).with(Echo("c"));
        assert_eq!(tools.names(), vec!["b", "a", "c"]);
        let defs = tools.definitions();
        assert_eq!(defs[1].function.name, "a");
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut tools = ToolSet::new().with(Echo("a")).with(Echo("b"));
        tools.register(Echo("a"));
        assert_eq!(tools.len(), 2);
        assert_eq!(tools.names(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_string() {
        let tools = ToolSet::new();
        assert_eq!(
            tools.execute("nope", "{}").await,
            "Error: unknown tool 'nope'"
        );
    }

    #[tokio::test]
    async fn validation_reports_missing_field() {
        let tools = ToolSet::new().with_arg_validation(true).with(Echo("echo"));
        let result = tools.execute("echo", "{}").await;
        assert!(result.starts_with("Error: argument validation failed for tool 'echo'"));
        assert!(result.contains("text"));
    }

    #[tokio::test]
    async fn validation_reports_bad_json() {
        let tools = ToolSet::new().with_arg_validation(true).with(Echo("echo"));
        let result = tools.execute("echo", "{not json").await;
        assert!(result.starts_with("Error: invalid JSON arguments"));
    }

    #[tokio::test]
    async fn blank_arguments_read_as_empty_object() {
        let tools = ToolSet::new().with(Echo("echo"));
        let result = tools.execute("echo", "  ").await;
        // Reaches the tool, which then fails to find `text`.
        assert!(result.starts_with("Error: invalid tool arguments"));
    }

    #[tokio::test]
    async fn valid_call_dispatches() {
        let tools = ToolSet::new().with_arg_validation(true).with(Echo("echo"));
        assert_eq!(tools.execute("echo", r#"{"text": "hi"}"#).await, "hi");
    }
}
