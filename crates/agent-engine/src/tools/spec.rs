//! Structured tool descriptions with usage guidance.
//!
//! A [`ToolSpec`] turns purpose, usage guidance, call order and examples into
//! the single description string an LLM sees, so every tool in the workflow
//! reads the same way.

use crate::ToolDef;

/// A tool specification with usage guidance.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Tool name (unique within a ToolSet).
    pub name: String,
    /// One-sentence imperative purpose.
    pub purpose: String,
    pub when_to_use: String,
    /// Steers the LLM away from this tool when a sibling fits better.
    pub when_not_to_use: String,
    /// Tools that must have been called before this one, in order.
    pub call_after: Vec<String>,
    /// JSON Schema of the arguments.
    pub parameters: serde_json::Value,
    /// `(call, result)` pairs.
    pub examples: Vec<(String, String)>,
    pub output_format: String,
}

impl ToolSpec {
    pub fn builder(name: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            name: name.into(),
            purpose: None,
            when_to_use: None,
            when_not_to_use: None,
            call_after: Vec::new(),
            parameters: None,
            examples: Vec::new(),
            output_format: None,
        }
    }

    /// Render the description string handed to the LLM.
    pub fn to_description(&self) -> String {
        let mut lines = vec![
            format!("{}.", self.purpose),
            format!("When to use: {}", self.when_to_use),
            format!("When NOT to use: {}", self.when_not_to_use),
        ];
        if !self.call_after.is_empty() {
            lines.push(format!("Call after: {}", self.call_after.join(", ")));
        }
        if !self.examples.is_empty() {
            lines.push("Examples:".into());
            lines.extend(
                self.examples
                    .iter()
                    .map(|(call, result)| format!("  - {call} → {result}")),
            );
        }
        lines.push(format!("Output format: {}", self.output_format));
        lines.join("\n")
    }

    pub fn to_tool_def(&self) -> ToolDef {
        ToolDef::new(
            self.name.clone(),
            self.to_description(),
            self.parameters.clone(),
        )
    }
}

/// Builder for [`ToolSpec`]. `build()` panics if a required field is
/// missing, which surfaces incomplete tools at registration time.
pub struct ToolSpecBuilder {
    name: String,
    purpose: Option<String>,
    when_to_use: Option<String>,
    when_not_to_use: Option<String>,
    call_after: Vec<String>,
    parameters: Option<serde_json::Value>,
    examples: Vec<(String, String)>,
    output_format: Option<String>,
}

impl ToolSpecBuilder {
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn when_to_use(mut self, when: impl Into<String>) -> Self {
        self.when_to_use = Some(when.into());
        self
    }

    pub fn when_not_to_use(mut self, when_not: impl Into<String>) -> Self {
        self.when_not_to_use = Some(when_not.into());
        self
    }

    pub fn call_after(mut self, tool: impl Into<String>) -> Self {
        self.call_after.push(tool.into());
        self
    }

    pub fn parameters(mut self, params: serde_json::Value) -> Self {
        self.parameters = Some(params);
        self
    }

    /// Derive the parameter schema from the argument type, so schema and
    /// deserialization cannot drift apart.
    pub fn parameters_for<T: schemars::JsonSchema>(self) -> Self {
        self.parameters(crate::json_schema_for::<T>())
    }

    pub fn example(mut self, call: impl Into<String>, result: impl Into<String>) -> Self {
        self.examples.push((call.into(), result.into()));
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    /// Shortcut for `.build().to_tool_def()`.
    pub fn to_tool_def(self) -> ToolDef {
        self.build().to_tool_def()
    }

    pub fn build(self) -> ToolSpec {
        ToolSpec {
            name: self.name,
            purpose: self.purpose.expect("ToolSpec requires 'purpose'"),
            when_to_use: self.when_to_use.expect("ToolSpec requires 'when_to_use'"),
            when_not_to_use: self
                .when_not_to_use
                .expect("ToolSpec requires 'when_not_to_use'"),
            call_after: self.call_after,
            parameters: self.parameters.expect("ToolSpec requires 'parameters'"),
            examples: self.examples,
            output_format: self.output_format.unwrap_or_else(|| "Plain text".into()),
        }
    }
}
