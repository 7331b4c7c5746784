//! The four prompt-configuration tools.
//!
//! | Tool | Name | Purpose |
//! |------|------|---------|
//! | [`GetAvailablePipelines`] | `get_available_pipelines` | List registered pipelines |
//! | [`GetAvailableStages`] | `get_available_stages` | List the stages of chosen pipelines |
//! | [`GetAvailableStrategies`] | `get_available_strategies` | List the strategies of chosen stages |
//! | [`ComposePrompt`] | `compose_prompt` | Join chosen strategy prompts into one prompt |
//!
//! Each tool reads the registry through a [`SharedOrchestrator`]. Listings
//! are rendered text followed by selection instructions; failures come back
//! as [`reflection`](super::reflection) text.

use super::core::{Tool, ToolFuture, parse_tool_args};
use super::names;
use super::reflection::format_tool_failure;
use super::spec::ToolSpec;
use crate::ToolDef;
use prompt_engine::{EngineError, SharedOrchestrator, render_groups, render_summaries};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

const PIPELINE_INSTRUCTIONS: &str = "\
Instructions:
- Read each pipeline description and decide which pipelines fit the user's request.
- Keep the pipeline ids exactly as listed.
- Pass the chosen ids, in the order they should run, to get_available_stages.
- If no pipeline fits, tell the user the request is outside the supported workflows.";

const STAGE_INSTRUCTIONS: &str = "\
Instructions:
- Keep only the stages the user's request actually needs.
- Preserve the stage order defined by each pipeline.
- Stages from several pipelines may be combined when they are compatible.
- Pass the chosen stage ids to get_available_strategies.
- If no stage applies, tell the user the request is outside the supported stages.";

const STRATEGY_INSTRUCTIONS: &str = "\
Instructions:
- For each stage, pick the strategy whose description matches the data and the request.
- More than one strategy per stage is allowed when the request calls for it.
- Order the chosen strategy ids the way their instructions should be applied.
- Pass that ordered list to compose_prompt.";

const NO_PIPELINES: &str = "No pipelines are registered. Tell the user that no workflows are available.";

/// Turn a registry result into observation text.
fn observe(tool: &str, arguments: &str, result: Result<String, EngineError>) -> String {
    result.unwrap_or_else(|e| format_tool_failure(tool, arguments, &e))
}

// ── GetAvailablePipelines ───────────────────────────────────────────

/// Arguments for `get_available_pipelines` (none).
#[derive(Deserialize, JsonSchema)]
pub struct GetAvailablePipelinesArgs {}

/// List every registered pipeline with its description.
pub struct GetAvailablePipelines {
    orchestrator: SharedOrchestrator,
}

impl GetAvailablePipelines {
    pub fn new(orchestrator: SharedOrchestrator) -> Self {
        Self { orchestrator }
    }

    fn render(&self) -> String {
        let summaries = self.orchestrator.read().get_pipelines_usage_summary();
        if summaries.is_empty() {
            return NO_PIPELINES.to_string();
        }
        format!(
            "Available pipelines:\n{}\n\n{PIPELINE_INSTRUCTIONS}",
            render_summaries(&summaries)
        )
    }
}

impl Tool for GetAvailablePipelines {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder(names::GET_AVAILABLE_PIPELINES)
            .purpose("List the registered pipelines and what each one is for")
            .when_to_use(
                "First, before any other prompt-configuration tool, to find the workflows \
                 that can handle the user's request",
            )
            .when_not_to_use(
                "When pipelines are already chosen; use get_available_stages to inspect them",
            )
            .parameters_for::<GetAvailablePipelinesArgs>()
            .example("get_available_pipelines()", "EDA                  : Use to perform ...")
            .output_format("One `ID : description` line per pipeline, then instructions")
            .to_tool_def()
    }

    fn execute(&self, _arguments: &str) -> ToolFuture<'_> {
        let result = self.render();
        Box::pin(async move { result })
    }
}

// ── GetAvailableStages ──────────────────────────────────────────────

/// Arguments for `get_available_stages`.
#[derive(Deserialize, JsonSchema)]
pub struct GetAvailableStagesArgs {
    /// Ids of the chosen pipelines, in order.
    pub pipeline_ids: Vec<String>,
}

/// List the stages of the chosen pipelines.
pub struct GetAvailableStages {
    orchestrator: SharedOrchestrator,
}

impl GetAvailableStages {
    pub fn new(orchestrator: SharedOrchestrator) -> Self {
        Self { orchestrator }
    }

    fn render(&self, args: &GetAvailableStagesArgs) -> Result<String, EngineError> {
        let groups = self
            .orchestrator
            .read()
            .get_pipelines_stages_summary(&args.pipeline_ids)?;
        Ok(format!("{}\n\n{STAGE_INSTRUCTIONS}", render_groups(&groups)))
    }
}

impl Tool for GetAvailableStages {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder(names::GET_AVAILABLE_STAGES)
            .purpose("List the stages of the selected pipelines, in pipeline order")
            .when_to_use("After choosing pipelines, to decide which stages the request needs")
            .when_not_to_use(
                "Before choosing pipelines; call get_available_pipelines first. \
                 To see strategies, use get_available_strategies",
            )
            .call_after(names::GET_AVAILABLE_PIPELINES)
            .parameters_for::<GetAvailableStagesArgs>()
            .example(
                r#"get_available_stages(pipeline_ids=["EDA"])"#,
                "Pipeline: EDA / ├── Stages Overview: / - CARDINALITY_ANALYSIS : ...",
            )
            .output_format("One stage overview per pipeline, then instructions")
            .to_tool_def()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let result = match parse_tool_args::<GetAvailableStagesArgs>(arguments) {
            Ok(args) => {
                debug!("Listing stages of {} pipeline(s)", args.pipeline_ids.len());
                observe(names::GET_AVAILABLE_STAGES, arguments, self.render(&args))
            }
            Err(e) => e,
        };
        Box::pin(async move { result })
    }
}

// ── GetAvailableStrategies ──────────────────────────────────────────

/// Arguments for `get_available_strategies`.
#[derive(Deserialize, JsonSchema)]
pub struct GetAvailableStrategiesArgs {
    /// Ids of the chosen stages, in order.
    pub stage_ids: Vec<String>,
}

/// List the strategies of the chosen stages.
pub struct GetAvailableStrategies {
    orchestrator: SharedOrchestrator,
}

impl GetAvailableStrategies {
    pub fn new(orchestrator: SharedOrchestrator) -> Self {
        Self { orchestrator }
    }

    fn render(&self, args: &GetAvailableStrategiesArgs) -> Result<String, EngineError> {
        let groups = self
            .orchestrator
            .read()
            .get_stages_strategies_summary(&args.stage_ids)?;
        Ok(format!(
            "{}\n\n{STRATEGY_INSTRUCTIONS}",
            render_groups(&groups)
        ))
    }
}

impl Tool for GetAvailableStrategies {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder(names::GET_AVAILABLE_STRATEGIES)
            .purpose("List the strategies available in the selected stages")
            .when_to_use("After choosing stages, to pick how each stage should be carried out")
            .when_not_to_use(
                "Before choosing stages; call get_available_stages first. \
                 To get prompt text, use compose_prompt",
            )
            .call_after(names::GET_AVAILABLE_PIPELINES)
            .call_after(names::GET_AVAILABLE_STAGES)
            .parameters_for::<GetAvailableStrategiesArgs>()
            .example(
                r#"get_available_strategies(stage_ids=["MISSING_VALUES"])"#,
                "Stage: MISSING_VALUES / ├── Strategies Overview: / - IMPUTE_MEAN : ...",
            )
            .output_format("One strategy overview per stage, then instructions")
            .to_tool_def()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let result = match parse_tool_args::<GetAvailableStrategiesArgs>(arguments) {
            Ok(args) => {
                debug!("Listing strategies of {} stage(s)", args.stage_ids.len());
                observe(names::GET_AVAILABLE_STRATEGIES, arguments, self.render(&args))
            }
            Err(e) => e,
        };
        Box::pin(async move { result })
    }
}

// ── ComposePrompt ───────────────────────────────────────────────────

/// Arguments for `compose_prompt`.
#[derive(Deserialize, JsonSchema)]
pub struct ComposePromptArgs {
    /// Ids of the chosen strategies. Order matters: prompts are joined in
    /// this order.
    pub strategy_ids: Vec<String>,
}

/// Join the prompts of the chosen strategies into the working prompt.
pub struct ComposePrompt {
    orchestrator: SharedOrchestrator,
}

impl ComposePrompt {
    pub fn new(orchestrator: SharedOrchestrator) -> Self {
        Self { orchestrator }
    }
}

impl Tool for ComposePrompt {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder(names::COMPOSE_PROMPT)
            .purpose("Compose the prompts of the selected strategies into one working prompt")
            .when_to_use(
                "Last, once every needed strategy is chosen; follow the returned prompt to \
                 answer the user",
            )
            .when_not_to_use(
                "To browse options; the listing tools show descriptions without prompt text",
            )
            .call_after(names::GET_AVAILABLE_PIPELINES)
            .call_after(names::GET_AVAILABLE_STAGES)
            .call_after(names::GET_AVAILABLE_STRATEGIES)
            .parameters_for::<ComposePromptArgs>()
            .example(
                r#"compose_prompt(strategy_ids=["CSV", "IMPUTE_MEDIAN"])"#,
                "CSV prompt, newline, IMPUTE_MEDIAN prompt",
            )
            .output_format("The strategy prompts joined by newlines, in the requested order")
            .to_tool_def()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let result = match parse_tool_args::<ComposePromptArgs>(arguments) {
            Ok(args) => {
                let composed = self
                    .orchestrator
                    .read()
                    .get_composed_prompt(&args.strategy_ids);
                observe(names::COMPOSE_PROMPT, arguments, composed)
            }
            Err(e) => e,
        };
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_engine::{Orchestrator, Pipeline, Stage, Strategy};

    fn shared() -> SharedOrchestrator {
        let stage = Stage::new("greeting", "Open the letter")
            .unwrap()
            .with_strategies(vec![
                Strategy::new("formal", "Formal tone", "Dear user,").unwrap(),
                Strategy::new("casual", "Casual tone", "Hey there!").unwrap(),
            ])
            .unwrap();
        let pipeline = Pipeline::new("letters", "Write letters")
            .unwrap()
            .with_stages(vec![stage])
            .unwrap();
        let mut orch = Orchestrator::new();
        orch.add_pipelines(vec![pipeline]).unwrap();
        orch.into()
    }

    #[tokio::test]
    async fn pipelines_listing_has_usage_lines_and_instructions() {
        let tool = GetAvailablePipelines::new(shared());
        let out = tool.execute("{}").await;
        assert!(out.contains(&format!("{:<20} : Write letters", "LETTERS")));
        assert!(out.contains("get_available_stages"));
    }

    #[tokio::test]
    async fn empty_registry_lists_no_pipelines() {
        let tool = GetAvailablePipelines::new(SharedOrchestrator::default());
        assert_eq!(tool.execute("{}").await, NO_PIPELINES);
    }

    #[tokio::test]
    async fn stages_listing_renders_overview() {
        let tool = GetAvailableStages::new(shared());
        let out = tool.execute(r#"{"pipeline_ids": ["letters"]}"#).await;
        assert!(out.starts_with("Pipeline: LETTERS\n├── Stages Overview:\n- GREETING"));
        assert!(out.ends_with(STAGE_INSTRUCTIONS));
    }

    #[tokio::test]
    async fn strategies_listing_hides_prompts() {
        let tool = GetAvailableStrategies::new(shared());
        let out = tool.execute(r#"{"stage_ids": ["greeting"]}"#).await;
        assert!(out.contains("- FORMAL"));
        assert!(out.contains("- CASUAL"));
        assert!(!out.contains("Dear user,"));
    }

    #[tokio::test]
    async fn compose_returns_prompt_verbatim() {
        let tool = ComposePrompt::new(shared());
        let out = tool
            .execute(r#"{"strategy_ids": ["casual", "FORMAL"]}"#)
            .await;
        assert_eq!(out, "Hey there!\nDear user,");
    }

    #[tokio::test]
    async fn unknown_ids_become_reflection_text() {
        let stages = GetAvailableStrategies::new(shared());
        let out = stages.execute(r#"{"stage_ids": ["bogus"]}"#).await;
        assert!(out.starts_with("Error from tool 'get_available_strategies'"));
        assert!(out.contains("Stage 'BOGUS' is not registered in the stage registry"));

        let compose = ComposePrompt::new(shared());
        let out = compose.execute(r#"{"strategy_ids": ["formal", "nope"]}"#).await;
        assert!(out.contains("Strategy 'NOPE'"));
        assert!(!out.contains("Dear user,"));
    }

    #[tokio::test]
    async fn malformed_arguments_are_reported() {
        let tool = ComposePrompt::new(shared());
        let out = tool.execute(r#"{"strategy_ids": "formal"}"#).await;
        assert!(out.starts_with("Error: invalid tool arguments"));
    }

    #[test]
    fn definitions_declare_required_arrays() {
        let def = ComposePrompt::new(shared()).definition();
        let params = &def.function.parameters;
        assert_eq!(params["properties"]["strategy_ids"]["type"], "array");
        assert!(
            params["required"]
                .as_array()
                .unwrap()
                .contains(&"strategy_ids".into())
        );
        assert!(def.function.description.contains("Call after: get_available_pipelines"));
    }
}
