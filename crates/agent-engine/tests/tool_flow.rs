//! Integration tests for the agent-facing tool sequence.
//!
//! These drive the configured ToolSet exactly the way an agent would:
//! pipelines, then stages, then strategies, then composition.

use agent_engine::tools::names;
use agent_engine::{AgentError, WorkflowConfig};
use prompt_engine::{Pipeline, SharedOrchestrator, Stage, Strategy};
use std::io::Write;

fn default_setup() -> (SharedOrchestrator, agent_engine::tools::core::ToolSet) {
    let config = WorkflowConfig::default();
    let orchestrator = config.build_orchestrator().unwrap();
    let tools = config.build_tool_set(&orchestrator).unwrap();
    (orchestrator, tools)
}

// ── Full workflow ────────────────────────────────────────────────────

#[tokio::test]
async fn agent_walks_the_hierarchy_and_composes() {
    let (orchestrator, tools) = default_setup();

    let pipelines = tools.execute(names::GET_AVAILABLE_PIPELINES, "").await;
    assert!(pipelines.contains("EDA "));

    let stages = tools
        .execute(names::GET_AVAILABLE_STAGES, r#"{"pipeline_ids": ["EDA"]}"#)
        .await;
    assert!(stages.contains("- MISSING_VALUES"));
    assert!(stages.contains("- DATA_INGESTION"));

    let strategies = tools
        .execute(
            names::GET_AVAILABLE_STRATEGIES,
            r#"{"stage_ids": ["DATA_INGESTION", "MISSING_VALUES"]}"#,
        )
        .await;
    assert!(strategies.contains("Stage: DATA_INGESTION"));
    assert!(strategies.contains("- IMPUTE_MEDIAN"));

    let prompt = tools
        .execute(
            names::COMPOSE_PROMPT,
            r#"{"strategy_ids": ["CSV", "IMPUTE_MEDIAN"]}"#,
        )
        .await;
    let expected = orchestrator
        .read()
        .get_composed_prompt(&["csv", "impute_median"])
        .unwrap();
    assert_eq!(prompt, expected);
}

#[tokio::test]
async fn schema_validation_catches_wrong_argument_shape() {
    let (_, tools) = default_setup();
    let out = tools
        .execute(names::GET_AVAILABLE_STAGES, r#"{"pipeline_ids": "EDA"}"#)
        .await;
    assert!(out.starts_with("Error: argument validation failed for tool 'get_available_stages'"));
    assert!(out.contains("/pipeline_ids"));
}

#[tokio::test]
async fn empty_id_list_returns_recovery_advice() {
    let (_, tools) = default_setup();
    let out = tools
        .execute(names::COMPOSE_PROMPT, r#"{"strategy_ids": []}"#)
        .await;
    assert!(out.starts_with("Error from tool 'compose_prompt'"));
    assert!(out.contains("Validation error"));
}

#[tokio::test]
async fn unknown_pipeline_suggests_listing_pipelines() {
    let (_, tools) = default_setup();
    let out = tools
        .execute(names::GET_AVAILABLE_STAGES, r#"{"pipeline_ids": ["ETL"]}"#)
        .await;
    assert!(out.contains("Pipeline 'ETL' is not registered"));
    assert!(out.contains("Call get_available_pipelines"));
}

#[tokio::test]
async fn repeated_strategy_listing_is_identical() {
    let (_, tools) = default_setup();
    let args = r#"{"stage_ids": ["missing_values"]}"#;
    let first = tools.execute(names::GET_AVAILABLE_STRATEGIES, args).await;
    let second = tools.execute(names::GET_AVAILABLE_STRATEGIES, args).await;
    assert!(first.contains("Stage: MISSING_VALUES"));
    assert_eq!(first, second);
}

// ── Live registry ────────────────────────────────────────────────────

#[tokio::test]
async fn tools_see_registrations_made_after_setup() {
    let (orchestrator, tools) = default_setup();
    let letter = Stage::new("greeting", "Open the letter")
        .unwrap()
        .with_strategies(vec![
            Strategy::new("formal", "Formal tone", "Dear user,").unwrap(),
        ])
        .unwrap();
    orchestrator
        .add_pipelines(vec![
            Pipeline::new("letters", "Write letters")
                .unwrap()
                .with_stages(vec![letter])
                .unwrap(),
        ])
        .unwrap();

    let pipelines = tools.execute(names::GET_AVAILABLE_PIPELINES, "{}").await;
    assert!(pipelines.contains("LETTERS"));

    orchestrator.remove_pipelines(&["letters"]).unwrap();
    let out = tools
        .execute(names::COMPOSE_PROMPT, r#"{"strategy_ids": ["formal"]}"#)
        .await;
    assert!(out.contains("Strategy 'FORMAL' is not registered"));
}

#[tokio::test]
async fn concurrent_calls_share_one_registry() {
    let (_, tools) = default_setup();
    let tools = std::sync::Arc::new(tools);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tools = tools.clone();
            tokio::spawn(async move {
                tools
                    .execute(names::COMPOSE_PROMPT, r#"{"strategy_ids": ["iqr"]}"#)
                    .await
            })
        })
        .collect();
    let mut outputs = Vec::new();
    for handle in handles {
        outputs.push(handle.await.unwrap());
    }
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    assert!(outputs[0].starts_with("## Outliers: interquartile range"));
}

// ── Config files ─────────────────────────────────────────────────────

#[tokio::test]
async fn config_file_limits_exposed_tools() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tool_names": ["{}"], "validate_args": false}}"#,
        names::COMPOSE_PROMPT
    )
    .unwrap();

    let config = WorkflowConfig::from_path(file.path()).unwrap();
    assert!(!config.validate_args);
    let orchestrator = config.build_orchestrator().unwrap();
    let tools = config.build_tool_set(&orchestrator).unwrap();
    assert_eq!(tools.names(), vec!["compose_prompt"]);
    assert_eq!(
        tools.execute(names::GET_AVAILABLE_PIPELINES, "{}").await,
        "Error: unknown tool 'get_available_pipelines'"
    );
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = WorkflowConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, AgentError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn manifest_serializes_for_an_llm_api() {
    let manifest = WorkflowConfig::default().tool_manifest().unwrap();
    let json = serde_json::to_value(&manifest).unwrap();
    let listed: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["function"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(listed, names::ALL);
    assert_eq!(json[0]["type"], "function");
}
