//! Structured reflection on tool failures.
//!
//! A failed registry call is turned into observation text that names what
//! went wrong and which tool call would recover, so the agent can retry
//! instead of giving up.

use super::names;
use prompt_engine::{EngineError, RegistryKind};
use std::fmt::Write;

/// Format a registry failure as the observation returned to the agent.
///
/// The message holds the original error, recovery suggestions chosen by the
/// error kind, and a preview of the arguments used.
pub fn format_tool_failure(tool_name: &str, arguments: &str, error: &EngineError) -> String {
    let mut msg = format!("Error from tool '{tool_name}':\n  {error}\n");

    let suggestions = suggestions_for(error);
    if !suggestions.is_empty() {
        msg.push_str("\nPossible causes and recovery:\n");
        for suggestion in &suggestions {
            let _ = writeln!(msg, "  - {suggestion}");
        }
    }

    let args_preview: String = arguments.chars().take(200).collect();
    let _ = write!(msg, "\nArguments used: {args_preview}");
    if arguments.chars().count() > 200 {
        msg.push_str("...");
    }
    msg
}

/// Which discovery tool lists valid ids of a registry level.
fn discovery_tool(kind: RegistryKind) -> &'static str {
    match kind {
        RegistryKind::Pipeline => names::GET_AVAILABLE_PIPELINES,
        RegistryKind::Stage => names::GET_AVAILABLE_STAGES,
        RegistryKind::Strategy => names::GET_AVAILABLE_STRATEGIES,
    }
}

fn suggestions_for(error: &EngineError) -> Vec<String> {
    let mut suggestions = match error {
        EngineError::NotFound { kind, id } => vec![format!(
            "'{id}' is not a known {} id. Ids must be copied exactly from a previous listing.",
            kind.as_str()
        )],
        EngineError::NotInStage { stage, id } => vec![format!(
            "'{id}' is not one of the strategies of stage '{stage}'. Another stage may own it."
        )],
        EngineError::DuplicateKey { kind, id } => {
            return vec![format!(
                "A {} named '{id}' already exists. Reuse it instead of registering it again.",
                kind.as_str()
            )];
        }
        EngineError::Validation { .. } => {
            return vec![
                "Check that the arguments list at least one id.".into(),
                "Only pass ids returned by the discovery tools.".into(),
            ];
        }
    };
    if let Some(kind) = error.kind() {
        suggestions.push(format!(
            "Call {} to list the valid {} ids, then retry.",
            discovery_tool(kind),
            kind.as_str()
        ));
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_stage_points_to_stage_listing() {
        let err = EngineError::not_found(RegistryKind::Stage, "BOGUS");
        let msg = format_tool_failure(
            names::GET_AVAILABLE_STRATEGIES,
            r#"{"stage_ids": ["bogus"]}"#,
            &err,
        );
        assert!(msg.starts_with("Error from tool 'get_available_strategies':"));
        assert!(msg.contains("'BOGUS'"));
        assert!(msg.contains("Call get_available_stages"));
        assert!(msg.ends_with(r#"Arguments used: {"stage_ids": ["bogus"]}"#));
    }

    #[test]
    fn unknown_strategy_points_to_strategy_listing() {
        let err = EngineError::not_found(RegistryKind::Strategy, "NOPE");
        let msg = format_tool_failure(names::COMPOSE_PROMPT, "{}", &err);
        assert!(msg.contains("Call get_available_strategies"));
    }

    #[test]
    fn strategy_missing_from_stage_names_the_stage() {
        let err = EngineError::not_in_stage("OUTLIERS", "CSV");
        let msg = format_tool_failure(names::COMPOSE_PROMPT, r#"{"strategy_ids": ["csv"]}"#, &err);
        assert!(msg.contains("stage 'OUTLIERS'"));
        assert!(msg.contains("Call get_available_strategies"));
    }

    #[test]
    fn duplicate_offers_no_listing() {
        let err = EngineError::duplicate(RegistryKind::Pipeline, "EDA");
        let msg = format_tool_failure("t", "{}", &err);
        assert!(msg.contains("already exists"));
        assert!(!msg.contains("Call "));
    }

    #[test]
    fn validation_failure_asks_for_ids() {
        let err = EngineError::validation("at least one strategy id is required");
        let msg = format_tool_failure(names::COMPOSE_PROMPT, r#"{"strategy_ids": []}"#, &err);
        assert!(msg.contains("at least one id"));
    }

    #[test]
    fn long_arguments_are_truncated() {
        let args = "x".repeat(500);
        let err = EngineError::validation("bad");
        let msg = format_tool_failure("t", &args, &err);
        assert!(msg.ends_with("..."));
        assert!(!msg.contains(&args));
    }
}
