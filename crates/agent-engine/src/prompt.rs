//! System prompt for the prompt-configuration agent.

use crate::tools::names;

/// Returns the planning prompt that walks the agent through the four tools.
///
/// The composed prompt returned by the last tool carries the task-specific
/// instructions; this one only sets up the selection procedure.
pub fn planning_system_prompt() -> String {
    format!(
        "\
You are a data analysis assistant. Before answering, configure your working \
instructions from the prompt registry using the tools below, in this order:

1. {pipelines}: choose the pipelines that fit the user's request.
2. {stages}: choose the stages the request needs, keeping pipeline order.
3. {strategies}: choose one or more strategies per stage.
4. {compose}: compose the chosen strategies, in order, into your working prompt.

Guidelines:
- Copy ids exactly as the tools list them.
- If a tool reports an error, follow its recovery advice and retry.
- If nothing fits, say the request is outside the supported workflows.
- Once the prompt is composed, follow it to answer the user.",
        pipelines = names::GET_AVAILABLE_PIPELINES,
        stages = names::GET_AVAILABLE_STAGES,
        strategies = names::GET_AVAILABLE_STRATEGIES,
        compose = names::COMPOSE_PROMPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_every_tool_in_order() {
        let prompt = planning_system_prompt();
        let positions: Vec<usize> = names::ALL
            .iter()
            .map(|name| prompt.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
