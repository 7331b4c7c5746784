//! Canonical tool name constants.

pub const GET_AVAILABLE_PIPELINES: &str = "get_available_pipelines";
pub const GET_AVAILABLE_STAGES: &str = "get_available_stages";
pub const GET_AVAILABLE_STRATEGIES: &str = "get_available_strategies";
pub const COMPOSE_PROMPT: &str = "compose_prompt";

/// Every prompt-configuration tool, in the order an agent calls them.
pub const ALL: &[&str] = &[
    GET_AVAILABLE_PIPELINES,
    GET_AVAILABLE_STAGES,
    GET_AVAILABLE_STRATEGIES,
    COMPOSE_PROMPT,
];
