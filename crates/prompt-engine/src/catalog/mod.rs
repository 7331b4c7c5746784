//! Built-in pipelines shipped with the engine.
//!
//! Nothing is registered implicitly: hosts call [`register_builtins`] once at
//! startup (or pick individual pipelines from [`builtin_pipelines`]).

pub mod eda;

use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::pipeline::Pipeline;
use crate::stage::Stage;
use crate::strategy::Strategy;
use tracing::info;

/// Static description of one strategy: id, description, prompt body.
pub(crate) struct StrategyDef {
    pub id: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

/// Static description of one stage and its strategies.
pub(crate) struct StageDef {
    pub id: &'static str,
    pub description: &'static str,
    pub strategies: &'static [StrategyDef],
}

pub(crate) fn build_stage(def: &StageDef) -> Result<Stage> {
    let strategies = def
        .strategies
        .iter()
        .map(|s| Strategy::new(s.id, s.description, s.prompt))
        .collect::<Result<Vec<_>>>()?;
    Stage::new(def.id, def.description)?.with_strategies(strategies)
}

pub(crate) fn build_pipeline(
    id: &str,
    description: &str,
    stages: &[StageDef],
) -> Result<Pipeline> {
    let stages = stages.iter().map(build_stage).collect::<Result<Vec<_>>>()?;
    Pipeline::new(id, description)?.with_stages(stages)
}

/// Every built-in pipeline, freshly constructed.
pub fn builtin_pipelines() -> Result<Vec<Pipeline>> {
    Ok(vec![eda::pipeline()?])
}

/// Register all built-in pipelines on `orchestrator`.
pub fn register_builtins(orchestrator: &mut Orchestrator) -> Result<()> {
    let pipelines = builtin_pipelines()?;
    info!("Registering {} built-in pipeline(s)", pipelines.len());
    orchestrator.add_pipelines(pipelines)
}
