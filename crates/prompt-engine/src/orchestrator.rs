//! The registry coordinator: nested pipelines plus flat lookup indexes.
//!
//! The [`Orchestrator`] owns the registered pipelines and two derived
//! indexes (stages and strategies by id) populated by walking each pipeline
//! with [`cascade::flatten`](crate::cascade::flatten). Registration and
//! removal are all-or-nothing; the derived indexes always equal exactly what
//! the registered pipelines reach.
//!
//! A stage or strategy may be reachable from more than one pipeline as long
//! as every occurrence is identical. It is indexed once and stays indexed
//! until the last pipeline referencing it is removed.
//!
//! # Example
//!
//! ```
//! use prompt_engine::{Orchestrator, Pipeline, Stage, Strategy};
//!
//! # fn main() -> prompt_engine::Result<()> {
//! let stage = Stage::new("greeting", "Open the conversation")?
//!     .with_strategies(vec![
//!         Strategy::new("formal", "Formal tone", "Dear user,")?,
//!         Strategy::new("casual", "Casual tone", "Hey there!")?,
//!     ])?;
//! let pipeline = Pipeline::new("letters", "Write letters")?.with_stages(vec![stage])?;
//!
//! let mut orchestrator = Orchestrator::new();
//! orchestrator.add_pipelines(vec![pipeline])?;
//!
//! let prompt = orchestrator.get_composed_prompt(&["casual", "formal"])?;
//! assert_eq!(prompt, "Hey there!\nDear user,");
//! # Ok(())
//! # }
//! ```

use crate::cascade::{flatten, reachable};
use crate::error::{EngineError, Result};
use crate::id::normalize_id;
use crate::pipeline::Pipeline;
use crate::registry::{Registrable, Registry};
use crate::stage::Stage;
use crate::strategy::Strategy;
use crate::summary::{GroupSummary, Summary};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Separator placed between strategy prompts in a composed prompt.
pub const PROMPT_JOINER: &str = "\n";

/// Process-wide registry state, constructed explicitly and passed by
/// reference (or through [`SharedOrchestrator`](crate::SharedOrchestrator)).
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    pipelines: Registry<Pipeline>,
    stages: Registry<Stage>,
    strategies: Registry<Strategy>,
}

/// Owned copy of all three registries, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    pub pipelines: Registry<Pipeline>,
    pub stages: Registry<Stage>,
    pub strategies: Registry<Strategy>,
}

/// New entries for one derived index, collected while validating a batch.
struct Pending<'a, T> {
    order: Vec<&'a T>,
    seen: HashMap<String, &'a T>,
}

impl<'a, T: Registrable + PartialEq> Pending<'a, T> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            seen: HashMap::new(),
        }
    }

    /// Record `item` unless an identical entry is already indexed or
    /// pending. A different entry under the same id is a conflict.
    fn offer(&mut self, indexed: &Registry<T>, item: &'a T) -> Result<()> {
        let key = normalize_id(item.id());
        if let Some(existing) = indexed.find(&key) {
            return if existing == item {
                Ok(())
            } else {
                Err(EngineError::duplicate(T::KIND, key))
            };
        }
        match self.seen.get(&key) {
            Some(other) if *other != item => Err(EngineError::duplicate(T::KIND, key)),
            Some(_) => Ok(()),
            None => {
                self.seen.insert(key, item);
                self.order.push(item);
                Ok(())
            }
        }
    }
}

impl<T: Clone> Pending<'_, T> {
    fn into_owned(self) -> Vec<T> {
        self.order.into_iter().cloned().collect()
    }
}

impl Orchestrator {
    /// Create an empty orchestrator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register pipelines and cascade their stages and strategies into the
    /// flat indexes.
    ///
    /// The whole batch is validated first. It fails with `DuplicateKey` when
    /// a pipeline id is already registered (or repeated in the batch), or
    /// when a nested stage/strategy id is already taken by a *different*
    /// entry. On failure nothing is registered.
    pub fn add_pipelines(&mut self, pipelines: Vec<Pipeline>) -> Result<()> {
        let mut batch = HashSet::with_capacity(pipelines.len());
        for pipeline in &pipelines {
            let key = normalize_id(pipeline.id());
            if self.pipelines.contains(&key) || !batch.insert(key.clone()) {
                return Err(EngineError::duplicate(Pipeline::KIND, key));
            }
        }

        let mut stages = Pending::new();
        let mut strategies = Pending::new();
        for pipeline in &pipelines {
            let flat = flatten(pipeline);
            for stage in flat.stages {
                stages.offer(&self.stages, stage)?;
            }
            for strategy in flat.strategies {
                strategies.offer(&self.strategies, strategy)?;
            }
        }
        let stages = stages.into_owned();
        let strategies = strategies.into_owned();

        info!(
            "Registering {} pipeline(s): {} new stage(s), {} new strategy(ies)",
            pipelines.len(),
            stages.len(),
            strategies.len()
        );
        self.strategies.add_all(strategies)?;
        self.stages.add_all(stages)?;
        self.pipelines.add_all(pipelines)
    }

    /// Remove pipelines by id and drop every stage and strategy no remaining
    /// pipeline reaches.
    ///
    /// Fails with `NotFound` (removing nothing) if any id is unknown.
    /// Returns the removed pipelines.
    pub fn remove_pipelines<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<Vec<Pipeline>> {
        let removed = self.pipelines.remove_all(ids)?;
        let reach = reachable(self.pipelines.iter());

        let (stages_before, strategies_before) = (self.stages.len(), self.strategies.len());
        self.strategies.retain(|s| reach.has_strategy(s.id()));
        self.stages.retain(|s| reach.has_stage(s.id()));

        info!(
            "Removed {} pipeline(s): dropped {} stage(s), {} strategy(ies)",
            removed.len(),
            stages_before - self.stages.len(),
            strategies_before - self.strategies.len()
        );
        Ok(removed)
    }

    /// Concatenate the prompts of the given strategies, in the given order,
    /// joined by [`PROMPT_JOINER`].
    ///
    /// Fails with `NotFound` naming the first unknown id; no partial output
    /// is produced. An empty id list is a validation error.
    pub fn get_composed_prompt<S: AsRef<str>>(&self, strategy_ids: &[S]) -> Result<String> {
        if strategy_ids.is_empty() {
            return Err(EngineError::validation(
                "at least one strategy id is required to compose a prompt",
            ));
        }
        let parts = strategy_ids
            .iter()
            .map(|id| self.strategies.get(id.as_ref()).map(Strategy::prompt))
            .collect::<Result<Vec<_>>>()?;
        let prompt = parts.join(PROMPT_JOINER);
        debug!(
            "Composed prompt from {} strategy(ies) ({} bytes)",
            parts.len(),
            prompt.len()
        );
        Ok(prompt)
    }

    /// `{id, description}` of every registered pipeline. Empty when nothing
    /// is registered.
    pub fn get_pipelines_usage_summary(&self) -> Vec<Summary> {
        self.pipelines.summaries()
    }

    /// The stage overview of each named pipeline, in the order given.
    pub fn get_pipelines_stages_summary<S: AsRef<str>>(
        &self,
        pipeline_ids: &[S],
    ) -> Result<Vec<GroupSummary>> {
        require_ids(pipeline_ids, "pipeline")?;
        pipeline_ids
            .iter()
            .map(|id| {
                debug!("Summarizing stages of pipeline {}", id.as_ref());
                self.pipelines.get(id.as_ref()).map(Pipeline::stages_summary)
            })
            .collect()
    }

    /// The strategy overview of each named stage (looked up in the flat
    /// stage index), in the order given.
    pub fn get_stages_strategies_summary<S: AsRef<str>>(
        &self,
        stage_ids: &[S],
    ) -> Result<Vec<GroupSummary>> {
        require_ids(stage_ids, "stage")?;
        stage_ids
            .iter()
            .map(|id| {
                debug!("Summarizing strategies of stage {}", id.as_ref());
                self.stages.get(id.as_ref()).map(Stage::strategies_summary)
            })
            .collect()
    }

    pub fn get_pipeline(&self, id: &str) -> Result<&Pipeline> {
        self.pipelines.get(id)
    }

    pub fn get_stage(&self, id: &str) -> Result<&Stage> {
        self.stages.get(id)
    }

    pub fn get_strategy(&self, id: &str) -> Result<&Strategy> {
        self.strategies.get(id)
    }

    pub fn pipelines(&self) -> &Registry<Pipeline> {
        &self.pipelines
    }

    pub fn stages(&self) -> &Registry<Stage> {
        &self.stages
    }

    pub fn strategies(&self) -> &Registry<Strategy> {
        &self.strategies
    }

    /// Copy of all three registries.
    pub fn get_registry(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            pipelines: self.pipelines.clone(),
            stages: self.stages.clone(),
            strategies: self.strategies.clone(),
        }
    }
}

fn require_ids<S: AsRef<str>>(ids: &[S], what: &str) -> Result<()> {
    if ids.is_empty() {
        return Err(EngineError::validation(format!(
            "at least one {what} id is required"
        )));
    }
    Ok(())
}
