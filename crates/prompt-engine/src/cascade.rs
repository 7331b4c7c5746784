//! Explicit tree walks behind the orchestrator's cascading registration.
//!
//! [`flatten`] lists what one pipeline contributes to the flat stage and
//! strategy indexes; [`reachable`] computes which ids a set of pipelines
//! still references, which decides what a removal may drop.

use crate::id::normalize_id;
use crate::pipeline::Pipeline;
use crate::stage::Stage;
use crate::strategy::Strategy;
use std::collections::HashSet;

/// Stages and strategies nested under one pipeline, in pipeline order.
#[derive(Debug, Default)]
pub struct Flattened<'a> {
    pub stages: Vec<&'a Stage>,
    pub strategies: Vec<&'a Strategy>,
}

/// Walk `pipeline → stage → strategy`.
pub fn flatten(pipeline: &Pipeline) -> Flattened<'_> {
    let mut flat = Flattened::default();
    for stage in pipeline.stages() {
        flat.stages.push(stage);
        flat.strategies.extend(stage.strategies().iter());
    }
    flat
}

/// Normalized stage and strategy ids referenced by a set of pipelines.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reachable {
    pub stage_ids: HashSet<String>,
    pub strategy_ids: HashSet<String>,
}

impl Reachable {
    pub fn has_stage(&self, id: &str) -> bool {
        self.stage_ids.contains(&normalize_id(id))
    }

    pub fn has_strategy(&self, id: &str) -> bool {
        self.strategy_ids.contains(&normalize_id(id))
    }
}

pub fn reachable<'a>(pipelines: impl IntoIterator<Item = &'a Pipeline>) -> Reachable {
    let mut reach = Reachable::default();
    for pipeline in pipelines {
        let flat = flatten(pipeline);
        reach
            .stage_ids
            .extend(flat.stages.iter().map(|s| normalize_id(s.id())));
        reach
            .strategy_ids
            .extend(flat.strategies.iter().map(|s| normalize_id(s.id())));
    }
    reach
}
