//! Stages: one processing phase and the strategies available for it.

use crate::error::{EngineError, Result};
use crate::id::{normalize_id, validate_id};
use crate::registry::{Registrable, Registry, RegistryKind};
use crate::strategy::Strategy;
use crate::summary::{GroupSummary, Summary};
use serde::Serialize;

/// A named phase of a pipeline, owning its strategies exclusively.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    id: String,
    description: String,
    strategies: Registry<Strategy>,
}

impl Stage {
    /// Create an empty stage. Fails with a validation error if `id` is blank.
    pub fn new(id: impl AsRef<str>, description: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: validate_id(id.as_ref())?,
            description: description.into(),
            strategies: Registry::new(),
        })
    }

    /// Builder form of [`add_strategies`](Self::add_strategies).
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Result<Self> {
        self.add_strategies(strategies)?;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Register strategies. All-or-nothing: a duplicate id anywhere in the
    /// batch leaves the stage unchanged.
    pub fn add_strategies(&mut self, strategies: Vec<Strategy>) -> Result<()> {
        self.strategies.add_all(strategies)
    }

    /// Remove strategies by id. All-or-nothing, like
    /// [`add_strategies`](Self::add_strategies).
    pub fn remove_strategies<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<Vec<Strategy>> {
        self.strategies.remove_all(ids)
    }

    pub fn get_strategy(&self, id: &str) -> Result<&Strategy> {
        self.strategies.get(id)
    }

    /// Prompt text of one of this stage's strategies. The error names this
    /// stage, not just the strategy registry.
    pub fn get_prompt(&self, id: &str) -> Result<&str> {
        let key = normalize_id(id);
        self.strategies
            .find(&key)
            .map(Strategy::prompt)
            .ok_or_else(|| EngineError::not_in_stage(&self.id, key))
    }

    pub fn strategies(&self) -> &Registry<Strategy> {
        &self.strategies
    }

    /// `{id, description}` of every strategy, in registration order.
    pub fn summary(&self) -> Vec<Summary> {
        self.strategies.summaries()
    }

    /// [`summary`](Self::summary) grouped under this stage's id.
    pub fn strategies_summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id.clone(),
            kind: RegistryKind::Stage,
            items: self.summary(),
        }
    }
}

impl Registrable for Stage {
    const KIND: RegistryKind = RegistryKind::Stage;

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(id: &str, prompt: &str) -> Strategy {
        Strategy::new(id, format!("use {id}"), prompt).unwrap()
    }

    #[test]
    fn get_prompt_is_case_insensitive() {
        let stage = Stage::new("missing_values", "Impute gaps")
            .unwrap()
            .with_strategies(vec![strategy("impute_mean", "mean prompt")])
            .unwrap();
        assert_eq!(stage.get_prompt("Impute_Mean").unwrap(), "mean prompt");
    }

    #[test]
    fn get_prompt_unknown_id() {
        let stage = Stage::new("outliers", "d")
            .unwrap()
            .with_strategies(vec![strategy("iqr", "iqr prompt")])
            .unwrap();
        let err = stage.get_prompt(" nope ").unwrap_err();
        assert_eq!(err, EngineError::not_in_stage("OUTLIERS", "NOPE"));
        assert!(err.to_string().contains("stage 'OUTLIERS'"));
    }

    #[test]
    fn failed_batch_leaves_stage_unchanged() {
        let mut stage = Stage::new("s", "d").unwrap();
        stage.add_strategies(vec![strategy("a", "1")]).unwrap();
        let err = stage
            .add_strategies(vec![strategy("b", "2"), strategy("A", "3")])
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateKey { .. }));
        assert_eq!(stage.strategies().len(), 1);
        assert!(!stage.strategies().contains("b"));
    }

    #[test]
    fn remove_strategies() {
        let mut stage = Stage::new("s", "d")
            .unwrap()
            .with_strategies(vec![strategy("a", "1"), strategy("b", "2")])
            .unwrap();
        let removed = stage.remove_strategies(&["a"]).unwrap();
        assert_eq!(removed[0].id(), "A");
        assert_eq!(stage.summary().len(), 1);
        assert!(stage.remove_strategies(&["a"]).is_err());
    }

    #[test]
    fn summary_is_ordered_and_prompt_free() {
        let stage = Stage::new("s", "d")
            .unwrap()
            .with_strategies(vec![strategy("z", "secret"), strategy("a", "secret")])
            .unwrap();
        let summary = stage.strategies_summary();
        assert_eq!(summary.id, "S");
        assert_eq!(summary.items[0].id, "Z");
        assert_eq!(summary.items[1].id, "A");
        assert!(!summary.to_string().contains("secret"));
    }
}
