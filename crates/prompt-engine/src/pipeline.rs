//! Pipelines: complete workflows made of ordered stages.

use crate::error::Result;
use crate::id::validate_id;
use crate::registry::{Registrable, Registry, RegistryKind};
use crate::stage::Stage;
use crate::summary::{GroupSummary, Summary};
use serde::Serialize;

/// A named workflow, owning its stages exclusively.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipeline {
    id: String,
    description: String,
    stages: Registry<Stage>,
}

impl Pipeline {
    /// Create an empty pipeline. Fails with a validation error if `id` is blank.
    pub fn new(id: impl AsRef<str>, description: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: validate_id(id.as_ref())?,
            description: description.into(),
            stages: Registry::new(),
        })
    }

    /// Builder form of [`add_stages`](Self::add_stages).
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Result<Self> {
        self.add_stages(stages)?;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Register stages. All-or-nothing on duplicate ids.
    pub fn add_stages(&mut self, stages: Vec<Stage>) -> Result<()> {
        self.stages.add_all(stages)
    }

    /// Remove stages by id. All-or-nothing on unknown ids.
    pub fn remove_stages<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<Vec<Stage>> {
        self.stages.remove_all(ids)
    }

    pub fn get_stage(&self, id: &str) -> Result<&Stage> {
        self.stages.get(id)
    }

    pub fn stages(&self) -> &Registry<Stage> {
        &self.stages
    }

    /// `{id, description}` of every stage, in pipeline order.
    pub fn summary(&self) -> Vec<Summary> {
        self.stages.summaries()
    }

    /// [`summary`](Self::summary) grouped under this pipeline's id.
    pub fn stages_summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id.clone(),
            kind: RegistryKind::Pipeline,
            items: self.summary(),
        }
    }
}

impl Registrable for Pipeline {
    const KIND: RegistryKind = RegistryKind::Pipeline;

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }
}
