//! Leaf prompt units.

use crate::error::Result;
use crate::id::validate_id;
use crate::registry::{Registrable, RegistryKind};
use serde::Serialize;

/// One atomic, named piece of prompt text.
///
/// Immutable after construction. The id is stored normalized (uppercase).
/// The prompt is a template string handed as-is to a downstream renderer;
/// placeholder markers inside it are not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Strategy {
    id: String,
    description: String,
    prompt: String,
}

impl Strategy {
    /// Create a strategy. Fails with a validation error if `id` is blank.
    pub fn new(
        id: impl AsRef<str>,
        description: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: validate_id(id.as_ref())?,
            description: description.into(),
            prompt: prompt.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl Registrable for Strategy {
    const KIND: RegistryKind = RegistryKind::Strategy;

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }
}
