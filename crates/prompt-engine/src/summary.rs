//! Agent-facing introspection views.
//!
//! Summaries carry ids and descriptions only, never prompt text, so the
//! discovery responses an agent reads before composing stay compact.

use crate::registry::RegistryKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `{id, description}` pair of one registered entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: String,
    pub description: String,
}

impl Summary {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// One-line usage form: `ID                   : description`.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} : {}", self.id, self.description)
    }
}

/// The children of one pipeline (its stages) or one stage (its strategies).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Id of the pipeline or stage owning the items.
    pub id: String,
    /// Level of the owner.
    pub kind: RegistryKind,
    pub items: Vec<Summary>,
}

impl GroupSummary {
    /// Plural name of the items, lowercase and heading form.
    fn child_labels(&self) -> (&'static str, &'static str) {
        match self.kind {
            RegistryKind::Pipeline => ("stages", "Stages"),
            RegistryKind::Stage => ("strategies", "Strategies"),
            RegistryKind::Strategy => ("items", "Items"),
        }
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, heading) = self.child_labels();
        if self.items.is_empty() {
            return write!(
                f,
                "No {children} registered for {} '{}'.",
                self.kind.as_str(),
                self.id
            );
        }
        writeln!(f, "{}: {}", self.kind, self.id)?;
        write!(f, "├── {heading} Overview:")?;
        for item in &self.items {
            write!(f, "\n- {item}")?;
        }
        Ok(())
    }
}

/// Render summaries one per line.
pub fn render_summaries(summaries: &[Summary]) -> String {
    summaries
        .iter()
        .map(Summary::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render group overviews separated by blank lines.
pub fn render_groups(groups: &[GroupSummary]) -> String {
    groups
        .iter()
        .map(GroupSummary::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
