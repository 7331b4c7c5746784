//! Registry of prompt templates organized as pipelines, stages and
//! strategies.
//!
//! A [`Pipeline`] is an ordered list of [`Stage`]s; each stage offers
//! alternative [`Strategy`] prompts. Registering a pipeline on an
//! [`Orchestrator`] also indexes every nested stage and strategy by id, so an
//! agent can walk the hierarchy (pipelines, then stages, then strategies) and
//! finally compose a prompt from the strategies it picked:
//!
//! ```
//! use prompt_engine::{Orchestrator, catalog};
//!
//! # fn main() -> prompt_engine::Result<()> {
//! let mut orchestrator = Orchestrator::new();
//! catalog::register_builtins(&mut orchestrator)?;
//!
//! let stages = orchestrator.get_pipelines_stages_summary(&["eda"])?;
//! assert_eq!(stages[0].items[0].id, "CARDINALITY_ANALYSIS");
//!
//! let prompt = orchestrator.get_composed_prompt(&["csv", "impute_median"])?;
//! assert!(prompt.starts_with("## Data ingestion: CSV"));
//! # Ok(())
//! # }
//! ```
//!
//! Ids are case-insensitive: they are trimmed and uppercased on every
//! boundary (see [`normalize_id`]).

pub mod cascade;
pub mod catalog;
pub mod error;
pub mod id;
pub mod orchestrator;
pub mod pipeline;
pub mod registry;
pub mod shared;
pub mod stage;
pub mod strategy;
pub mod summary;

pub use error::{EngineError, Result};
pub use id::normalize_id;
pub use orchestrator::{Orchestrator, PROMPT_JOINER, RegistrySnapshot};
pub use pipeline::Pipeline;
pub use registry::{Registrable, Registry, RegistryKind};
pub use shared::SharedOrchestrator;
pub use stage::Stage;
pub use strategy::Strategy;
pub use summary::{GroupSummary, Summary, render_groups, render_summaries};
