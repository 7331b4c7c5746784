//! Errors raised while configuring or driving the agent tools.
//!
//! Tool *calls* never fail with these: a failed call becomes observation text
//! for the agent (see [`reflection`](crate::tools::reflection)). `AgentError`
//! covers setup, meaning configuration loading, catalog registration and
//! tool-set assembly.

use prompt_engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl AgentError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_engine::RegistryKind;

    #[test]
    fn engine_errors_pass_through_unchanged() {
        let engine = EngineError::duplicate(RegistryKind::Pipeline, "EDA");
        let err: AgentError = engine.clone().into();
        assert_eq!(err.to_string(), engine.to_string());
    }

    #[test]
    fn io_error_names_path() {
        let err = AgentError::Io {
            path: PathBuf::from("/nowhere/config.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/nowhere/config.json"));
    }
}
