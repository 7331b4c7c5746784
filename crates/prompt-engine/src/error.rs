//! Error types for registry lookups, registration, and composition.

use crate::registry::RegistryKind;
use thiserror::Error;

/// Prompt engine error type.
///
/// Every variant that refers to an entry names both the (normalized) id and
/// the registry that was searched, so a caller relaying the message to an
/// agent gives it enough to pick a different id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{kind} '{id}' is not registered in the {} registry", kind.as_str())]
    NotFound { kind: RegistryKind, id: String },

    #[error("Strategy '{id}' is not registered in stage '{stage}'")]
    NotInStage { stage: String, id: String },

    #[error("{kind} '{id}' is already registered in the {} registry", kind.as_str())]
    DuplicateKey { kind: RegistryKind, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl EngineError {
    pub fn not_found(kind: RegistryKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn not_in_stage(stage: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotInStage {
            stage: stage.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(kind: RegistryKind, id: impl Into<String>) -> Self {
        Self::DuplicateKey {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The registry this error refers to, if any.
    pub fn kind(&self) -> Option<RegistryKind> {
        match self {
            Self::NotFound { kind, .. } | Self::DuplicateKey { kind, .. } => Some(*kind),
            Self::NotInStage { .. } => Some(RegistryKind::Strategy),
            Self::Validation { .. } => None,
        }
    }
}

/// Convenience result type for prompt engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_id_and_registry() {
        let err = EngineError::not_found(RegistryKind::Strategy, "NOPE");
        let msg = err.to_string();
        assert!(msg.contains("'NOPE'"));
        assert!(msg.contains("strategy registry"));
        assert_eq!(err.kind(), Some(RegistryKind::Strategy));
    }

    #[test]
    fn not_in_stage_names_the_stage() {
        let err = EngineError::not_in_stage("MISSING_VALUES", "CSV");
        assert_eq!(
            err.to_string(),
            "Strategy 'CSV' is not registered in stage 'MISSING_VALUES'"
        );
        assert_eq!(err.kind(), Some(RegistryKind::Strategy));
    }

    #[test]
    fn validation_has_no_kind() {
        let err = EngineError::validation("id must not be empty");
        assert_eq!(err.kind(), None);
        assert_eq!(err.to_string(), "Validation error: id must not be empty");
    }
}
