//! Shared, read-mostly handle to an [`Orchestrator`].
//!
//! Registration normally happens once at startup, but tool calls may be
//! dispatched concurrently afterwards. Queries take the read lock and run in
//! parallel; each cascade runs entirely under the write lock, so no reader
//! ever sees a half-applied registration.

use crate::error::Result;
use crate::orchestrator::{Orchestrator, RegistrySnapshot};
use crate::pipeline::Pipeline;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cheaply cloneable handle to one orchestrator.
#[derive(Debug, Clone, Default)]
pub struct SharedOrchestrator {
    inner: Arc<RwLock<Orchestrator>>,
}

impl SharedOrchestrator {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(orchestrator)),
        }
    }

    /// Acquire the read lock.
    ///
    /// Poisoning is ignored: every mutation validates before it writes, so a
    /// panicking writer cannot leave a partial cascade behind.
    pub fn read(&self) -> RwLockReadGuard<'_, Orchestrator> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Acquire the write lock. See [`read`](Self::read) on poisoning.
    pub fn write(&self) -> RwLockWriteGuard<'_, Orchestrator> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// [`Orchestrator::add_pipelines`] under one exclusive lock.
    pub fn add_pipelines(&self, pipelines: Vec<Pipeline>) -> Result<()> {
        self.write().add_pipelines(pipelines)
    }

    /// [`Orchestrator::remove_pipelines`] under one exclusive lock.
    pub fn remove_pipelines<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Pipeline>> {
        self.write().remove_pipelines(ids)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.read().get_registry()
    }
}

impl From<Orchestrator> for SharedOrchestrator {
    fn from(orchestrator: Orchestrator) -> Self {
        Self::new(orchestrator)
    }
}
