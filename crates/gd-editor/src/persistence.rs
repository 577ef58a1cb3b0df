//! Persistence gateway contract.
//!
//! The editor never talks to storage itself. A host supplies a
//! `PersistenceGateway`; the canvas travels as the opaque snapshot string
//! produced by the scene adapter.

use crate::error::GatewayError;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored project as returned by `load_project`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub name: String,
    /// Canvas snapshot. Empty for a project that was never saved.
    pub canvas: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub project: ProjectId,
    pub canvas: String,
    /// Host clock at save time, milliseconds.
    pub saved_at_ms: f64,
    /// Identity of the saving editor (user id or session tag).
    pub editor: String,
}

pub trait PersistenceGateway {
    fn load_project(&mut self, id: &ProjectId) -> Result<ProjectRecord, GatewayError>;

    fn save_project(&mut self, request: &SaveRequest) -> Result<(), GatewayError>;
}

/// In-memory gateway for hosts without a backend and for tests.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    projects: HashMap<ProjectId, ProjectRecord>,
    last_saved: HashMap<ProjectId, SaveRequest>,
    /// Error returned by the next call, then cleared.
    fail_next: Option<GatewayError>,
    saves: usize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ProjectId, record: ProjectRecord) {
        self.projects.insert(id, record);
    }

    pub fn fail_next(&mut self, error: GatewayError) {
        self.fail_next = Some(error);
    }

    pub fn project(&self, id: &ProjectId) -> Option<&ProjectRecord> {
        self.projects.get(id)
    }

    pub fn last_save(&self, id: &ProjectId) -> Option<&SaveRequest> {
        self.last_saved.get(id)
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load_project(&mut self, id: &ProjectId) -> Result<ProjectRecord, GatewayError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        self.projects.get(id).cloned().ok_or(GatewayError::NotFound)
    }

    fn save_project(&mut self, request: &SaveRequest) -> Result<(), GatewayError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        let record = self
            .projects
            .get_mut(&request.project)
            .ok_or(GatewayError::NotFound)?;
        record.canvas.clone_from(&request.canvas);
        self.last_saved
            .insert(request.project.clone(), request.clone());
        self.saves += 1;
        Ok(())
    }
}
