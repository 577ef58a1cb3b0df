//! Serialized canvas snapshots.
//!
//! A snapshot is a JSON document carrying the surface attributes and every
//! object in paint order. The same string is used for history entries and
//! for the `canvas` field persisted with a project, so encoding must be
//! deterministic: equal scenes always encode to byte-identical strings.

use crate::model::{Color, Drawable, SceneGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Value of the `format` tag written into every snapshot.
pub const SNAPSHOT_FORMAT: &str = "gd-canvas";

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode canvas: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed canvas snapshot: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("not a canvas snapshot (format tag `{0}`)")]
    ForeignFormat(String),
    #[error("unsupported canvas snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("duplicate object id `{0}` in snapshot")]
    DuplicateId(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct CanvasDocument {
    format: String,
    version: u32,
    width: f32,
    height: f32,
    background: Color,
    objects: Vec<Drawable>,
}

impl SceneGraph {
    /// Encode the full canvas state.
    pub fn to_snapshot(&self) -> Result<String, SnapshotError> {
        let doc = CanvasDocument {
            format: SNAPSHOT_FORMAT.to_owned(),
            version: SNAPSHOT_VERSION,
            width: self.width,
            height: self.height,
            background: self.background,
            objects: self.objects().cloned().collect(),
        };
        serde_json::to_string(&doc).map_err(SnapshotError::Encode)
    }

    /// Decode a snapshot into a fresh graph. Nothing is partially applied:
    /// any error leaves the caller's graph untouched.
    pub fn from_snapshot(snapshot: &str) -> Result<SceneGraph, SnapshotError> {
        let doc: CanvasDocument = serde_json::from_str(snapshot).map_err(SnapshotError::Decode)?;
        if doc.format != SNAPSHOT_FORMAT {
            return Err(SnapshotError::ForeignFormat(doc.format));
        }
        if doc.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(doc.version));
        }

        let mut seen = HashSet::with_capacity(doc.objects.len());
        let mut graph = SceneGraph::new(doc.width, doc.height, doc.background);
        for obj in doc.objects {
            if !seen.insert(obj.id) {
                return Err(SnapshotError::DuplicateId(obj.id.as_str().to_owned()));
            }
            graph.add(obj);
        }
        log::debug!("decoded canvas snapshot with {} objects", graph.len());
        Ok(graph)
    }
}
