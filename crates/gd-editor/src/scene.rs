//! Scene adapter: the one place the scene graph is mutated.
//!
//! Tools, property editors, and the layer list never touch the graph
//! directly. They produce `GraphMutation` values which the adapter applies,
//! queuing a `SceneEvent` for every observable change. The session drains
//! those events to keep the layer list and history in step.
//!
//! Two paths deliberately bypass notifications: `configure_objects` (tool
//! flag reconfiguration) and `name_object` (layer name write-back). Neither
//! is a user edit.

use crate::config::EditorConfig;
use crate::error::EditorError;
use gd_core::id::ObjectId;
use gd_core::model::*;
use gd_core::{SnapshotError, hit_test};
use smallvec::SmallVec;

// ─── Mutations ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrderOp {
    BringForward,
    SendBackward,
    BringToFront,
    SendToBack,
}

/// Sparse attribute update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    pub left: Option<f32>,
    pub top: Option<f32>,
    /// Rect/image width, or text box wrap width.
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    pub fill: Option<Paint>,
    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f32>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub visible: Option<bool>,
    pub selectable: Option<bool>,
}

impl PropertyBag {
    pub fn is_empty(&self) -> bool {
        *self == PropertyBag::default()
    }

    fn apply_to(&self, obj: &mut Drawable) {
        if let Some(left) = self.left {
            obj.left = left;
        }
        if let Some(top) = self.top {
            obj.top = top;
        }
        match &mut obj.kind {
            ObjectKind::Rect { width, height } | ObjectKind::Image { width, height, .. } => {
                if let Some(w) = self.width {
                    *width = w.max(0.0);
                }
                if let Some(h) = self.height {
                    *height = h.max(0.0);
                }
            }
            ObjectKind::Circle { radius } => {
                if let Some(r) = self.radius {
                    *radius = r.max(0.0);
                }
            }
            ObjectKind::Text {
                content,
                font,
                width,
            } => {
                if let Some(text) = &self.text {
                    content.clone_from(text);
                }
                if let Some(size) = self.font_size {
                    font.size = size.max(1.0);
                }
                if let Some(w) = self.width {
                    *width = w.max(1.0);
                }
            }
            ObjectKind::Path { .. } => {}
        }
        if let Some(fill) = self.fill {
            obj.fill = fill;
        }
        if self.stroke_color.is_some() || self.stroke_width.is_some() {
            let stroke = obj.stroke.get_or_insert_with(Stroke::default);
            if let Some(color) = self.stroke_color {
                stroke.color = color;
            }
            if let Some(width) = self.stroke_width {
                stroke.width = width.max(0.0);
            }
        }
        if let Some(visible) = self.visible {
            obj.visible = visible;
        }
        if let Some(selectable) = self.selectable {
            obj.selectable = selectable;
        }
    }
}

/// A mutation from canvas interaction or an editor panel.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    /// Insert an object on top. `internal` additions are programmatic and
    /// are not mirrored into the layer list.
    AddObject {
        object: Box<Drawable>,
        internal: bool,
    },
    UpdateObject {
        id: ObjectId,
        props: Box<PropertyBag>,
    },
    RemoveObject {
        id: ObjectId,
    },
    Translate {
        id: ObjectId,
        dx: f32,
        dy: f32,
    },
    SetBackground {
        color: Color,
    },
    SetVisible {
        id: ObjectId,
        visible: bool,
    },
    ZOrder {
        id: ObjectId,
        op: ZOrderOp,
    },
    Select {
        ids: Vec<ObjectId>,
    },
    ClearSelection,
}

/// Notification of an observable scene change.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    ObjectAdded { id: ObjectId, internal: bool },
    ObjectModified { id: ObjectId },
    ObjectRemoved { id: ObjectId },
    /// A freehand stroke was committed (follows its `ObjectAdded`).
    PathCreated { id: ObjectId },
    TextChanged { id: ObjectId },
    BackgroundChanged,
    VisibilityChanged { id: ObjectId, visible: bool },
    ZOrderChanged { id: ObjectId },
    SelectionChanged { ids: Vec<ObjectId> },
    /// The whole scene was replaced from a snapshot.
    Restored,
}

// ─── Adapter ─────────────────────────────────────────────────────────────

pub type Selection = SmallVec<[ObjectId; 4]>;

pub struct SceneAdapter {
    graph: SceneGraph,
    selection: Selection,
    zoom: u16,
    zoom_min: u16,
    zoom_max: u16,
    zoom_step: u16,
    events: Vec<SceneEvent>,
}

impl SceneAdapter {
    pub fn new(config: &EditorConfig) -> Self {
        let zoom_min = config.zoom_min.min(config.zoom_max);
        let zoom_max = config.zoom_max.max(config.zoom_min);
        Self {
            graph: SceneGraph::new(
                config.surface_width,
                config.surface_height,
                config.background,
            ),
            selection: SmallVec::new(),
            zoom: config.zoom_initial.clamp(zoom_min, zoom_max),
            zoom_min,
            zoom_max,
            zoom_step: config.zoom_step.max(1),
            events: Vec::new(),
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn get(&self, id: ObjectId) -> Option<&Drawable> {
        self.graph.get(id)
    }

    /// Apply one mutation, queuing the matching notification.
    pub fn apply(&mut self, mutation: GraphMutation) -> Result<(), EditorError> {
        match mutation {
            GraphMutation::AddObject { object, internal } => {
                self.add_object(*object, internal);
            }
            GraphMutation::UpdateObject { id, props } => self.update_object(id, &props)?,
            GraphMutation::RemoveObject { id } => {
                self.remove_object(id)?;
            }
            GraphMutation::Translate { id, dx, dy } => {
                let obj = self
                    .graph
                    .get_mut(id)
                    .ok_or(EditorError::UnknownObject(id))?;
                obj.translate(dx, dy);
                self.events.push(SceneEvent::ObjectModified { id });
            }
            GraphMutation::SetBackground { color } => self.set_background(color),
            GraphMutation::SetVisible { id, visible } => {
                let obj = self
                    .graph
                    .get_mut(id)
                    .ok_or(EditorError::UnknownObject(id))?;
                if obj.visible != visible {
                    obj.visible = visible;
                    self.events
                        .push(SceneEvent::VisibilityChanged { id, visible });
                }
            }
            GraphMutation::ZOrder { id, op } => {
                if !self.graph.contains(id) {
                    return Err(EditorError::UnknownObject(id));
                }
                let moved = match op {
                    ZOrderOp::BringForward => self.graph.bring_forward(id),
                    ZOrderOp::SendBackward => self.graph.send_backward(id),
                    ZOrderOp::BringToFront => self.graph.bring_to_front(id),
                    ZOrderOp::SendToBack => self.graph.send_to_back(id),
                };
                if moved {
                    self.events.push(SceneEvent::ZOrderChanged { id });
                }
            }
            GraphMutation::Select { ids } => self.select(&ids),
            GraphMutation::ClearSelection => self.clear_selection(),
        }
        Ok(())
    }

    /// Insert an object on top of the paint order.
    pub fn add_object(&mut self, mut object: Drawable, internal: bool) -> ObjectId {
        object.internal = internal;
        let id = object.id;
        let is_path = matches!(object.kind, ObjectKind::Path { .. });
        self.graph.add(object);
        log::trace!("added {id:?} (internal: {internal})");
        self.events.push(SceneEvent::ObjectAdded { id, internal });
        if is_path && !internal {
            self.events.push(SceneEvent::PathCreated { id });
        }
        id
    }

    pub fn update_object(&mut self, id: ObjectId, props: &PropertyBag) -> Result<(), EditorError> {
        let obj = self
            .graph
            .get_mut(id)
            .ok_or(EditorError::UnknownObject(id))?;
        props.apply_to(obj);
        if props.text.is_some() {
            self.events.push(SceneEvent::TextChanged { id });
        } else {
            self.events.push(SceneEvent::ObjectModified { id });
        }
        Ok(())
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Result<Drawable, EditorError> {
        let removed = self
            .graph
            .remove(id)
            .ok_or(EditorError::UnknownObject(id))?;
        self.events.push(SceneEvent::ObjectRemoved { id });
        if self.selection.contains(&id) {
            self.selection.retain(|s| *s != id);
            self.events.push(SceneEvent::SelectionChanged {
                ids: self.selection.to_vec(),
            });
        }
        Ok(removed)
    }

    pub fn set_background(&mut self, color: Color) {
        if self.graph.background != color {
            self.graph.background = color;
            self.events.push(SceneEvent::BackgroundChanged);
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selection(&self) -> &[ObjectId] {
        &self.selection
    }

    /// Replace the selection. Unknown ids are dropped.
    pub fn select(&mut self, ids: &[ObjectId]) {
        let mut next = Selection::new();
        for id in ids {
            if self.graph.contains(*id) && !next.contains(id) {
                next.push(*id);
            }
        }
        if next != self.selection {
            self.selection = next;
            self.events.push(SceneEvent::SelectionChanged {
                ids: self.selection.to_vec(),
            });
        }
    }

    pub fn clear_selection(&mut self) {
        self.select(&[]);
    }

    /// Topmost visible, interactive object under the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ObjectId> {
        hit_test(&self.graph, x, y)
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    /// Set the zoom percentage, clamped into the configured range.
    /// Object geometry is never touched.
    pub fn set_zoom(&mut self, percent: u16) -> u16 {
        self.zoom = percent.clamp(self.zoom_min, self.zoom_max);
        self.zoom
    }

    /// Step up. Returns false when already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom >= self.zoom_max {
            return false;
        }
        self.set_zoom(self.zoom.saturating_add(self.zoom_step));
        true
    }

    /// Step down. Returns false when already at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom <= self.zoom_min {
            return false;
        }
        self.set_zoom(self.zoom.saturating_sub(self.zoom_step));
        true
    }

    /// On-screen size of the surface at the current zoom.
    pub fn viewport_size(&self) -> (f32, f32) {
        let scale = f32::from(self.zoom) / 100.0;
        (self.graph.width * scale, self.graph.height * scale)
    }

    // ─── Snapshots ───────────────────────────────────────────────────────

    pub fn serialize(&self) -> Result<String, SnapshotError> {
        self.graph.to_snapshot()
    }

    /// Replace the whole scene. On error the current scene is kept.
    /// The selection is cleared.
    pub fn deserialize(&mut self, blob: &str) -> Result<(), SnapshotError> {
        let graph = SceneGraph::from_snapshot(blob)?;
        self.graph = graph;
        self.selection.clear();
        self.events.push(SceneEvent::Restored);
        Ok(())
    }

    // ─── Silent reconfiguration ──────────────────────────────────────────

    /// Adjust every object's interaction flags without notifying.
    pub fn configure_objects(&mut self, mut f: impl FnMut(&mut Drawable)) {
        for obj in self.graph.objects_mut() {
            f(obj);
        }
    }

    /// Store the display name on the object so it survives snapshots.
    pub fn name_object(&mut self, id: ObjectId, name: &str) {
        if let Some(obj) = self.graph.get_mut(id) {
            obj.name = Some(name.to_owned());
        }
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}
