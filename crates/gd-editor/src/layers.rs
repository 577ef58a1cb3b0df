//! Layer list: an ordered, named view over the scene's objects.
//!
//! The list is stored back to front. Index 0 is always the synthetic
//! background layer, which targets the surface rather than an object and
//! can never be moved or deleted. Every other entry refers to exactly one
//! object by `ObjectId` and follows that object's paint position.
//!
//! Kind and default name are resolved from the object's `ObjectKind` when
//! the layer is created and stored on the entry.

use crate::error::EditorError;
use crate::scene::{GraphMutation, ZOrderOp};
use gd_core::id::{LayerId, ObjectId};
use gd_core::model::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Background,
    Shape,
    Text,
    Image,
    Adjustment,
}

impl LayerKind {
    pub fn of(kind: &ObjectKind) -> Self {
        match kind {
            ObjectKind::Rect { .. } | ObjectKind::Circle { .. } | ObjectKind::Path { .. } => {
                LayerKind::Shape
            }
            ObjectKind::Text { .. } => LayerKind::Text,
            ObjectKind::Image { .. } => LayerKind::Image,
        }
    }
}

/// Display name given to a fresh layer.
pub fn default_name(kind: &ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Rect { .. } => "Rectangle",
        ObjectKind::Circle { .. } => "Circle",
        ObjectKind::Text { .. } => "Text",
        ObjectKind::Path { .. } => "Path",
        ObjectKind::Image { .. } => "Image",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerTarget {
    Surface,
    Object(ObjectId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
    pub target: LayerTarget,
}

impl Layer {
    fn background(id: LayerId) -> Self {
        Self {
            id,
            name: "Background".into(),
            kind: LayerKind::Background,
            visible: true,
            target: LayerTarget::Surface,
        }
    }

    fn for_object(id: LayerId, obj: &Drawable) -> Self {
        Self {
            id,
            name: obj
                .name
                .clone()
                .unwrap_or_else(|| default_name(&obj.kind).to_owned()),
            kind: LayerKind::of(&obj.kind),
            visible: obj.visible,
            target: LayerTarget::Object(obj.id),
        }
    }

    pub fn object(&self) -> Option<ObjectId> {
        match self.target {
            LayerTarget::Object(id) => Some(id),
            LayerTarget::Surface => None,
        }
    }

    pub fn is_background(&self) -> bool {
        self.kind == LayerKind::Background
    }
}

/// What selecting a layer selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSelection {
    Object(ObjectId),
    /// The surface's background color.
    Background,
}

#[derive(Debug, Clone)]
pub struct LayerProjection {
    layers: Vec<Layer>,
    active: Option<LayerId>,
}

impl Default for LayerProjection {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerProjection {
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::background(LayerId::generate())],
            active: None,
        }
    }

    /// Back to front, background first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Never true: the background entry is always present.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn background(&self) -> &Layer {
        &self.layers[0]
    }

    pub fn active(&self) -> Option<LayerId> {
        self.active
    }

    pub fn layer_for(&self, object: ObjectId) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| l.target == LayerTarget::Object(object))
    }

    fn index_of(&self, id: LayerId) -> Result<usize, EditorError> {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .ok_or(EditorError::UnknownLayer(id))
    }

    // ─── Scene notifications ─────────────────────────────────────────────

    /// Append a layer for a newly added object. Returns `None` if the
    /// object already has one.
    pub fn on_object_added(&mut self, obj: &Drawable) -> Option<&Layer> {
        if self.layer_for(obj.id).is_some() {
            return None;
        }
        let layer = Layer::for_object(LayerId::generate(), obj);
        log::debug!("layer {} added for {:?}", layer.name, obj.id);
        self.layers.push(layer);
        self.layers.last()
    }

    pub fn on_object_removed(&mut self, object: ObjectId) -> Option<Layer> {
        let pos = self
            .layers
            .iter()
            .position(|l| l.target == LayerTarget::Object(object))?;
        let layer = self.layers.remove(pos);
        if self.active == Some(layer.id) {
            self.active = None;
        }
        Some(layer)
    }

    /// Track the scene selection: the first selected object's layer becomes
    /// active. An empty selection clears an active object layer but keeps
    /// the background active, since both target the surface.
    pub fn follow_selection(&mut self, selection: &[ObjectId]) {
        match selection.first() {
            Some(id) => self.active = self.layer_for(*id).map(|l| l.id),
            None => {
                let background = self.background().id;
                if self.active != Some(background) {
                    self.active = None;
                }
            }
        }
    }

    /// Rebuild from a restored or loaded scene. Surviving objects keep
    /// their layer id and name.
    pub fn rebuild(&mut self, graph: &SceneGraph) {
        let mut previous: HashMap<ObjectId, Layer> = self
            .layers
            .drain(1..)
            .filter_map(|l| l.object().map(|id| (id, l)))
            .collect();

        for obj in graph.objects().filter(|o| !o.internal) {
            let layer = match previous.remove(&obj.id) {
                Some(mut kept) => {
                    if let Some(name) = &obj.name {
                        kept.name.clone_from(name);
                    }
                    kept.kind = LayerKind::of(&obj.kind);
                    kept.visible = obj.visible;
                    kept
                }
                None => Layer::for_object(LayerId::generate(), obj),
            };
            self.layers.push(layer);
        }

        if let Some(active) = self.active
            && self.get(active).is_none()
        {
            self.active = None;
        }
        log::debug!("layers rebuilt: {} entries", self.layers.len());
    }

    /// Whether object layers mirror the scene's paint order one-to-one.
    pub fn is_consistent_with(&self, graph: &SceneGraph) -> bool {
        self.layers[0].is_background()
            && self.layers[1..]
                .iter()
                .map(Layer::object)
                .eq(graph.objects().filter(|o| !o.internal).map(|o| Some(o.id)))
    }

    // ─── User commands ───────────────────────────────────────────────────

    pub fn select(&mut self, id: LayerId) -> Result<LayerSelection, EditorError> {
        let target = self.layers[self.index_of(id)?].target;
        self.active = Some(id);
        Ok(match target {
            LayerTarget::Object(obj) => LayerSelection::Object(obj),
            LayerTarget::Surface => LayerSelection::Background,
        })
    }

    /// Flip the visibility flag. Object layers return the mutation that
    /// pushes the flag onto the object.
    pub fn toggle_visibility(&mut self, id: LayerId) -> Result<Option<GraphMutation>, EditorError> {
        let idx = self.index_of(id)?;
        let layer = &mut self.layers[idx];
        layer.visible = !layer.visible;
        Ok(layer.object().map(|obj| GraphMutation::SetVisible {
            id: obj,
            visible: layer.visible,
        }))
    }

    /// Move one step toward the front. The background never moves.
    pub fn move_up(&mut self, id: LayerId) -> Result<Option<GraphMutation>, EditorError> {
        let idx = self.index_of(id)?;
        if idx == 0 || idx + 1 >= self.layers.len() {
            return Ok(None);
        }
        self.layers.swap(idx, idx + 1);
        Ok(self.layers[idx + 1].object().map(|obj| GraphMutation::ZOrder {
            id: obj,
            op: ZOrderOp::BringForward,
        }))
    }

    /// Move one step toward the back, stopping above the background.
    pub fn move_down(&mut self, id: LayerId) -> Result<Option<GraphMutation>, EditorError> {
        let idx = self.index_of(id)?;
        if idx <= 1 {
            return Ok(None);
        }
        self.layers.swap(idx, idx - 1);
        Ok(self.layers[idx - 1].object().map(|obj| GraphMutation::ZOrder {
            id: obj,
            op: ZOrderOp::SendBackward,
        }))
    }

    /// Resolve a delete request to the object to remove. The layer itself
    /// goes away when the scene reports the removal.
    pub fn delete(&self, id: LayerId) -> Result<ObjectId, EditorError> {
        let layer = &self.layers[self.index_of(id)?];
        match layer.target {
            LayerTarget::Surface => Err(EditorError::BackgroundLayerLocked),
            LayerTarget::Object(obj) => Ok(obj),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle() -> Drawable {
        Drawable::new(ObjectKind::Circle { radius: 1.0 }, 0.0, 0.0)
    }

    #[test]
    fn starts_with_background_only() {
        let layers = LayerProjection::new();
        assert_eq!(layers.len(), 1);
        assert!(layers.background().is_background());
        assert_eq!(layers.background().target, LayerTarget::Surface);
    }

    #[test]
    fn kinds_and_default_names() {
        let mut layers = LayerProjection::new();
        let path = Drawable::new(
            ObjectKind::Path {
                commands: vec![PathCmd::MoveTo(0.0, 0.0)],
            },
            0.0,
            0.0,
        );
        let layer = layers.on_object_added(&path).unwrap();
        assert_eq!(layer.name, "Path");
        assert_eq!(layer.kind, LayerKind::Shape);

        let mut img = Drawable::new(
            ObjectKind::Image {
                source: "logo.png".into(),
                width: 1.0,
                height: 1.0,
            },
            0.0,
            0.0,
        );
        img.name = Some("Logo".into());
        let layer = layers.on_object_added(&img).unwrap();
        assert_eq!(layer.name, "Logo");
        assert_eq!(layer.kind, LayerKind::Image);
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let mut layers = LayerProjection::new();
        let c = circle();
        assert!(layers.on_object_added(&c).is_some());
        assert!(layers.on_object_added(&c).is_none());
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn removing_active_layer_clears_it() {
        let mut layers = LayerProjection::new();
        let c = circle();
        let id = layers.on_object_added(&c).unwrap().id;
        assert_eq!(layers.select(id).unwrap(), LayerSelection::Object(c.id));
        assert_eq!(layers.active(), Some(id));
        layers.on_object_removed(c.id);
        assert_eq!(layers.active(), None);
    }

    #[test]
    fn background_cannot_move_or_be_deleted() {
        let mut layers = LayerProjection::new();
        let c = circle();
        let obj_layer = layers.on_object_added(&c).unwrap().id;
        let bg = layers.background().id;

        assert!(matches!(layers.delete(bg), Err(EditorError::BackgroundLayerLocked)));
        assert_eq!(layers.move_up(bg).unwrap(), None);
        assert_eq!(layers.move_down(obj_layer).unwrap(), None);
        assert!(layers.background().is_background());
        assert_eq!(layers.select(bg).unwrap(), LayerSelection::Background);
    }

    #[test]
    fn moves_emit_matching_z_order_commands() {
        let mut layers = LayerProjection::new();
        let (a, b) = (circle(), circle());
        let la = layers.on_object_added(&a).unwrap().id;
        layers.on_object_added(&b);

        assert_eq!(
            layers.move_up(la).unwrap(),
            Some(GraphMutation::ZOrder {
                id: a.id,
                op: ZOrderOp::BringForward
            })
        );
        assert_eq!(layers.layers()[2].id, la);
        assert_eq!(layers.move_up(la).unwrap(), None, "already on top");
        assert_eq!(
            layers.move_down(la).unwrap(),
            Some(GraphMutation::ZOrder {
                id: a.id,
                op: ZOrderOp::SendBackward
            })
        );
    }

    #[test]
    fn unknown_layer_is_reported() {
        let mut layers = LayerProjection::new();
        let ghost = LayerId::intern("layer_ghost");
        assert!(matches!(
            layers.toggle_visibility(ghost),
            Err(EditorError::UnknownLayer(id)) if id == ghost
        ));
    }

    #[test]
    fn rebuild_keeps_surviving_layer_ids() {
        let mut graph = SceneGraph::default();
        let (a, b) = (circle(), circle());
        graph.add(a.clone());
        graph.add(b.clone());

        let mut layers = LayerProjection::new();
        let la = layers.on_object_added(&a).unwrap().id;
        layers.on_object_added(&b);
        let bg = layers.background().id;

        graph.remove(b.id);
        graph.add(circle());
        layers.rebuild(&graph);

        assert_eq!(layers.len(), 3);
        assert_eq!(layers.background().id, bg);
        assert_eq!(layers.layer_for(a.id).map(|l| l.id), Some(la));
        assert!(layers.layer_for(b.id).is_none());
        assert!(layers.is_consistent_with(&graph));
    }

    #[test]
    fn rebuild_skips_internal_objects() {
        let mut graph = SceneGraph::default();
        let mut guide = circle();
        guide.internal = true;
        graph.add(circle());
        graph.add(guide.clone());

        let mut layers = LayerProjection::new();
        layers.rebuild(&graph);
        assert_eq!(layers.len(), 2);
        assert!(layers.layer_for(guide.id).is_none());
        assert!(layers.is_consistent_with(&graph));
    }
}
