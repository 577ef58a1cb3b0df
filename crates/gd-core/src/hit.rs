//! Hit testing: point → object lookup.
//!
//! Walks the paint order front-to-back to find which object is at a given
//! (x, y) surface position. Hidden objects and objects with `evented`
//! switched off never receive hits.

use crate::geometry::Bounds;
use crate::id::ObjectId;
use crate::model::*;

/// Find the topmost object at position (px, py).
/// Returns `None` if nothing is hit (bare surface).
pub fn hit_test(graph: &SceneGraph, px: f32, py: f32) -> Option<ObjectId> {
    // Last painted = topmost
    graph
        .objects()
        .rev()
        .filter(|obj| obj.visible && obj.evented)
        .find(|obj| contains_point(obj, px, py))
        .map(|obj| obj.id)
}

fn contains_point(obj: &Drawable, px: f32, py: f32) -> bool {
    match obj.kind {
        ObjectKind::Circle { radius } => {
            let (dx, dy) = (px - obj.left, py - obj.top);
            dx * dx + dy * dy <= radius * radius
        }
        _ => obj.bounds().contains(px, py),
    }
}

/// Find all visible objects whose bounds intersect the given rectangle,
/// back to front. Used for marquee selection and the eraser footprint.
pub fn hit_test_rect(graph: &SceneGraph, rect: &Bounds) -> Vec<ObjectId> {
    graph
        .objects()
        .filter(|obj| obj.visible && obj.bounds().intersects(rect))
        .map(|obj| obj.id)
        .collect()
}
