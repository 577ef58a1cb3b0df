//! Core data model for GD canvases.
//!
//! A canvas is one drawing surface holding drawable objects (shapes, text
//! boxes, freehand paths, images). The surface is the root node of a
//! petgraph `StableDiGraph`; every object hangs off the root as a child.
//! Objects are owned here and referenced everywhere else by `ObjectId`.
//! Paint order (back to front) is kept explicitly so z-order commands are
//! plain list moves.

use crate::geometry::{Bounds, Point};
use crate::id::ObjectId;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Colors & Paint ──────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Channel values as 0..=255 integers (alpha dropped), for RGB sliders.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::from_rgb8(pair(0)?, pair(2)?, pair(4)?)),
            8 => {
                let mut c = Self::from_rgb8(pair(0)?, pair(2)?, pair(4)?);
                c.a = f32::from(pair(6)?) / 255.0;
                Some(c)
            }
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        let a = channel(self.a);
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Fill paint. `None` renders as transparent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Paint {
    #[default]
    None,
    Solid(Color),
}

impl Paint {
    pub fn color(&self) -> Option<Color> {
        match self {
            Paint::None => None,
            Paint::Solid(c) => Some(*c),
        }
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

// ─── Font / Text ─────────────────────────────────────────────────────────

/// Line height multiplier used to size text boxes.
pub const TEXT_LINE_HEIGHT: f32 = 1.16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub weight: u16, // 100..900
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".into(),
            weight: 400,
            size: 18.0,
        }
    }
}

// ─── Path data ───────────────────────────────────────────────────────────

/// A single path command, relative to the owning object's `(left, top)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32), // control, end
    Close,
}

impl PathCmd {
    fn points(&self) -> impl Iterator<Item = (f32, f32)> {
        let pts: [Option<(f32, f32)>; 2] = match *self {
            PathCmd::MoveTo(x, y) | PathCmd::LineTo(x, y) => [Some((x, y)), None],
            PathCmd::QuadTo(cx, cy, x, y) => [Some((cx, cy)), Some((x, y))],
            PathCmd::Close => [None, None],
        };
        pts.into_iter().flatten()
    }
}

/// Bounding box of a command list in its own coordinate space.
pub fn path_extent(commands: &[PathCmd]) -> Option<Bounds> {
    let mut pts = commands.iter().flat_map(PathCmd::points);
    let (x0, y0) = pts.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
    for (x, y) in pts {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Some(Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

// ─── Drawable objects ────────────────────────────────────────────────────

/// The concrete shape of a drawable. Resolved at creation time and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Rectangle anchored at its top-left corner.
    Rect { width: f32, height: f32 },
    /// Circle anchored at its center.
    Circle { radius: f32 },
    /// Editable text box with a fixed wrap width.
    Text {
        content: String,
        font: FontSpec,
        width: f32,
    },
    /// Freehand stroke.
    Path { commands: Vec<PathCmd> },
    /// Placed bitmap, referenced by source URL or data URI.
    Image {
        source: String,
        width: f32,
        height: f32,
    },
}

impl ObjectKind {
    /// Short lowercase tag used as the ID prefix.
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Rect { .. } => "rect",
            ObjectKind::Circle { .. } => "circle",
            ObjectKind::Text { .. } => "text",
            ObjectKind::Path { .. } => "path",
            ObjectKind::Image { .. } => "image",
        }
    }
}

/// One visual primitive placed on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub id: ObjectId,
    /// Display name carried along so layer names survive snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: ObjectKind,
    pub left: f32,
    pub top: f32,
    pub fill: Paint,
    pub stroke: Option<Stroke>,
    pub visible: bool,
    pub selectable: bool,
    pub evented: bool,
    pub erasable: bool,
    /// Editor helper that never gets a layer or an undo step.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
}

impl Drawable {
    /// New visible, selectable object with a generated ID.
    pub fn new(kind: ObjectKind, left: f32, top: f32) -> Self {
        let id = ObjectId::with_prefix(kind.type_name());
        Self::with_id(id, kind, left, top)
    }

    pub fn with_id(id: ObjectId, kind: ObjectKind, left: f32, top: f32) -> Self {
        Self {
            id,
            name: None,
            kind,
            left,
            top,
            fill: Paint::None,
            stroke: None,
            visible: true,
            selectable: true,
            evented: true,
            erasable: false,
            internal: false,
        }
    }

    pub fn with_fill(mut self, fill: Paint) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Axis-aligned bounds in surface coordinates (stroke width ignored).
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ObjectKind::Rect { width, height } | ObjectKind::Image { width, height, .. } => {
                Bounds::new(self.left, self.top, *width, *height)
            }
            ObjectKind::Circle { radius } => Bounds::around(self.position(), *radius),
            ObjectKind::Text { content, font, width } => {
                let lines = content.lines().count().max(1) as f32;
                Bounds::new(self.left, self.top, *width, font.size * TEXT_LINE_HEIGHT * lines)
            }
            ObjectKind::Path { commands } => match path_extent(commands) {
                Some(ext) => Bounds::new(self.left + ext.x, self.top + ext.y, ext.width, ext.height),
                None => Bounds::new(self.left, self.top, 0.0, 0.0),
            },
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.left += dx;
        self.top += dy;
    }
}

// ─── Scene Graph ─────────────────────────────────────────────────────────

/// Graph node payload: the surface root or a drawable object.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Surface,
    Object(Drawable),
}

/// The complete canvas: surface attributes plus objects in paint order.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// The underlying directed graph (surface → object containment).
    pub graph: StableDiGraph<SceneNode, ()>,

    /// The surface (root) node index.
    pub root: NodeIndex,

    /// Surface size in unzoomed units.
    pub width: f32,
    pub height: f32,

    /// Surface background color.
    pub background: Color,

    /// Index from ObjectId → NodeIndex for fast lookup.
    id_index: HashMap<ObjectId, NodeIndex>,

    /// Children of the root, back to front.
    paint_order: Vec<NodeIndex>,
}

impl SceneGraph {
    /// Create an empty surface.
    #[must_use]
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(SceneNode::Surface);
        Self {
            graph,
            root,
            width,
            height,
            background,
            id_index: HashMap::new(),
            paint_order: Vec::new(),
        }
    }

    /// Add an object on top of the paint order. An object with the same ID
    /// is replaced in place.
    pub fn add(&mut self, object: Drawable) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(&object.id)
            && let Some(slot) = self.graph.node_weight_mut(idx)
        {
            *slot = SceneNode::Object(object);
            return idx;
        }
        let id = object.id;
        let idx = self.graph.add_node(SceneNode::Object(object));
        self.graph.add_edge(self.root, idx, ());
        self.id_index.insert(id, idx);
        self.paint_order.push(idx);
        idx
    }

    /// Remove an object, keeping the index and paint order synchronized.
    pub fn remove(&mut self, id: ObjectId) -> Option<Drawable> {
        let idx = self.id_index.remove(&id)?;
        self.paint_order.retain(|&i| i != idx);
        match self.graph.remove_node(idx) {
            Some(SceneNode::Object(obj)) => Some(obj),
            _ => None,
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&Drawable> {
        let idx = self.id_index.get(&id)?;
        match self.graph.node_weight(*idx)? {
            SceneNode::Object(obj) => Some(obj),
            SceneNode::Surface => None,
        }
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Drawable> {
        let idx = self.id_index.get(&id)?;
        match self.graph.node_weight_mut(*idx)? {
            SceneNode::Object(obj) => Some(obj),
            SceneNode::Surface => None,
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Objects back to front.
    pub fn objects(&self) -> impl DoubleEndedIterator<Item = &Drawable> + '_ {
        self.paint_order
            .iter()
            .filter_map(|idx| match self.graph.node_weight(*idx) {
                Some(SceneNode::Object(obj)) => Some(obj),
                _ => None,
            })
    }

    /// Mutable access to every object (graph order, not paint order).
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Drawable> + '_ {
        self.graph.node_weights_mut().filter_map(|node| match node {
            SceneNode::Object(obj) => Some(obj),
            SceneNode::Surface => None,
        })
    }

    /// Object IDs back to front.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects().map(|o| o.id).collect()
    }

    /// Position in the paint order (0 = backmost).
    pub fn position_of(&self, id: ObjectId) -> Option<usize> {
        let idx = self.id_index.get(&id)?;
        self.paint_order.iter().position(|i| i == idx)
    }

    pub fn len(&self) -> usize {
        self.paint_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paint_order.is_empty()
    }

    /// Move an object one step toward the front. Returns true if the order changed.
    pub fn bring_forward(&mut self, id: ObjectId) -> bool {
        match self.position_of(id) {
            Some(pos) if pos + 1 < self.paint_order.len() => self.reorder(pos, pos + 1),
            _ => false,
        }
    }

    /// Move an object one step toward the back. Returns true if the order changed.
    pub fn send_backward(&mut self, id: ObjectId) -> bool {
        match self.position_of(id) {
            Some(pos) if pos > 0 => self.reorder(pos, pos - 1),
            _ => false,
        }
    }

    /// Move an object to the front of z-order.
    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        let last = self.paint_order.len().saturating_sub(1);
        match self.position_of(id) {
            Some(pos) if pos < last => self.reorder(pos, last),
            _ => false,
        }
    }

    /// Move an object to the back of z-order.
    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        match self.position_of(id) {
            Some(pos) if pos > 0 => self.reorder(pos, 0),
            _ => false,
        }
    }

    fn reorder(&mut self, from: usize, to: usize) -> bool {
        let idx = self.paint_order.remove(from);
        self.paint_order.insert(to, idx);
        true
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new(1600.0, 900.0, Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(name: &str, w: f32, h: f32) -> Drawable {
        Drawable::with_id(
            ObjectId::intern(name),
            ObjectKind::Rect {
                width: w,
                height: h,
            },
            0.0,
            0.0,
        )
    }

    #[test]
    fn scene_graph_basics() {
        let mut sg = SceneGraph::default();
        sg.add(rect("box1", 100.0, 50.0));

        assert!(sg.get(ObjectId::intern("box1")).is_some());
        assert_eq!(sg.len(), 1);
        assert_eq!(sg.ids(), vec![ObjectId::intern("box1")]);

        let removed = sg.remove(ObjectId::intern("box1")).unwrap();
        assert_eq!(removed.id, ObjectId::intern("box1"));
        assert!(sg.is_empty());
        assert!(sg.remove(ObjectId::intern("box1")).is_none());
    }

    #[test]
    fn re_adding_same_id_replaces_in_place() {
        let mut sg = SceneGraph::default();
        sg.add(rect("dup_a", 1.0, 1.0));
        sg.add(rect("dup_b", 1.0, 1.0));
        sg.add(rect("dup_a", 9.0, 9.0));
        assert_eq!(sg.len(), 2);
        assert_eq!(sg.position_of(ObjectId::intern("dup_a")), Some(0));
        assert!(matches!(
            sg.get(ObjectId::intern("dup_a")).unwrap().kind,
            ObjectKind::Rect { width, .. } if width == 9.0
        ));
    }

    #[test]
    fn z_order_moves() {
        let mut sg = SceneGraph::default();
        let (a, b, c) = (
            ObjectId::intern("z_a"),
            ObjectId::intern("z_b"),
            ObjectId::intern("z_c"),
        );
        sg.add(rect("z_a", 1.0, 1.0));
        sg.add(rect("z_b", 1.0, 1.0));
        sg.add(rect("z_c", 1.0, 1.0));

        assert!(sg.bring_forward(a));
        assert_eq!(sg.ids(), vec![b, a, c]);
        assert!(!sg.bring_forward(c), "already at front");
        assert!(sg.send_backward(c));
        assert_eq!(sg.ids(), vec![b, c, a]);
        assert!(sg.send_to_back(a));
        assert_eq!(sg.ids(), vec![a, b, c]);
        assert!(sg.bring_to_front(a));
        assert_eq!(sg.ids(), vec![b, c, a]);
        assert!(!sg.send_backward(b), "already at back");
    }

    #[test]
    fn circle_bounds_are_centered() {
        let c = Drawable::new(ObjectKind::Circle { radius: 50.0 }, 300.0, 300.0);
        assert_eq!(c.bounds(), Bounds::new(250.0, 250.0, 100.0, 100.0));
    }

    #[test]
    fn path_bounds_offset_by_origin() {
        let p = Drawable::new(
            ObjectKind::Path {
                commands: vec![PathCmd::MoveTo(0.0, 0.0), PathCmd::LineTo(20.0, 10.0)],
            },
            5.0,
            5.0,
        );
        assert_eq!(p.bounds(), Bounds::new(5.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");
        assert_eq!(c.to_rgb8(), (0x6C, 0x5C, 0xE7));

        let c2 = Color::from_hex("#FF000080").unwrap();
        assert!((c2.a - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(c2.to_hex().len(), 9); // #RRGGBBAA

        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }
}
