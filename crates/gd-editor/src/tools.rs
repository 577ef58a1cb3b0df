//! Tool system for canvas interactions.
//!
//! Each tool translates pointer events into `GraphMutation` values that the
//! session applies through the `SceneAdapter`. Only the active tool sees
//! input, so at most one gesture is ever in progress.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Select Tool | Rectangle Tool | Circle Tool |
//! |----------|-------------|----------------|-------------|
//! | **Shift** | Toggle selection, axis-constrain drag | Square constraint | n/a |

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::input::InputEvent;
use crate::properties::BrushSettings;
use crate::scene::{GraphMutation, PropertyBag, SceneAdapter};
use gd_core::id::ObjectId;
use gd_core::model::*;
use gd_core::{Bounds, Point, hit_test_rect};
use std::fmt;

/// The active tool determines how input events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Select,
    Draw,
    Rectangle,
    Circle,
    Text,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Select,
        ToolKind::Draw,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Text,
        ToolKind::Eraser,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Draw => "draw",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
            ToolKind::Eraser => "eraser",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle an input event, returning zero or more mutations.
    fn handle(&mut self, event: &InputEvent, scene: &SceneAdapter) -> Vec<GraphMutation>;

    /// Abandon any gesture in progress, returning the mutations that take
    /// back whatever it already put in the scene.
    fn cancel(&mut self) -> Vec<GraphMutation>;

    fn is_active(&self) -> bool;
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SelectTool {
    /// Objects moved by the current drag.
    targets: Vec<ObjectId>,
    dragging: bool,
    last_x: f32,
    last_y: f32,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn handle(&mut self, event: &InputEvent, scene: &SceneAdapter) -> Vec<GraphMutation> {
        match *event {
            InputEvent::PointerDown {
                x, y, modifiers, ..
            } => {
                let hit = scene
                    .hit_test(x, y)
                    .filter(|id| scene.get(*id).is_some_and(|o| o.selectable));

                let Some(hit_id) = hit else {
                    // Click on empty space
                    self.dragging = false;
                    self.targets.clear();
                    if modifiers.shift {
                        return vec![];
                    }
                    return vec![GraphMutation::ClearSelection];
                };

                let mut selected = scene.selection().to_vec();
                if modifiers.shift {
                    // Shift+click: toggle in/out of selection
                    if let Some(pos) = selected.iter().position(|id| *id == hit_id) {
                        selected.remove(pos);
                    } else {
                        selected.push(hit_id);
                    }
                } else if !selected.contains(&hit_id) {
                    selected = vec![hit_id];
                }

                self.dragging = !selected.is_empty();
                self.targets.clone_from(&selected);
                self.last_x = x;
                self.last_y = y;
                vec![GraphMutation::Select { ids: selected }]
            }
            InputEvent::PointerMove {
                x, y, modifiers, ..
            } => {
                if !self.dragging {
                    return vec![];
                }
                let mut dx = x - self.last_x;
                let mut dy = y - self.last_y;
                self.last_x = x;
                self.last_y = y;

                // Shift: constrain to dominant axis
                if modifiers.shift {
                    if dx.abs() > dy.abs() {
                        dy = 0.0;
                    } else {
                        dx = 0.0;
                    }
                }
                if dx == 0.0 && dy == 0.0 {
                    return vec![];
                }

                self.targets
                    .iter()
                    .map(|id| GraphMutation::Translate { id: *id, dx, dy })
                    .collect()
            }
            InputEvent::PointerUp { .. } => self.cancel(),
        }
    }

    fn cancel(&mut self) -> Vec<GraphMutation> {
        self.dragging = false;
        self.targets.clear();
        vec![]
    }

    fn is_active(&self) -> bool {
        self.dragging
    }
}

// ─── Shape Tools ─────────────────────────────────────────────────────────

/// Shape being dragged out: its id and the anchor point.
#[derive(Debug, Clone, Copy)]
struct ShapeGesture {
    id: ObjectId,
    anchor: Point,
}

/// Finish a shape: last geometry, then selectable and selected.
fn finish_shape(id: ObjectId, mut geometry: PropertyBag) -> Vec<GraphMutation> {
    geometry.selectable = Some(true);
    vec![
        GraphMutation::UpdateObject {
            id,
            props: Box::new(geometry),
        },
        GraphMutation::Select { ids: vec![id] },
    ]
}

/// A shape dragged out but never released is removed again.
fn abandon_shape(gesture: Option<ShapeGesture>) -> Vec<GraphMutation> {
    gesture
        .map(|g| vec![GraphMutation::RemoveObject { id: g.id }])
        .unwrap_or_default()
}

pub struct RectangleTool {
    stroke: Stroke,
    gesture: Option<ShapeGesture>,
}

impl RectangleTool {
    pub fn new(stroke: Stroke) -> Self {
        Self {
            stroke,
            gesture: None,
        }
    }

    /// Geometry for a drag from the anchor to `(x, y)`. The anchor corner
    /// stays fixed when the pointer crosses above or left of it.
    fn geometry(anchor: Point, x: f32, y: f32, square: bool) -> PropertyBag {
        let mut w = (x - anchor.x).abs();
        let mut h = (y - anchor.y).abs();

        // Shift: constrain to square
        if square {
            let side = w.max(h);
            w = side;
            h = side;
        }

        PropertyBag {
            left: Some(if x < anchor.x { anchor.x - w } else { anchor.x }),
            top: Some(if y < anchor.y { anchor.y - h } else { anchor.y }),
            width: Some(w),
            height: Some(h),
            ..Default::default()
        }
    }
}

impl Tool for RectangleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Rectangle
    }

    fn handle(&mut self, event: &InputEvent, _scene: &SceneAdapter) -> Vec<GraphMutation> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                let mut rect = Drawable::new(
                    ObjectKind::Rect {
                        width: 0.0,
                        height: 0.0,
                    },
                    x,
                    y,
                )
                .with_stroke(self.stroke);
                rect.selectable = false;
                self.gesture = Some(ShapeGesture {
                    id: rect.id,
                    anchor: Point::new(x, y),
                });
                vec![GraphMutation::AddObject {
                    object: Box::new(rect),
                    internal: false,
                }]
            }
            InputEvent::PointerMove {
                x, y, modifiers, ..
            } => match self.gesture {
                Some(g) => vec![GraphMutation::UpdateObject {
                    id: g.id,
                    props: Box::new(Self::geometry(g.anchor, x, y, modifiers.shift)),
                }],
                None => vec![],
            },
            InputEvent::PointerUp { x, y, modifiers } => match self.gesture.take() {
                Some(g) => finish_shape(g.id, Self::geometry(g.anchor, x, y, modifiers.shift)),
                None => vec![],
            },
        }
    }

    fn cancel(&mut self) -> Vec<GraphMutation> {
        abandon_shape(self.gesture.take())
    }

    fn is_active(&self) -> bool {
        self.gesture.is_some()
    }
}

pub struct CircleTool {
    stroke: Stroke,
    gesture: Option<ShapeGesture>,
}

impl CircleTool {
    pub fn new(stroke: Stroke) -> Self {
        Self {
            stroke,
            gesture: None,
        }
    }

    fn radius_to(center: Point, x: f32, y: f32) -> PropertyBag {
        PropertyBag {
            radius: Some(center.distance_to(Point::new(x, y))),
            ..Default::default()
        }
    }
}

impl Tool for CircleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Circle
    }

    fn handle(&mut self, event: &InputEvent, _scene: &SceneAdapter) -> Vec<GraphMutation> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                let mut circle = Drawable::new(ObjectKind::Circle { radius: 0.0 }, x, y)
                    .with_stroke(self.stroke);
                circle.selectable = false;
                self.gesture = Some(ShapeGesture {
                    id: circle.id,
                    anchor: Point::new(x, y),
                });
                vec![GraphMutation::AddObject {
                    object: Box::new(circle),
                    internal: false,
                }]
            }
            InputEvent::PointerMove { x, y, .. } => match self.gesture {
                Some(g) => vec![GraphMutation::UpdateObject {
                    id: g.id,
                    props: Box::new(Self::radius_to(g.anchor, x, y)),
                }],
                None => vec![],
            },
            InputEvent::PointerUp { x, y, .. } => match self.gesture.take() {
                Some(g) => finish_shape(g.id, Self::radius_to(g.anchor, x, y)),
                None => vec![],
            },
        }
    }

    fn cancel(&mut self) -> Vec<GraphMutation> {
        abandon_shape(self.gesture.take())
    }

    fn is_active(&self) -> bool {
        self.gesture.is_some()
    }
}

// ─── Text Tool ───────────────────────────────────────────────────────────

/// Inserts one text box, then disarms until the tool is selected again.
pub struct TextTool {
    armed: bool,
    content: String,
    font: FontSpec,
    width: f32,
    fill: Color,
}

impl TextTool {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            armed: true,
            content: config.text_content.clone(),
            font: FontSpec {
                family: config.text_font_family.clone(),
                size: config.text_font_size,
                ..FontSpec::default()
            },
            width: config.text_width,
            fill: config.text_fill,
        }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn handle(&mut self, event: &InputEvent, _scene: &SceneAdapter) -> Vec<GraphMutation> {
        let InputEvent::PointerDown { x, y, .. } = *event else {
            return vec![];
        };
        if !self.armed {
            return vec![];
        }
        self.armed = false;

        let text = Drawable::new(
            ObjectKind::Text {
                content: self.content.clone(),
                font: self.font.clone(),
                width: self.width,
            },
            x,
            y,
        )
        .with_fill(Paint::Solid(self.fill));
        let id = text.id;
        vec![
            GraphMutation::AddObject {
                object: Box::new(text),
                internal: false,
            },
            GraphMutation::Select { ids: vec![id] },
        ]
    }

    fn cancel(&mut self) -> Vec<GraphMutation> {
        vec![]
    }

    fn is_active(&self) -> bool {
        false
    }
}

// ─── Draw Tool (freehand) ────────────────────────────────────────────────

struct StrokeGesture {
    points: Vec<Point>,
    brush: BrushSettings,
}

pub struct DrawTool {
    brush: BrushSettings,
    stroke: Option<StrokeGesture>,
}

impl DrawTool {
    pub fn new(brush: BrushSettings) -> Self {
        Self {
            brush,
            stroke: None,
        }
    }

    /// Takes effect from the next stroke; a stroke in progress keeps the
    /// brush it started with.
    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.brush = brush;
    }

    /// Points of the stroke in progress, for live preview.
    pub fn pending_points(&self) -> Option<&[Point]> {
        self.stroke.as_ref().map(|s| s.points.as_slice())
    }

    fn push_point(points: &mut Vec<Point>, p: Point) {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }

    /// Build a path object whose origin is the stroke's top-left extent.
    fn commit(gesture: StrokeGesture) -> Option<Drawable> {
        let first = *gesture.points.first()?;
        let (min_x, min_y) = gesture
            .points
            .iter()
            .fold((first.x, first.y), |(mx, my), p| (mx.min(p.x), my.min(p.y)));

        let mut commands: Vec<PathCmd> = gesture
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let (x, y) = (p.x - min_x, p.y - min_y);
                if i == 0 {
                    PathCmd::MoveTo(x, y)
                } else {
                    PathCmd::LineTo(x, y)
                }
            })
            .collect();
        if gesture.points.len() == 1 {
            // A tap leaves a dot
            commands.push(PathCmd::LineTo(0.0, 0.0));
        }

        let path = Drawable::new(ObjectKind::Path { commands }, min_x, min_y).with_stroke(Stroke {
            color: gesture.brush.color,
            width: gesture.brush.width,
        });
        Some(path)
    }
}

impl Tool for DrawTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Draw
    }

    fn handle(&mut self, event: &InputEvent, _scene: &SceneAdapter) -> Vec<GraphMutation> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                self.stroke = Some(StrokeGesture {
                    points: vec![Point::new(x, y)],
                    brush: self.brush,
                });
                vec![]
            }
            InputEvent::PointerMove { x, y, .. } => {
                if let Some(stroke) = &mut self.stroke {
                    Self::push_point(&mut stroke.points, Point::new(x, y));
                }
                vec![]
            }
            InputEvent::PointerUp { x, y, .. } => {
                let Some(mut stroke) = self.stroke.take() else {
                    return vec![];
                };
                Self::push_point(&mut stroke.points, Point::new(x, y));
                match Self::commit(stroke) {
                    Some(path) => vec![GraphMutation::AddObject {
                        object: Box::new(path),
                        internal: false,
                    }],
                    None => vec![],
                }
            }
        }
    }

    fn cancel(&mut self) -> Vec<GraphMutation> {
        self.stroke = None;
        vec![]
    }

    fn is_active(&self) -> bool {
        self.stroke.is_some()
    }
}

// ─── Eraser Tool ─────────────────────────────────────────────────────────

/// Deletes whole erasable objects under a square footprint.
pub struct EraserTool {
    width: f32,
    erasing: bool,
}

impl EraserTool {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            erasing: false,
        }
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    fn erase_at(&self, x: f32, y: f32, scene: &SceneAdapter) -> Vec<GraphMutation> {
        let footprint = Bounds::around(Point::new(x, y), self.width / 2.0);
        hit_test_rect(scene.graph(), &footprint)
            .into_iter()
            .filter(|id| scene.get(*id).is_some_and(|o| o.erasable))
            .map(|id| GraphMutation::RemoveObject { id })
            .collect()
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn handle(&mut self, event: &InputEvent, scene: &SceneAdapter) -> Vec<GraphMutation> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                self.erasing = true;
                self.erase_at(x, y, scene)
            }
            InputEvent::PointerMove { x, y, .. } if self.erasing => self.erase_at(x, y, scene),
            InputEvent::PointerMove { .. } => vec![],
            InputEvent::PointerUp { .. } => {
                self.erasing = false;
                vec![]
            }
        }
    }

    fn cancel(&mut self) -> Vec<GraphMutation> {
        self.erasing = false;
        vec![]
    }

    fn is_active(&self) -> bool {
        self.erasing
    }
}

// ─── Tool Machine ────────────────────────────────────────────────────────

/// Back-end features some tools depend on. A host that cannot provide one
/// turns it off and the matching tool degrades to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCapabilities {
    pub freehand: bool,
    pub eraser: bool,
}

impl Default for ToolCapabilities {
    fn default() -> Self {
        Self {
            freehand: true,
            eraser: true,
        }
    }
}

/// Owns one instance of every tool and routes input to the active one.
pub struct ToolMachine {
    active: ToolKind,
    capabilities: ToolCapabilities,
    select: SelectTool,
    draw: DrawTool,
    rectangle: RectangleTool,
    circle: CircleTool,
    text: TextTool,
    eraser: EraserTool,
}

impl ToolMachine {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_capabilities(config, ToolCapabilities::default())
    }

    pub fn with_capabilities(config: &EditorConfig, capabilities: ToolCapabilities) -> Self {
        let brush = BrushSettings::new(config.brush_color, config.brush_width);
        let stroke = Stroke {
            color: config.shape_stroke,
            width: config.shape_stroke_width,
        };
        Self {
            active: ToolKind::Select,
            capabilities,
            select: SelectTool::new(),
            draw: DrawTool::new(brush),
            rectangle: RectangleTool::new(stroke),
            circle: CircleTool::new(stroke),
            text: TextTool::new(config),
            eraser: EraserTool::new(brush.width),
        }
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn capabilities(&self) -> ToolCapabilities {
        self.capabilities
    }

    fn is_available(&self, kind: ToolKind) -> bool {
        match kind {
            ToolKind::Draw => self.capabilities.freehand,
            ToolKind::Eraser => self.capabilities.eraser,
            _ => true,
        }
    }

    fn tool_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Select => &mut self.select,
            ToolKind::Draw => &mut self.draw,
            ToolKind::Rectangle => &mut self.rectangle,
            ToolKind::Circle => &mut self.circle,
            ToolKind::Text => &mut self.text,
            ToolKind::Eraser => &mut self.eraser,
        }
    }

    fn tool(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Select => &self.select,
            ToolKind::Draw => &self.draw,
            ToolKind::Rectangle => &self.rectangle,
            ToolKind::Circle => &self.circle,
            ToolKind::Text => &self.text,
            ToolKind::Eraser => &self.eraser,
        }
    }

    /// Switch tools. The previous tool's gesture is abandoned and object
    /// flags are reconfigured for the new mode. An unavailable tool leaves
    /// the machine in select mode and reports the failure.
    pub fn set_tool(&mut self, kind: ToolKind, scene: &mut SceneAdapter) -> Result<ToolKind, EditorError> {
        let previous = self.active;
        for mutation in self.tool_mut(previous).cancel() {
            if let Err(err) = scene.apply(mutation) {
                log::warn!("could not roll back {previous} gesture: {err}");
            }
        }

        let (target, result) = if self.is_available(kind) {
            (kind, Ok(kind))
        } else {
            log::warn!("{kind} tool unavailable, falling back to select");
            (ToolKind::Select, Err(EditorError::ToolUnavailable(kind)))
        };

        self.active = target;
        if target == ToolKind::Text {
            self.text.arm();
        }
        self.reconfigure(scene);
        log::debug!("tool {previous} -> {target}");
        result
    }

    /// Apply the active mode's interaction flags to every object. Needed
    /// whenever the scene is replaced, since snapshots carry the flags of
    /// the mode they were taken in.
    pub fn reconfigure(&self, scene: &mut SceneAdapter) {
        match self.active {
            ToolKind::Select => scene.configure_objects(|obj| {
                obj.selectable = true;
                obj.evented = true;
            }),
            ToolKind::Eraser => scene.configure_objects(|obj| obj.erasable = true),
            _ => {}
        }
    }

    /// Route an input event to the active tool.
    pub fn handle(&mut self, event: &InputEvent, scene: &SceneAdapter) -> Vec<GraphMutation> {
        let active = self.active;
        self.tool_mut(active).handle(event, scene)
    }

    pub fn is_gesture_active(&self) -> bool {
        self.tool(self.active).is_active()
    }

    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.draw.set_brush(brush);
        self.eraser.set_width(brush.width);
    }

    pub fn pending_stroke(&self) -> Option<&[Point]> {
        self.draw.pending_points()
    }

    pub fn text_armed(&self) -> bool {
        self.text.is_armed()
    }
}
