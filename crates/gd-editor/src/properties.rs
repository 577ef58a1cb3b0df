//! Property editors: read the selection's attributes and turn panel edits
//! into mutations.
//!
//! With nothing selected (or the background layer picked) color edits go
//! to the surface background.

use crate::scene::{GraphMutation, PropertyBag, SceneAdapter};
use gd_core::id::ObjectId;
use gd_core::model::*;
use std::collections::VecDeque;

/// What a property panel is currently editing.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTarget {
    Objects(Vec<ObjectId>),
    Background,
}

impl PropertyTarget {
    pub fn from_selection(selection: &[ObjectId]) -> Self {
        if selection.is_empty() {
            PropertyTarget::Background
        } else {
            PropertyTarget::Objects(selection.to_vec())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Fill,
    Stroke,
}

// ─── Color ───────────────────────────────────────────────────────────────

/// Current color shown by the color editor. For multiple objects the first
/// one wins.
pub fn read_color(scene: &SceneAdapter, target: &PropertyTarget, which: ColorTarget) -> Option<Color> {
    match target {
        PropertyTarget::Background => Some(scene.graph().background),
        PropertyTarget::Objects(ids) => {
            let obj = ids.iter().find_map(|id| scene.get(*id))?;
            match which {
                ColorTarget::Fill => obj.fill.color(),
                ColorTarget::Stroke => obj.stroke.map(|s| s.color),
            }
        }
    }
}

pub fn color_mutations(target: &PropertyTarget, which: ColorTarget, color: Color) -> Vec<GraphMutation> {
    match target {
        PropertyTarget::Background => vec![GraphMutation::SetBackground { color }],
        PropertyTarget::Objects(ids) => ids
            .iter()
            .map(|id| {
                let props = match which {
                    ColorTarget::Fill => PropertyBag {
                        fill: Some(Paint::Solid(color)),
                        ..Default::default()
                    },
                    ColorTarget::Stroke => PropertyBag {
                        stroke_color: Some(color),
                        ..Default::default()
                    },
                };
                GraphMutation::UpdateObject {
                    id: *id,
                    props: Box::new(props),
                }
            })
            .collect(),
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Editable geometry of a single object. Fields the kind lacks are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    pub stroke_width: Option<f32>,
}

pub fn read_geometry(obj: &Drawable) -> Geometry {
    let mut g = Geometry {
        left: Some(obj.left),
        top: Some(obj.top),
        stroke_width: obj.stroke.map(|s| s.width),
        ..Default::default()
    };
    match &obj.kind {
        ObjectKind::Rect { width, height } | ObjectKind::Image { width, height, .. } => {
            g.width = Some(*width);
            g.height = Some(*height);
        }
        ObjectKind::Circle { radius } => g.radius = Some(*radius),
        ObjectKind::Text { width, .. } => g.width = Some(*width),
        ObjectKind::Path { .. } => {}
    }
    g
}

/// Geometry edit for one object. Sizes are clamped to be non-negative.
pub fn geometry_mutation(id: ObjectId, geometry: Geometry) -> GraphMutation {
    let non_negative = |v: Option<f32>| v.map(|v| v.max(0.0));
    GraphMutation::UpdateObject {
        id,
        props: Box::new(PropertyBag {
            left: geometry.left,
            top: geometry.top,
            width: non_negative(geometry.width),
            height: non_negative(geometry.height),
            radius: non_negative(geometry.radius),
            stroke_width: non_negative(geometry.stroke_width),
            ..Default::default()
        }),
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
}

pub fn read_text(obj: &Drawable) -> Option<TextProps> {
    match &obj.kind {
        ObjectKind::Text { content, font, .. } => Some(TextProps {
            content: content.clone(),
            font_size: font.size,
            font_family: font.family.clone(),
        }),
        _ => None,
    }
}

/// Text edits apply to text objects only; other kinds in the target are
/// skipped.
pub fn text_mutations(
    scene: &SceneAdapter,
    target: &PropertyTarget,
    content: Option<&str>,
    font_size: Option<f32>,
) -> Vec<GraphMutation> {
    let PropertyTarget::Objects(ids) = target else {
        return vec![];
    };
    ids.iter()
        .filter(|id| {
            scene
                .get(**id)
                .is_some_and(|o| matches!(o.kind, ObjectKind::Text { .. }))
        })
        .map(|id| GraphMutation::UpdateObject {
            id: *id,
            props: Box::new(PropertyBag {
                text: content.map(str::to_owned),
                font_size: font_size.map(|s| s.clamp(1.0, 400.0)),
                ..Default::default()
            }),
        })
        .collect()
}

// ─── Brush ───────────────────────────────────────────────────────────────

/// Freehand brush. Width is clamped into `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub color: Color,
    pub width: f32,
}

impl BrushSettings {
    pub const MIN_WIDTH: f32 = 1.0;
    pub const MAX_WIDTH: f32 = 100.0;

    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width: width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH),
        }
    }
}

// ─── Recent colors ───────────────────────────────────────────────────────

/// Most-recently-used colors, newest first. Purely a panel convenience; it
/// is never saved with the canvas.
#[derive(Debug, Clone)]
pub struct RecentColors {
    colors: VecDeque<Color>,
    capacity: usize,
}

impl RecentColors {
    pub fn new(capacity: usize) -> Self {
        Self {
            colors: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Move `color` to the front. Colors compare by their hex form.
    pub fn push(&mut self, color: Color) {
        if self.capacity == 0 {
            return;
        }
        let hex = color.to_hex();
        self.colors.retain(|c| c.to_hex() != hex);
        self.colors.push_front(color);
        self.colors.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn recent_colors_dedup_and_cap() {
        let mut recent = RecentColors::new(5);
        for c in ["#111111", "#222222", "#333333", "#111111"] {
            recent.push(hex(c));
        }
        assert_eq!(recent.to_hex(), vec!["#111111", "#333333", "#222222"]);

        for c in ["#444444", "#555555", "#666666"] {
            recent.push(hex(c));
        }
        assert_eq!(recent.len(), 5);
        assert_eq!(recent.to_hex()[0], "#666666");
        assert!(!recent.to_hex().contains(&"#222222".to_string()));

        // Same color spelled in lowercase is still a duplicate.
        recent.push(hex("#444444"));
        recent.push(hex("#abcdef"));
        recent.push(hex("#ABCDEF"));
        assert_eq!(recent.to_hex()[..2], ["#ABCDEF", "#444444"]);
    }

    #[test]
    fn empty_selection_edits_background() {
        let scene = SceneAdapter::new(&EditorConfig::default());
        let target = PropertyTarget::from_selection(&[]);
        assert_eq!(target, PropertyTarget::Background);
        assert_eq!(read_color(&scene, &target, ColorTarget::Fill), Some(Color::WHITE));
        assert_eq!(
            color_mutations(&target, ColorTarget::Fill, Color::BLACK),
            vec![GraphMutation::SetBackground {
                color: Color::BLACK
            }]
        );
    }

    #[test]
    fn geometry_reads_kind_specific_fields() {
        let circle = Drawable::new(ObjectKind::Circle { radius: 12.0 }, 1.0, 2.0);
        let g = read_geometry(&circle);
        assert_eq!(g.radius, Some(12.0));
        assert_eq!(g.width, None);
        assert_eq!((g.left, g.top), (Some(1.0), Some(2.0)));
    }

    #[test]
    fn text_edits_skip_non_text_objects() {
        let mut scene = SceneAdapter::new(&EditorConfig::default());
        let rect = scene.add_object(
            Drawable::new(
                ObjectKind::Rect {
                    width: 1.0,
                    height: 1.0,
                },
                0.0,
                0.0,
            ),
            false,
        );
        let text = scene.add_object(
            Drawable::new(
                ObjectKind::Text {
                    content: "hi".into(),
                    font: FontSpec::default(),
                    width: 100.0,
                },
                0.0,
                0.0,
            ),
            false,
        );
        let target = PropertyTarget::Objects(vec![rect, text]);
        let muts = text_mutations(&scene, &target, Some("hello"), Some(0.0));
        assert_eq!(muts.len(), 1);
        for m in muts {
            scene.apply(m).unwrap();
        }
        let props = read_text(scene.get(text).unwrap()).unwrap();
        assert_eq!(props.content, "hello");
        assert_eq!(props.font_size, 1.0);
    }

    #[test]
    fn brush_width_is_clamped() {
        assert_eq!(BrushSettings::new(Color::BLACK, 0.0).width, 1.0);
        assert_eq!(BrushSettings::new(Color::BLACK, 500.0).width, 100.0);
    }
}
