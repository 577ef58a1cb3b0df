//! Integration tests: pointer gestures through the session's tool machine.

use gd_core::model::*;
use gd_core::{Bounds, Point};
use gd_editor::input::Modifiers;
use gd_editor::shortcuts::KeyInput;
use gd_editor::tools::ToolKind;
use gd_editor::{EditorConfig, EditorSession};
use pretty_assertions::assert_eq;

fn session() -> EditorSession {
    EditorSession::new(EditorConfig::default()).unwrap()
}

fn only_object(s: &EditorSession) -> &Drawable {
    assert_eq!(s.graph().len(), 1);
    s.graph().objects().next().unwrap()
}

// ─── Shapes ─────────────────────────────────────────────────────────────

#[test]
fn rectangle_negative_drag_keeps_the_start_corner() {
    let mut s = session();
    s.set_tool(ToolKind::Rectangle).unwrap();
    s.pointer_down(200.0, 200.0, Modifiers::NONE, 0.0);
    s.pointer_move(150.0, 120.0, Modifiers::NONE, 10.0);
    s.pointer_up(100.0, 100.0, Modifiers::NONE, 20.0);

    let rect = only_object(&s);
    assert_eq!((rect.left, rect.top), (100.0, 100.0));
    assert_eq!(
        rect.kind,
        ObjectKind::Rect {
            width: 100.0,
            height: 100.0
        }
    );
    assert!(rect.selectable);
    assert_eq!(rect.fill, Paint::None);
    assert_eq!(
        rect.stroke,
        Some(Stroke {
            color: Color::BLACK,
            width: 2.0
        })
    );
    assert_eq!(s.selection(), &[rect.id]);
}

#[test]
fn circle_radius_is_distance_to_release() {
    let mut s = session();
    s.set_tool(ToolKind::Circle).unwrap();
    s.pointer_down(300.0, 300.0, Modifiers::NONE, 0.0);
    s.pointer_move(320.0, 300.0, Modifiers::NONE, 10.0);
    s.pointer_up(350.0, 300.0, Modifiers::NONE, 20.0);

    let circle = only_object(&s);
    assert_eq!(circle.kind, ObjectKind::Circle { radius: 50.0 });
    assert_eq!(circle.bounds(), Bounds::new(250.0, 250.0, 100.0, 100.0));
}

#[test]
fn switching_tools_mid_drag_drops_the_shape() {
    let mut s = session();
    s.set_tool(ToolKind::Rectangle).unwrap();
    s.pointer_down(100.0, 100.0, Modifiers::NONE, 0.0);
    assert_eq!(s.layers().len(), 2);

    s.set_tool(ToolKind::Circle).unwrap();
    assert!(s.graph().is_empty());
    assert_eq!(s.layers().len(), 1);
    // The abandoned shape leaves nothing behind to record.
    s.tick(1_000.0);
    assert!(!s.can_undo());
}

#[test]
fn shift_drag_draws_a_square() {
    let mut s = session();
    s.set_tool(ToolKind::Rectangle).unwrap();
    s.pointer_down(0.0, 0.0, Modifiers::NONE, 0.0);
    s.pointer_up(80.0, 30.0, Modifiers::SHIFT, 10.0);
    assert_eq!(only_object(&s).bounds(), Bounds::new(0.0, 0.0, 80.0, 80.0));
}

// ─── Text ───────────────────────────────────────────────────────────────

#[test]
fn text_tool_is_one_shot_until_reselected() {
    let mut s = session();
    s.set_tool(ToolKind::Text).unwrap();
    s.pointer_down(40.0, 60.0, Modifiers::NONE, 0.0);
    s.pointer_up(40.0, 60.0, Modifiers::NONE, 5.0);
    s.pointer_down(300.0, 300.0, Modifiers::NONE, 10.0);
    assert_eq!(s.graph().len(), 1);
    assert_eq!(s.active_tool(), ToolKind::Text);

    let text = only_object(&s);
    assert_eq!((text.left, text.top), (40.0, 60.0));
    assert_eq!(text.fill.color(), Some(Color::BLACK));
    let ObjectKind::Text { content, font, width } = &text.kind else {
        panic!("expected text, got {:?}", text.kind);
    };
    assert_eq!(content, "Click to edit text");
    assert_eq!(font.size, 18.0);
    assert_eq!(*width, 200.0);

    s.set_tool(ToolKind::Select).unwrap();
    s.set_tool(ToolKind::Text).unwrap();
    s.pointer_down(300.0, 300.0, Modifiers::NONE, 20.0);
    assert_eq!(s.graph().len(), 2);
}

#[test]
fn editing_text_content_and_size() {
    let mut s = session();
    s.set_tool(ToolKind::Text).unwrap();
    s.pointer_down(0.0, 0.0, Modifiers::NONE, 0.0);
    s.set_text("Grand\nOpening", 10.0).unwrap();
    s.set_font_size(40.0, 20.0).unwrap();

    let text = only_object(&s);
    assert!(matches!(&text.kind, ObjectKind::Text { content, font, .. }
        if content == "Grand\nOpening" && font.size == 40.0));
    // Two lines at 40px with the 1.16 line height.
    assert!((text.bounds().height - 92.8).abs() < 1e-3);
}

// ─── Freehand ───────────────────────────────────────────────────────────

#[test]
fn freehand_stroke_commits_one_path() {
    let mut s = session();
    s.set_tool(ToolKind::Draw).unwrap();
    s.pointer_down(10.0, 10.0, Modifiers::NONE, 0.0);
    for i in 1..=5 {
        s.pointer_move(10.0 + i as f32 * 4.0, 10.0 + i as f32, Modifiers::NONE, f64::from(i));
        assert!(s.graph().is_empty(), "nothing is committed mid-stroke");
    }
    assert_eq!(s.tools().pending_stroke().map(|p| p[0]), Some(Point::new(10.0, 10.0)));
    s.pointer_up(30.0, 15.0, Modifiers::NONE, 10.0);

    let path = only_object(&s);
    assert_eq!(path.bounds(), Bounds::new(10.0, 10.0, 20.0, 5.0));
    assert_eq!(s.layers().len(), 2);
    assert!(s.selection().is_empty());
}

#[test]
fn brush_change_applies_to_next_stroke_only() {
    let mut s = session();
    s.set_tool(ToolKind::Draw).unwrap();
    s.pointer_down(0.0, 0.0, Modifiers::NONE, 0.0);
    s.pointer_up(10.0, 10.0, Modifiers::NONE, 5.0);

    let red = Color::from_hex("#FF0000").unwrap();
    s.set_brush(red, 9.0);
    s.pointer_down(50.0, 50.0, Modifiers::NONE, 10.0);
    s.pointer_up(60.0, 60.0, Modifiers::NONE, 15.0);

    let strokes: Vec<Stroke> = s.graph().objects().filter_map(|o| o.stroke).collect();
    assert_eq!(
        strokes,
        vec![
            Stroke {
                color: Color::BLACK,
                width: 5.0
            },
            Stroke {
                color: red,
                width: 9.0
            },
        ]
    );
}

// ─── Eraser ─────────────────────────────────────────────────────────────

#[test]
fn eraser_drag_deletes_objects_it_crosses() {
    let mut s = session();
    s.set_tool(ToolKind::Circle).unwrap();
    for x in [100.0, 200.0, 600.0] {
        s.pointer_down(x, 100.0, Modifiers::NONE, 0.0);
        s.pointer_up(x + 10.0, 100.0, Modifiers::NONE, 1.0);
    }

    s.set_tool(ToolKind::Eraser).unwrap();
    s.pointer_down(40.0, 100.0, Modifiers::NONE, 10.0);
    s.pointer_move(100.0, 100.0, Modifiers::NONE, 20.0);
    s.pointer_move(200.0, 100.0, Modifiers::NONE, 30.0);
    s.pointer_up(200.0, 100.0, Modifiers::NONE, 40.0);
    // Moving without the button held erases nothing.
    s.pointer_move(600.0, 100.0, Modifiers::NONE, 50.0);

    assert_eq!(s.graph().len(), 1);
    assert_eq!(s.layers().len(), 2);
    assert!(s.layers().is_consistent_with(s.graph()));
}

// ─── Zoom ───────────────────────────────────────────────────────────────

#[test]
fn zoom_steps_from_100_and_clamps_at_200() {
    let mut s = session();
    assert_eq!(s.zoom(), 100);
    for _ in 0..5 {
        s.zoom_in();
    }
    assert_eq!(s.zoom(), 150);
    for _ in 0..10 {
        s.zoom_in();
    }
    assert_eq!(s.zoom(), 200);
    assert_eq!(s.scene().viewport_size(), (3200.0, 1800.0));

    s.handle_key(&KeyInput::command("0"), 0.0);
    assert_eq!(s.zoom(), 100);
}

// ─── Keyboard ───────────────────────────────────────────────────────────

#[test]
fn tool_keys_switch_tools() {
    let mut s = session();
    s.handle_key(&KeyInput::plain("r"), 0.0);
    assert_eq!(s.active_tool(), ToolKind::Rectangle);
    s.handle_key(&KeyInput::plain("b"), 0.0);
    assert_eq!(s.active_tool(), ToolKind::Draw);
    s.handle_key(&KeyInput::plain("t").in_text_input(), 0.0);
    assert_eq!(s.active_tool(), ToolKind::Draw);
}

#[test]
fn delete_key_removes_selection() {
    let mut s = session();
    s.set_tool(ToolKind::Rectangle).unwrap();
    s.pointer_down(0.0, 0.0, Modifiers::NONE, 0.0);
    s.pointer_up(20.0, 20.0, Modifiers::NONE, 5.0);

    s.handle_key(&KeyInput::plain("Backspace").in_text_input(), 10.0);
    assert_eq!(s.graph().len(), 1);
    s.handle_key(&KeyInput::plain("Delete"), 20.0);
    assert!(s.graph().is_empty());
}
