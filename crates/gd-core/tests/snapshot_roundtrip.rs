//! Integration tests: canvas snapshot encode/decode (gd-core).
//!
//! Snapshots back both history entries and persisted projects, so a decoded
//! scene must re-encode to the exact same string.

use gd_core::id::ObjectId;
use gd_core::model::*;
use pretty_assertions::assert_eq;

fn poster() -> SceneGraph {
    let mut sg = SceneGraph::new(1600.0, 900.0, Color::from_hex("#F4F1EA").unwrap());
    sg.add(
        Drawable::with_id(
            ObjectId::intern("poster_frame"),
            ObjectKind::Rect {
                width: 400.0,
                height: 250.0,
            },
            100.0,
            80.0,
        )
        .with_stroke(Stroke {
            color: Color::BLACK,
            width: 2.0,
        }),
    );
    sg.add(
        Drawable::with_id(
            ObjectId::intern("poster_dot"),
            ObjectKind::Circle { radius: 42.5 },
            640.0,
            320.0,
        )
        .with_fill(Paint::Solid(Color::from_hex("#E17055").unwrap())),
    );
    let mut title = Drawable::with_id(
        ObjectId::intern("poster_title"),
        ObjectKind::Text {
            content: "Summer\nSale".into(),
            font: FontSpec::default(),
            width: 200.0,
        },
        120.0,
        100.0,
    );
    title.name = Some("Headline".into());
    sg.add(title);
    sg.add(Drawable::with_id(
        ObjectId::intern("poster_scribble"),
        ObjectKind::Path {
            commands: vec![
                PathCmd::MoveTo(0.0, 0.0),
                PathCmd::QuadTo(5.0, 10.0, 12.25, 3.0),
                PathCmd::LineTo(30.0, 4.0),
            ],
        },
        700.0,
        500.0,
    ));
    sg
}

#[test]
fn reencode_is_byte_identical() {
    let sg = poster();
    let first = sg.to_snapshot().unwrap();
    let restored = SceneGraph::from_snapshot(&first).unwrap();
    assert_eq!(restored.to_snapshot().unwrap(), first);
}

#[test]
fn paint_order_survives_roundtrip() {
    let mut sg = poster();
    sg.send_to_back(ObjectId::intern("poster_title"));
    let restored = SceneGraph::from_snapshot(&sg.to_snapshot().unwrap()).unwrap();
    assert_eq!(restored.ids(), sg.ids());
    assert_eq!(restored.position_of(ObjectId::intern("poster_title")), Some(0));
}

#[test]
fn surface_and_object_attributes_survive() {
    let mut sg = poster();
    let dot = sg.get_mut(ObjectId::intern("poster_dot")).unwrap();
    dot.visible = false;
    dot.erasable = true;

    let restored = SceneGraph::from_snapshot(&sg.to_snapshot().unwrap()).unwrap();
    assert_eq!(restored.background.to_hex(), "#F4F1EA");
    assert_eq!(restored.width, 1600.0);
    assert_eq!(restored.height, 900.0);

    let dot = restored.get(ObjectId::intern("poster_dot")).unwrap();
    assert!(!dot.visible);
    assert!(dot.erasable);
    assert_eq!(dot.fill.color().map(|c| c.to_hex()).as_deref(), Some("#E17055"));

    let title = restored.get(ObjectId::intern("poster_title")).unwrap();
    assert_eq!(title.name.as_deref(), Some("Headline"));
}

#[test]
fn snapshots_differ_after_edit() {
    let mut sg = poster();
    let before = sg.to_snapshot().unwrap();
    sg.get_mut(ObjectId::intern("poster_frame"))
        .unwrap()
        .translate(1.0, 0.0);
    assert_ne!(sg.to_snapshot().unwrap(), before);
}
