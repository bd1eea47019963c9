//! Integration tests: pointer lifecycle, previews, and tool selection.

use pretty_assertions::assert_eq;
use sketch_core::{Color, DrawCommand, Point, RotationSource};
use sketch_editor::{ActiveTool, InputEvent, LeavePolicy, PadConfig, SketchPad};

fn make_pad(config: PadConfig) -> SketchPad {
    let _ = env_logger::builder().is_test(true).try_init();
    SketchPad::with_rotations(config, RotationSource::fixed(137.0))
}

fn stroke_points(command: &DrawCommand) -> Vec<Point> {
    match command {
        DrawCommand::Stroke(stroke) => stroke.points().to_vec(),
        other => panic!("expected stroke, got {other:?}"),
    }
}

// ─── Strokes ─────────────────────────────────────────────────────────────

#[test]
fn drag_commits_a_stroke_with_every_point() {
    let mut pad = make_pad(PadConfig::default());
    for event in [
        InputEvent::from_pointer_down(1.0, 1.0),
        InputEvent::from_pointer_move(2.0, 3.0),
        InputEvent::from_pointer_move(4.0, 6.0),
        InputEvent::PointerUp,
    ] {
        assert!(pad.handle(event));
    }

    assert_eq!(pad.committed().len(), 1);
    assert_eq!(
        stroke_points(&pad.committed()[0].command),
        vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0),
            Point::new(4.0, 6.0)
        ]
    );
}

#[test]
fn click_without_drag_is_discarded() {
    let mut pad = make_pad(PadConfig::default());
    pad.pointer_down(Point::new(5.0, 5.0));
    assert!(pad.pointer_up());
    assert!(pad.committed().is_empty());
    assert!(!pad.is_drawing());
}

#[test]
fn stroke_keeps_color_and_width_from_press_time() {
    let mut pad = make_pad(PadConfig::default());
    pad.select_thick();
    pad.pointer_down(Point::new(0.0, 0.0));
    pad.select_color_str("#ff0000");
    pad.select_thin();
    pad.pointer_move(Point::new(8.0, 8.0));
    pad.pointer_up();

    match &pad.committed()[0].command {
        DrawCommand::Stroke(stroke) => {
            assert_eq!(stroke.width(), 10.0);
            assert_eq!(stroke.color(), Color::BLACK);
        }
        other => panic!("expected stroke, got {other:?}"),
    }
    assert_eq!(pad.tools().brush_width(), 3.0);
}

// ─── Leaving the surface ─────────────────────────────────────────────────

#[test]
fn leaving_mid_stroke_commits_by_default() {
    let mut pad = make_pad(PadConfig::default());
    pad.pointer_down(Point::new(0.0, 0.0));
    pad.pointer_move(Point::new(10.0, 0.0));
    assert!(pad.pointer_leave());

    assert!(!pad.is_drawing());
    assert_eq!(pad.committed().len(), 1);
    // Further movement does not extend the committed stroke.
    pad.pointer_move(Point::new(20.0, 0.0));
    assert_eq!(stroke_points(&pad.committed()[0].command).len(), 2);
}

#[test]
fn leaving_mid_stroke_discards_under_discard_policy() {
    let mut pad = make_pad(PadConfig {
        leave_policy: LeavePolicy::Discard,
        ..PadConfig::default()
    });
    pad.pointer_down(Point::new(0.0, 0.0));
    pad.pointer_move(Point::new(10.0, 0.0));
    assert!(pad.pointer_leave());

    assert!(!pad.is_drawing());
    assert!(pad.committed().is_empty());
}

#[test]
fn leaving_drops_previews() {
    let mut pad = make_pad(PadConfig::default());
    pad.pointer_move(Point::new(10.0, 10.0));
    assert!(pad.tool_preview().is_some());

    assert!(pad.pointer_leave());
    assert!(pad.tool_preview().is_none());
    // Nothing left to drop.
    assert!(!pad.pointer_leave());
}

// ─── Stickers ────────────────────────────────────────────────────────────

#[test]
fn sticker_is_committed_on_press() {
    let mut pad = make_pad(PadConfig::default());
    pad.select_sticker("🎨");
    pad.pointer_move(Point::new(30.0, 30.0));
    assert!(pad.sticker_preview().is_some());

    pad.pointer_down(Point::new(30.0, 30.0));
    assert!(!pad.is_drawing());
    assert!(pad.sticker_preview().is_none());
    match &pad.committed()[0].command {
        DrawCommand::Sticker(sticker) => {
            assert_eq!(sticker.glyph(), "🎨");
            assert_eq!(sticker.position(), Point::new(30.0, 30.0));
            assert_eq!(sticker.rotation(), 137.0);
            assert_eq!(sticker.size(), 40.0);
        }
        other => panic!("expected sticker, got {other:?}"),
    }

    // Releasing after a placement is not a stroke commit.
    assert!(!pad.pointer_up());
    assert_eq!(pad.committed().len(), 1);
}

#[test]
fn sticker_preview_returns_on_next_move_after_placement() {
    let mut pad = make_pad(PadConfig::default());
    pad.select_sticker("🎲");
    pad.pointer_down(Point::new(1.0, 1.0));
    assert!(pad.sticker_preview().is_none());

    pad.pointer_move(Point::new(2.0, 2.0));
    assert_eq!(pad.sticker_preview().map(|p| p.glyph()), Some("🎲"));
}

#[test]
fn seeded_rotations_stay_in_range() {
    let mut pad = SketchPad::new(PadConfig {
        seed: Some(3),
        ..PadConfig::default()
    });
    pad.select_sticker("🎲");
    for i in 0..20 {
        pad.pointer_down(Point::new(i as f64, 0.0));
    }
    for entry in pad.committed() {
        match &entry.command {
            DrawCommand::Sticker(sticker) => {
                assert!((0.0..360.0).contains(&sticker.rotation()));
            }
            other => panic!("expected sticker, got {other:?}"),
        }
    }
}

#[test]
fn custom_stickers_extend_the_palette() {
    let mut pad = make_pad(PadConfig::default());
    let before = pad.notifications();
    assert!(pad.add_custom_sticker("😀"));
    assert_eq!(pad.notifications(), before + 1);
    assert_eq!(pad.stickers(), ["🖌️", "🎨", "🎲", "😀"]);

    assert!(!pad.add_custom_sticker("   "));
    assert_eq!(pad.notifications(), before + 1);
}

#[test]
fn selecting_a_brush_leaves_sticker_mode() {
    let mut pad = make_pad(PadConfig::default());
    pad.pointer_move(Point::new(3.0, 3.0));
    pad.select_sticker("🎲");
    assert_eq!(pad.tools().active(), &ActiveTool::Sticker("🎲".to_string()));

    assert!(pad.select_thin());
    assert_eq!(pad.tools().active(), &ActiveTool::Brush);
    assert!(pad.sticker_preview().is_none());
    assert_eq!(pad.tool_preview().map(|p| p.radius()), Some(1.5));

    pad.pointer_down(Point::new(3.0, 3.0));
    assert!(pad.is_drawing());
}

#[test]
fn selection_changes_notify_and_repeats_do_not() {
    let mut pad = make_pad(PadConfig::default());
    let start = pad.notifications();

    assert!(pad.select_color(Color::from_rgba8(0, 0, 255, 255)));
    assert!(!pad.select_color(Color::from_rgba8(0, 0, 255, 255)));
    assert!(pad.select_thick());
    assert!(!pad.select_thick());
    assert!(pad.set_sticker_size(24.0));
    assert!(!pad.set_sticker_size(24.0));
    assert!(!pad.select_brush_width(-1.0));

    assert_eq!(pad.notifications(), start + 3);
}
