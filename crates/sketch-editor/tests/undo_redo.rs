//! Integration tests: undo/redo/commit state machine (sketch-editor).
//!
//! Drives the `SketchPad` through pointer input and history commands and
//! checks the committed and redo sequences plus the change notifications
//! raised along the way.

use pretty_assertions::assert_eq;
use sketch_core::{DrawCommand, Point, RotationSource};
use sketch_editor::{CommandId, Entry, PadConfig, SketchPad};
use std::cell::Cell;
use std::rc::Rc;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_pad() -> SketchPad {
    init_logger();
    SketchPad::with_rotations(PadConfig::default(), RotationSource::fixed(137.0))
}

/// Draw a two-point stroke starting at `(x, y)` and release.
fn stroke(pad: &mut SketchPad, x: f64, y: f64) -> CommandId {
    pad.pointer_down(Point::new(x, y));
    pad.pointer_move(Point::new(x + 10.0, y + 10.0));
    assert!(pad.pointer_up());
    pad.committed().last().map(|e| e.id).unwrap()
}

fn ids(entries: &[Entry]) -> Vec<CommandId> {
    entries.iter().map(|e| e.id).collect()
}

/// Count notifications through a subscribed listener, not the pad's counter.
fn counter(pad: &mut SketchPad) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    pad.subscribe(move |_| handle.set(handle.get() + 1));
    count
}

// ─── Round trips ─────────────────────────────────────────────────────────

#[test]
fn undo_then_redo_restores_identical_history() {
    for n in 1..=5 {
        for m in 0..=n {
            let mut pad = make_pad();
            for i in 0..n {
                stroke(&mut pad, i as f64, 0.0);
            }
            let before: Vec<Entry> = pad.committed().to_vec();

            for _ in 0..m {
                assert!(pad.undo());
            }
            assert_eq!(pad.committed().len(), n - m);
            assert_eq!(pad.redo_buffer().len(), m);

            for _ in 0..m {
                assert!(pad.redo());
            }
            assert_eq!(pad.committed(), before.as_slice(), "n={n} m={m}");
            assert!(pad.redo_buffer().is_empty());
        }
    }
}

#[test]
fn undo_pops_most_recent_first() {
    let mut pad = make_pad();
    let a = stroke(&mut pad, 0.0, 0.0);
    let b = stroke(&mut pad, 1.0, 0.0);
    let c = stroke(&mut pad, 2.0, 0.0);

    pad.undo();
    pad.undo();
    assert_eq!(ids(pad.committed()), vec![a]);
    // Redo buffer is a stack: most recently undone last.
    assert_eq!(ids(pad.redo_buffer()), vec![c, b]);

    pad.redo();
    assert_eq!(ids(pad.committed()), vec![a, b]);
}

// ─── No-ops ──────────────────────────────────────────────────────────────

#[test]
fn undo_on_empty_history_has_no_effect() {
    let mut pad = make_pad();
    let count = counter(&mut pad);

    assert!(!pad.undo());
    assert!(pad.committed().is_empty());
    assert!(pad.redo_buffer().is_empty());
    assert_eq!(count.get(), 0);
    assert_eq!(pad.notifications(), 0);
}

#[test]
fn redo_on_empty_buffer_has_no_effect() {
    let mut pad = make_pad();
    let a = stroke(&mut pad, 0.0, 0.0);
    let count = counter(&mut pad);

    assert!(!pad.redo());
    assert_eq!(ids(pad.committed()), vec![a]);
    assert_eq!(count.get(), 0);
}

#[test]
fn clear_on_empty_pad_has_no_effect() {
    let mut pad = make_pad();
    let count = counter(&mut pad);
    assert!(!pad.clear());
    assert_eq!(count.get(), 0);
}

#[test]
fn pointer_up_without_press_has_no_effect() {
    let mut pad = make_pad();
    let count = counter(&mut pad);
    assert!(!pad.pointer_up());
    assert_eq!(count.get(), 0);
}

// ─── Branching ───────────────────────────────────────────────────────────

#[test]
fn new_stroke_after_undo_discards_redo() {
    let mut pad = make_pad();
    let a = stroke(&mut pad, 0.0, 0.0);
    let b = stroke(&mut pad, 10.0, 0.0);

    pad.undo();
    assert_eq!(ids(pad.committed()), vec![a]);
    assert_eq!(ids(pad.redo_buffer()), vec![b]);

    let c = stroke(&mut pad, 20.0, 0.0);
    assert_eq!(ids(pad.committed()), vec![a, c]);
    assert!(pad.redo_buffer().is_empty());

    // B is gone for good.
    assert!(!pad.redo());
    assert!(!ids(pad.committed()).contains(&b));
}

#[test]
fn sticker_placement_after_undo_discards_redo() {
    let mut pad = make_pad();
    stroke(&mut pad, 0.0, 0.0);
    pad.undo();
    assert!(pad.can_redo());

    pad.select_sticker("🎲");
    pad.pointer_down(Point::new(50.0, 50.0));
    assert!(!pad.can_redo());
    assert!(matches!(
        pad.committed().last().map(|e| &e.command),
        Some(DrawCommand::Sticker(_))
    ));
}

#[test]
fn starting_a_stroke_keeps_redo_until_commit() {
    let mut pad = make_pad();
    stroke(&mut pad, 0.0, 0.0);
    pad.undo();

    pad.pointer_down(Point::new(5.0, 5.0));
    pad.pointer_move(Point::new(6.0, 6.0));
    assert!(pad.can_redo());

    pad.pointer_up();
    assert!(!pad.can_redo());
}

#[test]
fn clear_empties_committed_and_redo() {
    let mut pad = make_pad();
    stroke(&mut pad, 0.0, 0.0);
    stroke(&mut pad, 1.0, 0.0);
    stroke(&mut pad, 2.0, 0.0);
    pad.undo();

    assert!(pad.clear());
    assert!(pad.committed().is_empty());
    assert!(pad.redo_buffer().is_empty());
    assert!(!pad.can_undo());
    assert!(!pad.can_redo());
}

#[test]
fn clear_mid_stroke_drops_the_stroke() {
    let mut pad = make_pad();
    pad.pointer_down(Point::new(0.0, 0.0));
    pad.pointer_move(Point::new(4.0, 4.0));

    assert!(pad.clear());
    assert!(!pad.is_drawing());
    assert!(!pad.pointer_up());
    assert!(pad.committed().is_empty());
}

// ─── Notifications ───────────────────────────────────────────────────────

#[test]
fn each_effective_mutation_notifies_once() {
    let mut pad = make_pad();
    let count = counter(&mut pad);

    pad.pointer_down(Point::new(0.0, 0.0));
    assert_eq!(count.get(), 1);
    pad.pointer_move(Point::new(1.0, 1.0));
    assert_eq!(count.get(), 2);
    pad.pointer_up();
    assert_eq!(count.get(), 3);
    pad.undo();
    assert_eq!(count.get(), 4);
    pad.redo();
    assert_eq!(count.get(), 5);
    pad.clear();
    assert_eq!(count.get(), 6);
}

#[test]
fn listener_sees_settled_state() {
    let mut pad = make_pad();
    let seen = Rc::new(Cell::new(usize::MAX));
    let handle = Rc::clone(&seen);
    pad.subscribe(move |scene| handle.set(scene.committed.len()));

    stroke(&mut pad, 0.0, 0.0);
    assert_eq!(seen.get(), 1);
    pad.undo();
    assert_eq!(seen.get(), 0);
}

#[test]
fn availability_follows_stacks() {
    let mut pad = make_pad();
    assert!(!pad.can_undo() && !pad.can_redo());
    stroke(&mut pad, 0.0, 0.0);
    assert!(pad.can_undo() && !pad.can_redo());
    pad.undo();
    assert!(!pad.can_undo() && pad.can_redo());
}
