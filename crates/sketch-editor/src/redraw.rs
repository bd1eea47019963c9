//! Redraw engine: paints the pad from scratch.
//!
//! Paint order is fixed: committed commands in insertion order, then the
//! in-progress stroke, then (only while not drawing) the brush preview and
//! the sticker preview. The engine keeps no state, so redundant redraws
//! produce the same picture.

use crate::history::Entry;
use sketch_core::{StickerPreview, Stroke, Surface, ToolPreview};

/// Read-only view of everything the redraw engine paints.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub committed: &'a [Entry],
    pub in_progress: Option<&'a Stroke>,
    pub tool_preview: Option<&'a ToolPreview>,
    pub sticker_preview: Option<&'a StickerPreview>,
}

impl Scene<'_> {
    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }
}

/// Clear `surface` and repaint the whole scene.
pub fn redraw(surface: &mut dyn Surface, scene: &Scene<'_>) {
    log::trace!(
        "redraw: {} committed, drawing={}",
        scene.committed.len(),
        scene.is_drawing()
    );
    surface.clear();
    render_commands(surface, scene.committed);

    if let Some(stroke) = scene.in_progress {
        stroke.render(surface);
    }

    if !scene.is_drawing() {
        if let Some(preview) = scene.tool_preview {
            preview.render(surface);
        }
        if let Some(preview) = scene.sticker_preview {
            preview.render(surface);
        }
    }
}

/// Paint committed entries in order, without clearing. Export uses this
/// directly so previews and the in-progress stroke never reach an image.
pub fn render_commands(surface: &mut dyn Surface, entries: &[Entry]) {
    for entry in entries {
        entry.command.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;
    use pretty_assertions::assert_eq;
    use sketch_core::{Color, DrawOp, Point, PreviewStyle, RecordingSurface};

    fn tool_preview() -> ToolPreview {
        ToolPreview::new(Point::new(9.0, 9.0), 4.0, Color::BLACK, PreviewStyle::Filled)
    }

    #[test]
    fn empty_scene_only_clears() {
        let scene = Scene {
            committed: &[],
            in_progress: None,
            tool_preview: None,
            sticker_preview: None,
        };
        let mut surface = RecordingSurface::new();
        redraw(&mut surface, &scene);
        assert_eq!(surface.ops, vec![DrawOp::Clear]);
    }

    #[test]
    fn previews_are_hidden_while_drawing() {
        let mut history = History::new();
        history.begin_stroke(Point::ORIGIN, 2.0, Color::BLACK);
        let preview = tool_preview();
        let scene = Scene {
            committed: history.committed(),
            in_progress: history.in_progress(),
            tool_preview: Some(&preview),
            sticker_preview: None,
        };

        let mut surface = RecordingSurface::new();
        redraw(&mut surface, &scene);
        assert!(
            !surface
                .ops
                .iter()
                .any(|op| matches!(op, DrawOp::FillCircle { .. }))
        );
    }

    #[test]
    fn in_progress_paints_after_committed_and_previews_last() {
        let mut history = History::new();
        history.begin_stroke(Point::new(1.0, 1.0), 2.0, Color::BLACK);
        history.extend_in_progress(Point::new(2.0, 2.0));
        history.commit();
        let preview = tool_preview();
        let scene = Scene {
            committed: history.committed(),
            in_progress: None,
            tool_preview: Some(&preview),
            sticker_preview: None,
        };

        let mut surface = RecordingSurface::new();
        redraw(&mut surface, &scene);
        let polyline_at = surface
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Polyline(_)));
        let circle_at = surface
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::FillCircle { .. }));
        assert_eq!(surface.ops[0], DrawOp::Clear);
        assert!(polyline_at.is_some());
        assert!(polyline_at < circle_at);
    }
}
