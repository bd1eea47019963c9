//! The sketchpad controller.
//!
//! `SketchPad` owns all application state (history, tool selection,
//! previews, last pointer position) and is the only thing input handlers
//! talk to. Every method that changes state raises the change notification
//! exactly once, after the change has settled; methods that turn out to be
//! no-ops raise nothing and return `false`.

use crate::config::{LeavePolicy, PadConfig};
use crate::history::{Entry, History};
use crate::input::InputEvent;
use crate::notify::{ChangeNotifier, ListenerId};
use crate::redraw::{self, Scene};
use crate::tools::{ActiveTool, ToolState};
use serde::Serialize;
use sketch_core::{
    Color, Point, RotationSource, Sticker, StickerPreview, Stroke, Surface, ToolPreview,
};

/// Enabled/disabled state for the history buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_clear: bool,
}

/// Summary of pad state for UI chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PadStatus {
    pub committed: usize,
    pub redoable: usize,
    pub drawing: bool,
    pub active: ActiveTool,
    pub brush_width: f64,
    pub color: String,
    pub sticker_size: f64,
    pub stickers: Vec<String>,
    pub availability: Availability,
}

#[derive(Debug)]
pub struct SketchPad {
    config: PadConfig,
    history: History,
    tools: ToolState,
    tool_preview: Option<ToolPreview>,
    sticker_preview: Option<StickerPreview>,
    /// Rotation drawn at sticker selection, used by the next sticker preview.
    pending_rotation: Option<f64>,
    /// Last pointer position over the surface; `None` after leaving.
    pointer: Option<Point>,
    rotations: RotationSource,
    notifier: ChangeNotifier,
}

impl Default for SketchPad {
    fn default() -> Self {
        Self::new(PadConfig::default())
    }
}

impl SketchPad {
    pub fn new(config: PadConfig) -> Self {
        let rotations = match config.seed {
            Some(seed) => RotationSource::seeded(seed),
            None => RotationSource::from_clock(),
        };
        Self::with_rotations(config, rotations)
    }

    pub fn with_rotations(config: PadConfig, rotations: RotationSource) -> Self {
        Self {
            tools: ToolState::from_config(&config),
            config,
            history: History::new(),
            tool_preview: None,
            sticker_preview: None,
            pending_rotation: None,
            pointer: None,
            rotations,
            notifier: ChangeNotifier::new(),
        }
    }

    // ─── Change notification ─────────────────────────────────────────────

    /// Register a listener for the change notification.
    pub fn subscribe(&mut self, listener: impl FnMut(&Scene<'_>) + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Total notifications raised so far.
    pub fn notifications(&self) -> u64 {
        self.notifier.raised()
    }

    /// Builds the scene from individual fields so `notifier` can be
    /// borrowed mutably alongside it.
    fn changed(&mut self) {
        let scene = Scene {
            committed: self.history.committed(),
            in_progress: self.history.in_progress(),
            tool_preview: self.tool_preview.as_ref(),
            sticker_preview: self.sticker_preview.as_ref(),
        };
        self.notifier.notify(&scene);
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            committed: self.history.committed(),
            in_progress: self.history.in_progress(),
            tool_preview: self.tool_preview.as_ref(),
            sticker_preview: self.sticker_preview.as_ref(),
        }
    }

    /// Repaint `surface` from the current state.
    pub fn redraw(&self, surface: &mut dyn Surface) {
        redraw::redraw(surface, &self.scene());
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Dispatch a normalized input event. Returns whether state changed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
        }
    }

    /// Start a stroke, or place the selected sticker immediately.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        self.pointer = Some(at);
        self.tool_preview = None;
        self.sticker_preview = None;

        match self.tools.sticker() {
            Some(glyph) => {
                let rotation = self.rotations.next_degrees();
                let sticker = Sticker::new(at, glyph, rotation, self.tools.sticker_size());
                let id = self.history.place(sticker.into());
                log::debug!(
                    "placed sticker {glyph:?} at ({}, {}) rot={rotation} id={}",
                    at.x,
                    at.y,
                    id.0
                );
            }
            None => {
                self.history
                    .begin_stroke(at, self.tools.brush_width(), self.tools.color());
                log::trace!("stroke started at ({}, {})", at.x, at.y);
            }
        }
        self.changed();
        true
    }

    /// Extend the in-progress stroke, or move the active preview.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        self.pointer = Some(at);

        if self.history.is_drawing() {
            self.history.extend_in_progress(at);
        } else if let Some(glyph) = self.tools.sticker() {
            if let Some(preview) = self.sticker_preview.as_mut() {
                preview.reposition(at);
            } else {
                let rotation = match self.pending_rotation.take() {
                    Some(rotation) => rotation,
                    None => self.rotations.next_degrees(),
                };
                self.sticker_preview = Some(StickerPreview::new(
                    at,
                    glyph,
                    rotation,
                    self.tools.sticker_size(),
                ));
            }
        } else if let Some(preview) = self.tool_preview.as_mut() {
            preview.reposition(at);
        } else {
            self.tool_preview = Some(self.new_tool_preview(at));
        }
        self.changed();
        true
    }

    /// Finish the in-progress stroke. A stroke without drag is dropped.
    pub fn pointer_up(&mut self) -> bool {
        if !self.history.is_drawing() {
            return false;
        }
        self.finish_stroke(true);
        self.changed();
        true
    }

    /// Drop both previews and resolve any in-progress stroke per the
    /// configured `LeavePolicy`.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer = None;
        let mut changed = self.tool_preview.take().is_some() | self.sticker_preview.take().is_some();
        if self.history.is_drawing() {
            self.finish_stroke(self.config.leave_policy == LeavePolicy::Commit);
            changed = true;
        }
        if changed {
            self.changed();
        }
        changed
    }

    fn finish_stroke(&mut self, keep: bool) {
        let has_drag = self.history.in_progress().is_some_and(Stroke::has_drag);
        if keep && has_drag {
            self.history.commit();
            log::debug!(
                "stroke committed, history depth {}",
                self.history.committed().len()
            );
        } else {
            self.history.discard_in_progress();
            log::debug!("stroke discarded (keep={keep}, drag={has_drag})");
        }
    }

    fn new_tool_preview(&self, at: Point) -> ToolPreview {
        ToolPreview::new(
            at,
            self.tools.brush_width(),
            self.tools.color(),
            self.config.preview_style,
        )
    }

    // ─── Tool selection ──────────────────────────────────────────────────

    /// Switch to brush mode with `width`.
    pub fn select_brush_width(&mut self, width: f64) -> bool {
        if !self.tools.select_brush(width) {
            return false;
        }
        self.sticker_preview = None;
        self.pending_rotation = None;
        if let Some(preview) = self.tool_preview.as_mut() {
            preview.set_width(width);
        } else if let Some(at) = self.pointer.filter(|_| !self.history.is_drawing()) {
            self.tool_preview = Some(self.new_tool_preview(at));
        }
        self.changed();
        true
    }

    pub fn select_thin(&mut self) -> bool {
        self.select_brush_width(self.config.thin_width)
    }

    pub fn select_thick(&mut self) -> bool {
        self.select_brush_width(self.config.thick_width)
    }

    /// Set the color for strokes started from now on.
    pub fn select_color(&mut self, color: Color) -> bool {
        if !self.tools.set_color(color) {
            return false;
        }
        if let Some(preview) = self.tool_preview.as_mut() {
            preview.set_color(color);
        }
        self.changed();
        true
    }

    /// `select_color` from a CSS color string. Unparsable input is ignored.
    pub fn select_color_str(&mut self, css: &str) -> bool {
        match Color::parse(css) {
            Ok(color) => self.select_color(color),
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Switch to sticker mode. The preview's rotation is drawn here.
    pub fn select_sticker(&mut self, glyph: &str) -> bool {
        if !self.tools.select_sticker(glyph) {
            return false;
        }
        self.tool_preview = None;
        self.sticker_preview = None;
        let rotation = self.rotations.next_degrees();
        match (self.pointer, self.tools.sticker()) {
            (Some(at), Some(glyph)) if !self.history.is_drawing() => {
                self.pending_rotation = None;
                self.sticker_preview = Some(StickerPreview::new(
                    at,
                    glyph,
                    rotation,
                    self.tools.sticker_size(),
                ));
            }
            _ => self.pending_rotation = Some(rotation),
        }
        self.changed();
        true
    }

    /// Append a glyph to the sticker palette.
    pub fn add_custom_sticker(&mut self, glyph: &str) -> bool {
        if !self.tools.add_sticker(glyph) {
            return false;
        }
        log::debug!("palette now has {} stickers", self.tools.palette().len());
        self.changed();
        true
    }

    /// Size for stickers placed from now on; placed stickers keep theirs.
    pub fn set_sticker_size(&mut self, size: f64) -> bool {
        if !self.tools.set_sticker_size(size) {
            return false;
        }
        if let Some(preview) = self.sticker_preview.as_mut() {
            preview.set_size(size);
        }
        self.changed();
        true
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        log::debug!("undo, {} left", self.history.committed().len());
        self.changed();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        log::debug!("redo, {} left", self.history.redo_buffer().len());
        self.changed();
        true
    }

    /// Drop all committed work, the redo buffer, and any in-progress stroke.
    pub fn clear(&mut self) -> bool {
        if !self.history.clear() {
            return false;
        }
        log::debug!("cleared");
        self.changed();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn availability(&self) -> Availability {
        Availability {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            can_clear: self.history.can_undo()
                || self.history.can_redo()
                || self.history.is_drawing(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn stickers(&self) -> &[String] {
        self.tools.palette()
    }

    pub fn committed(&self) -> &[Entry] {
        self.history.committed()
    }

    pub fn redo_buffer(&self) -> &[Entry] {
        self.history.redo_buffer()
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        self.history.in_progress()
    }

    pub fn is_drawing(&self) -> bool {
        self.history.is_drawing()
    }

    pub fn tool_preview(&self) -> Option<&ToolPreview> {
        self.tool_preview.as_ref()
    }

    pub fn sticker_preview(&self) -> Option<&StickerPreview> {
        self.sticker_preview.as_ref()
    }

    pub fn status(&self) -> PadStatus {
        PadStatus {
            committed: self.history.committed().len(),
            redoable: self.history.redo_buffer().len(),
            drawing: self.history.is_drawing(),
            active: self.tools.active().clone(),
            brush_width: self.tools.brush_width(),
            color: self.tools.color().to_hex(),
            sticker_size: self.tools.sticker_size(),
            stickers: self.tools.palette().to_vec(),
            availability: self.availability(),
        }
    }
}
