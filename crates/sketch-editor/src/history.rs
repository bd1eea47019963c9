//! Undo/redo history of committed draw commands.
//!
//! Two stacks: `committed` (insertion order = paint order) and `redo`
//! (most recently undone last). A stroke being drawn lives outside both
//! until it is committed. Every fresh commit, and `clear`, empties the redo
//! stack: redo history never survives a branching edit.
//!
//! All operations return `true` when they changed state and `false` when
//! they were a no-op, so the caller can raise exactly one change
//! notification per effective mutation.

use serde::Serialize;
use sketch_core::{Color, DrawCommand, Point, Stroke};

/// Stable identity of a committed command, assigned at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CommandId(pub u64);

/// A command together with its identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: CommandId,
    pub command: DrawCommand,
}

#[derive(Debug, Default)]
pub struct History {
    committed: Vec<Entry>,
    redo: Vec<Entry>,
    in_progress: Option<Stroke>,
    next_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── In-progress stroke ──────────────────────────────────────────────

    /// Start a new in-progress stroke. An unfinished stroke is dropped.
    pub fn begin_stroke(&mut self, start: Point, width: f64, color: Color) {
        if self.in_progress.is_some() {
            log::warn!("begin_stroke while a stroke is in progress; dropping it");
        }
        self.in_progress = Some(Stroke::new(start, width, color));
    }

    /// Append a point to the in-progress stroke. No-op when not drawing.
    pub fn extend_in_progress(&mut self, point: Point) -> bool {
        match &mut self.in_progress {
            Some(stroke) => {
                stroke.extend(point);
                true
            }
            None => false,
        }
    }

    /// Move the in-progress stroke to the end of the committed sequence.
    pub fn commit(&mut self) -> bool {
        match self.in_progress.take() {
            Some(stroke) => {
                self.push_committed(DrawCommand::Stroke(stroke));
                true
            }
            None => false,
        }
    }

    /// Drop the in-progress stroke without committing it.
    pub fn discard_in_progress(&mut self) -> bool {
        self.in_progress.take().is_some()
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    // ─── Committed history ───────────────────────────────────────────────

    /// Commit a finished command directly (stickers have no drag phase).
    pub fn place(&mut self, command: DrawCommand) -> CommandId {
        self.push_committed(command)
    }

    fn push_committed(&mut self, command: DrawCommand) -> CommandId {
        let id = CommandId(self.next_id);
        self.next_id += 1;
        self.committed.push(Entry { id, command });
        if !self.redo.is_empty() {
            log::debug!("commit discards {} redo entries", self.redo.len());
            self.redo.clear();
        }
        id
    }

    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(entry) => {
                self.redo.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(entry) => {
                self.committed.push(entry);
                true
            }
            None => false,
        }
    }

    /// Empty both stacks and drop any in-progress stroke.
    pub fn clear(&mut self) -> bool {
        let changed =
            !self.committed.is_empty() || !self.redo.is_empty() || self.in_progress.is_some();
        self.committed.clear();
        self.redo.clear();
        self.in_progress = None;
        changed
    }

    pub fn committed(&self) -> &[Entry] {
        &self.committed
    }

    /// Undone entries, most recently undone last.
    pub fn redo_buffer(&self) -> &[Entry] {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
