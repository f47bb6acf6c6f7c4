//! Frame state machine: window state × border style × drag flag
//!
//! Only bookkeeping lives here. The OS calls that go with each transition
//! are made by the window core in `transitions.rs`.

use serde::{Deserialize, Serialize};

use crate::events::SizeKind;
use crate::geometry::Rect;

/// Window chrome configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    /// Caption plus a resizable frame
    #[default]
    SizingBorder,
    /// Caption with a fixed frame
    Border,
    /// No chrome at all
    NoBorder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    /// Borderless and covering the monitor work area
    Fullscreen,
}

/// What leaving fullscreen puts back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedFrame {
    pub border: BorderStyle,
    /// Reported rect before fullscreen, restored verbatim
    pub reported: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameState {
    border: BorderStyle,
    state: WindowState,
    dragging: bool,
    saved: Option<SavedFrame>,
}

impl FrameState {
    pub fn new(border: BorderStyle) -> Self {
        Self {
            border,
            state: WindowState::Normal,
            dragging: false,
            saved: None,
        }
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Saved frame while fullscreen (or minimized out of fullscreen)
    pub fn saved(&self) -> Option<SavedFrame> {
        self.saved
    }

    /// True while fullscreen, including a minimize taken from fullscreen
    pub fn holds_fullscreen(&self) -> bool {
        self.saved.is_some()
    }

    pub fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
    }

    /// Record a plain state change (Normal/Minimized/Maximized)
    pub fn set_state(&mut self, state: WindowState) {
        debug_assert!(state != WindowState::Fullscreen, "use enter_fullscreen");
        self.state = state;
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Remember the current border and `reported` rect, then go borderless
    pub fn enter_fullscreen(&mut self, reported: Rect) {
        self.saved = Some(SavedFrame {
            border: self.border,
            reported,
        });
        self.border = BorderStyle::NoBorder;
        self.state = WindowState::Fullscreen;
    }

    /// Put the saved border back and fall to Normal
    pub fn leave_fullscreen(&mut self) -> Option<SavedFrame> {
        let saved = self.saved.take()?;
        self.border = saved.border;
        self.state = WindowState::Normal;
        Some(saved)
    }

    /// Follow a state change the OS made on its own (caption buttons,
    /// snapping, taskbar). Returns the new state if it changed.
    pub fn apply_size_kind(&mut self, kind: SizeKind) -> Option<WindowState> {
        let next = match kind {
            SizeKind::Minimized => WindowState::Minimized,
            SizeKind::Maximized if self.state == WindowState::Fullscreen => WindowState::Fullscreen,
            SizeKind::Maximized => WindowState::Maximized,
            SizeKind::Restored if self.saved.is_some() => WindowState::Fullscreen,
            SizeKind::Restored => WindowState::Normal,
        };

        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}
