//! Events flowing into and out of the window core
//!
//! [`OsEvent`] is what a platform backend produces after translating its
//! native message queue. [`WindowEvent`] is what the application drains
//! from the window after the core has reconciled its geometry.

use crate::geometry::Rect;

/// Why the OS reported a new client size (the `WM_SIZE` request type)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Restored,
    Minimized,
    Maximized,
}

/// The frame edge or corner being dragged during a live resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEdge {
    Left,
    Right,
    Top,
    TopLeft,
    TopRight,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl DragEdge {
    /// Map a `WMSZ_*` value onto an edge
    pub fn from_wmsz(value: u32) -> Option<Self> {
        Some(match value {
            1 => DragEdge::Left,
            2 => DragEdge::Right,
            3 => DragEdge::Top,
            4 => DragEdge::TopLeft,
            5 => DragEdge::TopRight,
            6 => DragEdge::Bottom,
            7 => DragEdge::BottomLeft,
            8 => DragEdge::BottomRight,
            _ => return None,
        })
    }

    pub fn moves_left(self) -> bool {
        matches!(self, DragEdge::Left | DragEdge::TopLeft | DragEdge::BottomLeft)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, DragEdge::Top | DragEdge::TopLeft | DragEdge::TopRight)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, DragEdge::Right | DragEdge::TopRight | DragEdge::BottomRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, DragEdge::Bottom | DragEdge::BottomLeft | DragEdge::BottomRight)
    }
}

/// Raw key identity: virtual-key code plus hardware scan code
///
/// Mapping these onto a named key table is left to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode {
    pub virtual_key: u16,
    pub scan_code: u16,
}

impl KeyCode {
    /// Decode from `WM_KEYDOWN`/`WM_KEYUP` parameters
    pub fn from_params(wparam: usize, lparam: isize) -> Self {
        Self {
            virtual_key: (wparam & 0xFFFF) as u16,
            // bits 16..24 are the scan code, bit 24 the extended-key flag
            scan_code: ((lparam >> 16) & 0x1FF) as u16,
        }
    }
}

/// A native message after translation by the platform backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OsEvent {
    /// Client size confirmed by the OS
    Resized { kind: SizeKind },
    /// Window origin changed
    Moved,
    /// Monitor DPI changed; the backend has already moved the window to
    /// `suggested`, the OS-scaled window rect
    DpiChanged { dpi: u32, suggested: Rect },
    /// Interactive move/resize modal loop started
    EnterSizeMove,
    /// Interactive move/resize modal loop finished
    ExitSizeMove,
    Focus(bool),
    CloseRequested,
    Destroyed,
    Char(char),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// Notifications raised by the window for the application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// The user or [`Window::close`](crate::Window::close) asked to close.
    /// With `exit_on_close` set the window is destroyed on the next
    /// [`Window::process_events`](crate::Window::process_events) unless
    /// [`Window::cancel_close`](crate::Window::cancel_close) is called first.
    CloseAttempted,
    Closed,
    Moved { x: i32, y: i32 },
    Resized { width: i32, height: i32 },
    FocusChanged(bool),
    DpiChanged { scale: f64 },
    CharEntered(char),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmsz_edges() {
        assert_eq!(DragEdge::from_wmsz(1), Some(DragEdge::Left));
        assert_eq!(DragEdge::from_wmsz(8), Some(DragEdge::BottomRight));
        assert_eq!(DragEdge::from_wmsz(0), None);
        assert!(DragEdge::TopLeft.moves_left() && DragEdge::TopLeft.moves_top());
        assert!(!DragEdge::Right.moves_left());
    }

    #[test]
    fn key_params_keep_extended_bit() {
        // right control: vk 0xA3, scan 0x1D, extended
        let lparam = (0x1D << 16) | (1 << 24) | 1;
        let key = KeyCode::from_params(0xA3, lparam);
        assert_eq!(key.virtual_key, 0xA3);
        assert_eq!(key.scan_code, 0x11D);
    }
}
