//! OS boundary for the window core
//!
//! The core never calls User32/GDI32/DWM directly. Everything it needs from
//! the operating system goes through [`Platform`], which keeps the geometry
//! state machine testable against [`simulated::SimulatedPlatform`].

pub mod simulated;
#[cfg(windows)]
pub mod win32;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::FrameResult;
use crate::events::OsEvent;
use crate::geometry::{Insets, Rect, Size};
use crate::reconcile::SizeLimits;
use crate::render::DeviceContext;
use crate::window::BorderStyle;

/// A failed OS call, carrying the `GetLastError` code
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{function} failed (error {code})")]
pub struct OsError {
    pub function: &'static str,
    pub code: u32,
}

impl OsError {
    pub const fn new(function: &'static str, code: u32) -> Self {
        Self { function, code }
    }
}

pub type OsResult<T> = Result<T, OsError>;

/// `ShowWindow` commands the core issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    Show,
    Hide,
    /// Restore to the normal placement (not to a previous maximize)
    Normal,
    Minimize,
    Maximize,
}

/// Named system cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorIcon {
    #[default]
    Arrow,
    IBeam,
    Crosshair,
    Hand,
    Wait,
    SizeAll,
    SizeNs,
    SizeWe,
    No,
}

/// RGBA window icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Icon {
    /// Wrap raw RGBA8 pixels; `None` if the buffer does not match the size
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || rgba.len() != (width * height * 4) as usize {
            return None;
        }
        Some(Self { width, height, rgba })
    }

    /// Decode an image file (PNG, ICO, ...) into an icon
    pub fn from_path(path: impl AsRef<Path>) -> FrameResult<Self> {
        let image = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Parameters for creating the outer window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDesc {
    pub title: String,
    pub border: BorderStyle,
    /// Initial reported (`GetWindowRect`) rectangle in pixels
    pub rect: Rect,
}

/// Everything the window core asks of the operating system.
///
/// Implementations own exactly one outer window and its child drawing
/// surface. All calls happen on the thread that created the window.
/// Geometry calls that change size or position must queue the matching
/// [`OsEvent`]s, the way Windows sends `WM_SIZE`/`WM_MOVE` from inside
/// `SetWindowPos`.
pub trait Platform {
    /// Create the (hidden) outer window
    fn create_window(&mut self, desc: &WindowDesc) -> OsResult<()>;

    /// Create the child surface filling the client area
    fn create_child(&mut self, size: Size) -> OsResult<()>;

    fn destroy_window(&mut self) -> OsResult<()>;

    /// Translate whatever is waiting in the native queue; never blocks
    fn pump(&mut self);

    fn next_event(&mut self) -> Option<OsEvent>;

    /// Current DPI of the monitor hosting the window
    fn dpi(&self) -> u32;

    /// Legacy window rect, including invisible borders
    fn window_rect(&self) -> OsResult<Rect>;

    /// Visible frame bounds (`DWMWA_EXTENDED_FRAME_BOUNDS`)
    fn frame_bounds(&self) -> OsResult<Rect>;

    /// Client area in screen coordinates
    fn client_rect(&self) -> OsResult<Rect>;

    /// Reported-rect minus client-rect for `border` at `dpi`
    fn frame_insets(&self, border: BorderStyle, dpi: u32) -> OsResult<Insets>;

    /// Work area of the monitor hosting the window
    fn work_area(&self) -> OsResult<Rect>;

    /// Full bounds of the monitor hosting the window
    fn monitor_rect(&self) -> OsResult<Rect>;

    /// Move/resize so the reported rect becomes `rect`
    fn set_window_rect(&mut self, rect: Rect) -> OsResult<()>;

    /// Switch frame style and apply `rect` in the same step
    fn set_frame(&mut self, border: BorderStyle, rect: Rect) -> OsResult<()>;

    fn resize_child(&mut self, size: Size) -> OsResult<()>;

    fn show(&mut self, command: ShowCommand) -> OsResult<()>;

    /// Limits consulted while the user drags the frame
    fn set_size_limits(&mut self, limits: SizeLimits);

    fn set_title(&mut self, title: &str) -> OsResult<()>;

    fn set_icon(&mut self, icon: Option<&Icon>) -> OsResult<()>;

    /// Confine the cursor to `rect`, or release it with `None`
    fn clip_cursor(&mut self, rect: Option<Rect>) -> OsResult<()>;

    fn set_cursor(&mut self, cursor: CursorIcon) -> OsResult<()>;

    fn set_cursor_visible(&mut self, visible: bool);

    fn focus(&mut self) -> OsResult<()>;

    fn is_focused(&self) -> bool;

    /// Device context of the child surface
    fn device_context(&mut self) -> OsResult<DeviceContext>;

    fn release_device_context(&mut self, dc: DeviceContext);

    /// Ask the window to close, as if the user clicked the close button
    fn post_close(&mut self) -> OsResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_buffer_must_match_dimensions() {
        assert!(Icon::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Icon::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(Icon::from_rgba(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn icon_from_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        image::RgbaImage::from_pixel(16, 8, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let icon = Icon::from_path(&path).unwrap();
        assert_eq!((icon.width(), icon.height()), (16, 8));
        assert_eq!(&icon.rgba()[..4], &[255, 0, 0, 255]);
    }
}
