//! haighframe - a DPI-aware native window core for OpenGL applications
//!
//! A [`Window`] keeps three views of its geometry in agreement: the
//! logical rectangle the application works with, the pixel rectangle the
//! user actually sees, and the rectangle legacy Win32 calls report with
//! invisible resize borders included. On top of that it runs the window
//! state machine (normal, minimized, maximized, fullscreen), live-resize
//! clamping, DPI changes, cursor confinement and the close/destroy
//! lifecycle.
//!
//! The operating system sits behind [`platform::Platform`] and the OpenGL
//! context behind [`render::GraphicsBootstrap`]. On Windows use
//! `platform::win32::Win32Platform` with `render::wgl::WglBootstrap`;
//! [`platform::simulated`] provides an in-memory desktop for tests.

pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod platform;
pub mod reconcile;
pub mod render;
pub mod window;

pub use config::{Config, WindowSettings};
pub use error::{FrameError, FrameResult};
pub use events::{KeyCode, WindowEvent};
pub use geometry::{Insets, Point, Rect, Size};
pub use window::{BorderStyle, Window, WindowState};
