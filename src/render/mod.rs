//! Render-surface bootstrap boundary
//!
//! The window hands a device context to a [`GraphicsBootstrap`] once at
//! construction and gets an opaque context handle back. Which context is
//! current is always passed explicitly; nothing here keeps ambient state.

#[cfg(windows)]
pub mod wgl;

use serde::{Deserialize, Serialize};

use crate::error::FrameResult;

/// Opaque device-context handle (an `HDC` on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceContext(pub isize);

/// Opaque render-context handle (an `HGLRC` on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle(pub isize);

/// Requested OpenGL version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Whether this names a published OpenGL release
    pub fn is_valid(&self) -> bool {
        let max_minor = match self.major {
            1 => 5,
            2 => 1,
            3 => 3,
            4 => 6,
            _ => return false,
        };
        self.minor <= max_minor
    }

    /// Versions from 3.0 need `wglCreateContextAttribsARB`
    pub fn needs_attribs(&self) -> bool {
        self.major >= 3
    }
}

impl Default for GlVersion {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

impl std::fmt::Display for GlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Pixel-format selection and context creation for one device context
pub trait GraphicsBootstrap {
    /// Select a pixel format for `dc` and create a context of `version`,
    /// optionally sharing objects with `share`
    fn create_context(
        &mut self,
        version: GlVersion,
        dc: DeviceContext,
        share: Option<ContextHandle>,
    ) -> FrameResult<ContextHandle>;

    /// Bind `context` to `dc`, or unbind whatever is current with `None`
    fn make_current(&mut self, dc: DeviceContext, context: Option<ContextHandle>) -> FrameResult<()>;

    fn delete_context(&mut self, context: ContextHandle);

    fn swap_buffers(&mut self, dc: DeviceContext) -> FrameResult<()>;
}

/// A device context paired with the render context created on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSurface {
    pub dc: DeviceContext,
    pub context: ContextHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_versions() {
        assert!(GlVersion::new(3, 3).is_valid());
        assert!(GlVersion::new(4, 6).is_valid());
        assert!(GlVersion::new(1, 0).is_valid());
        assert!(!GlVersion::new(3, 4).is_valid());
        assert!(!GlVersion::new(5, 0).is_valid());
        assert!(!GlVersion::new(0, 0).is_valid());
        assert!(GlVersion::new(3, 0).needs_attribs());
        assert!(!GlVersion::new(2, 1).needs_attribs());
        assert_eq!(GlVersion::default().to_string(), "3.3");
    }
}
