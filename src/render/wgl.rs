//! WGL implementation of the render-surface bootstrap
//!
//! Picks a double-buffered RGBA pixel format, creates a legacy context and,
//! for OpenGL 3.0 and later, trades it for one made through
//! `wglCreateContextAttribsARB` with the requested version and the core
//! profile.

use std::ffi::c_void;

use log::{debug, warn};
use windows::core::s;
use windows::Win32::Foundation::GetLastError;
use windows::Win32::Graphics::Gdi::HDC;
use windows::Win32::Graphics::OpenGL::{
    wglCreateContext, wglDeleteContext, wglGetProcAddress, wglMakeCurrent, wglShareLists,
    ChoosePixelFormat, SetPixelFormat, SwapBuffers, HGLRC, PFD_DOUBLEBUFFER, PFD_DRAW_TO_WINDOW,
    PFD_SUPPORT_OPENGL, PFD_TYPE_RGBA, PIXELFORMATDESCRIPTOR,
};

use crate::error::{FrameError, FrameResult};

use super::{ContextHandle, DeviceContext, GlVersion, GraphicsBootstrap};

const WGL_CONTEXT_MAJOR_VERSION_ARB: i32 = 0x2091;
const WGL_CONTEXT_MINOR_VERSION_ARB: i32 = 0x2092;
const WGL_CONTEXT_PROFILE_MASK_ARB: i32 = 0x9126;
const WGL_CONTEXT_CORE_PROFILE_BIT_ARB: i32 = 0x0001;

type CreateContextAttribsArb =
    unsafe extern "system" fn(hdc: HDC, share: HGLRC, attribs: *const i32) -> HGLRC;

fn hdc(dc: DeviceContext) -> HDC {
    HDC(dc.0 as *mut c_void)
}

fn hglrc(context: ContextHandle) -> HGLRC {
    HGLRC(context.0 as *mut c_void)
}

fn win32(function: &'static str) -> FrameError {
    FrameError::Win32 {
        function,
        code: unsafe { GetLastError() }.0,
    }
}

/// Creates and drives WGL contexts
#[derive(Debug, Default)]
pub struct WglBootstrap;

impl WglBootstrap {
    pub fn new() -> Self {
        Self
    }

    fn set_pixel_format(dc: HDC) -> FrameResult<()> {
        let pfd = PIXELFORMATDESCRIPTOR {
            nSize: std::mem::size_of::<PIXELFORMATDESCRIPTOR>() as u16,
            nVersion: 1,
            dwFlags: PFD_DRAW_TO_WINDOW | PFD_SUPPORT_OPENGL | PFD_DOUBLEBUFFER,
            iPixelType: PFD_TYPE_RGBA,
            cColorBits: 32,
            cDepthBits: 24,
            cStencilBits: 8,
            ..Default::default()
        };

        unsafe {
            let format = ChoosePixelFormat(dc, &pfd);
            if format == 0 {
                return Err(win32("ChoosePixelFormat"));
            }
            SetPixelFormat(dc, format, &pfd).map_err(|_| win32("SetPixelFormat"))?;
        }
        Ok(())
    }

    /// Swap a bound legacy context for a versioned core-profile one
    unsafe fn upgrade(
        dc: HDC,
        legacy: HGLRC,
        version: GlVersion,
        share: Option<HGLRC>,
    ) -> FrameResult<HGLRC> {
        wglMakeCurrent(dc, legacy).map_err(|_| win32("wglMakeCurrent"))?;
        let proc = wglGetProcAddress(s!("wglCreateContextAttribsARB"));
        let Some(proc) = proc else {
            return Err(FrameError::Graphics(format!(
                "OpenGL {} needs wglCreateContextAttribsARB, which the driver does not export",
                version
            )));
        };
        let create: CreateContextAttribsArb = std::mem::transmute(proc);

        let attribs = [
            WGL_CONTEXT_MAJOR_VERSION_ARB,
            version.major as i32,
            WGL_CONTEXT_MINOR_VERSION_ARB,
            version.minor as i32,
            WGL_CONTEXT_PROFILE_MASK_ARB,
            WGL_CONTEXT_CORE_PROFILE_BIT_ARB,
            0,
        ];
        let context = create(dc, share.unwrap_or_default(), attribs.as_ptr());
        if context.is_invalid() {
            return Err(win32("wglCreateContextAttribsARB"));
        }
        Ok(context)
    }
}

impl GraphicsBootstrap for WglBootstrap {
    fn create_context(
        &mut self,
        version: GlVersion,
        dc: DeviceContext,
        share: Option<ContextHandle>,
    ) -> FrameResult<ContextHandle> {
        if !version.is_valid() {
            return Err(FrameError::Graphics(format!(
                "unsupported OpenGL version {}",
                version
            )));
        }

        let dc = hdc(dc);
        Self::set_pixel_format(dc)?;

        let share = share.map(hglrc);
        let legacy = unsafe { wglCreateContext(dc) }.map_err(|_| win32("wglCreateContext"))?;

        let context = if version.needs_attribs() {
            let upgraded = unsafe { Self::upgrade(dc, legacy, version, share) };
            unsafe {
                let _ = wglMakeCurrent(dc, HGLRC::default());
                let _ = wglDeleteContext(legacy);
            }
            upgraded?
        } else {
            if let Some(share) = share {
                if let Err(e) = unsafe { wglShareLists(share, legacy) } {
                    unsafe {
                        let _ = wglDeleteContext(legacy);
                    }
                    return Err(FrameError::Graphics(format!("wglShareLists failed: {}", e)));
                }
            }
            legacy
        };

        debug!("Created OpenGL {} context {:?}", version, context);
        Ok(ContextHandle(context.0 as isize))
    }

    fn make_current(&mut self, dc: DeviceContext, context: Option<ContextHandle>) -> FrameResult<()> {
        let context = context.map(hglrc).unwrap_or_default();
        unsafe { wglMakeCurrent(hdc(dc), context) }.map_err(|_| win32("wglMakeCurrent"))
    }

    fn delete_context(&mut self, context: ContextHandle) {
        if let Err(e) = unsafe { wglDeleteContext(hglrc(context)) } {
            warn!("wglDeleteContext failed: {}", e);
        }
    }

    fn swap_buffers(&mut self, dc: DeviceContext) -> FrameResult<()> {
        unsafe { SwapBuffers(hdc(dc)) }.map_err(|_| win32("SwapBuffers"))
    }
}
