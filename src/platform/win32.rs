//! Win32 backend for the window core
//!
//! Owns an outer top-level window plus a child window that fills its client
//! area and carries the OpenGL device context. The window procedure only
//! translates messages into [`OsEvent`]s and queues them; the one message it
//! answers itself is `WM_SIZING`, which needs a synchronous reply, using the
//! limits snapshot the core pushed with [`Platform::set_size_limits`].

use std::collections::{HashMap, VecDeque};
use std::ffi::c_void;
use std::sync::Arc;

use log::{debug, trace, warn};
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{
    GetLastError, SetLastError, BOOL, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, WIN32_ERROR,
    WPARAM,
};
use windows::Win32::Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_EXTENDED_FRAME_BOUNDS};
use windows::Win32::Graphics::Gdi::{
    ClientToScreen, GetDC, GetMonitorInfoW, MonitorFromWindow, ReleaseDC, HDC, MONITORINFO,
    MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    AdjustWindowRectExForDpi, GetDpiForSystem, GetDpiForWindow, SetProcessDpiAwarenessContext,
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::Input::KeyboardAndMouse::SetFocus;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::events::{DragEdge, KeyCode, OsEvent, SizeKind};
use crate::geometry::{Insets, Rect, Size};
use crate::reconcile::{constrain_sizing, scale_for, SizeLimits, BASE_DPI};
use crate::render::DeviceContext;
use crate::window::BorderStyle;

use super::{CursorIcon, Icon, OsError, OsResult, Platform, ShowCommand, WindowDesc};

/// Window class names
const WINDOW_CLASS: PCWSTR = w!("HaighFrameWindow");
const SURFACE_CLASS: PCWSTR = w!("HaighFrameSurface");

/// `WM_SIZE` wParam values
const SIZE_MINIMIZED_PARAM: usize = 1;
const SIZE_MAXIMIZED_PARAM: usize = 2;
/// `WM_SETCURSOR` hit-test code for the client area
const HT_CLIENT: isize = 1;
/// `WM_SETICON` wParam values
const ICON_SMALL_PARAM: usize = 0;
const ICON_BIG_PARAM: usize = 1;

/// Per-window data the window procedure reaches through the HWND
#[derive(Default)]
struct WindowSlot {
    events: VecDeque<OsEvent>,
    limits: SizeLimits,
    child: isize,
    cursor: isize,
    cursor_hidden: bool,
    high_surrogate: Option<u16>,
}

type SharedSlot = Arc<Mutex<WindowSlot>>;

/// Live windows keyed by HWND. Never locked while calling into User32.
static SLOTS: Lazy<Mutex<HashMap<isize, SharedSlot>>> = Lazy::new(|| Mutex::new(HashMap::new()));

static CLASSES: OnceCell<()> = OnceCell::new();
static DPI_AWARENESS: OnceCell<()> = OnceCell::new();

fn slot_for(hwnd: HWND) -> Option<SharedSlot> {
    SLOTS.lock().get(&(hwnd.0 as isize)).cloned()
}

fn push_event(slot: &SharedSlot, event: OsEvent) {
    trace!("Queued {:?}", event);
    slot.lock().events.push_back(event);
}

/// Turn a `windows` error into an [`OsError`], unwrapping Win32 codes
/// from their `HRESULT_FROM_WIN32` form
fn os_error(function: &'static str, error: windows::core::Error) -> OsError {
    let hr = error.code().0 as u32;
    let code = if hr & 0xFFFF_0000 == 0x8007_0000 {
        hr & 0xFFFF
    } else {
        hr
    };
    OsError::new(function, code)
}

fn last_error(function: &'static str) -> OsError {
    OsError::new(function, unsafe { GetLastError() }.0)
}

fn to_native(rect: Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

fn from_native(rect: RECT) -> Rect {
    Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom)
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn style_for(border: BorderStyle) -> WINDOW_STYLE {
    let base = WS_CLIPCHILDREN | WS_CLIPSIBLINGS;
    match border {
        BorderStyle::SizingBorder => base | WS_OVERLAPPEDWINDOW,
        BorderStyle::Border => base | WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX,
        BorderStyle::NoBorder => base | WS_POPUP | WS_SYSMENU | WS_MINIMIZEBOX,
    }
}

fn enable_dpi_awareness() {
    DPI_AWARENESS.get_or_init(|| unsafe {
        if let Err(e) = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) {
            // already set by a manifest or an earlier call
            debug!("SetProcessDpiAwarenessContext: {}", e);
        }
    });
}

fn module_handle() -> OsResult<HINSTANCE> {
    unsafe { GetModuleHandleW(None) }
        .map(HINSTANCE::from)
        .map_err(|e| os_error("GetModuleHandleW", e))
}

fn register_classes() -> OsResult<()> {
    let hinstance = module_handle()?;

    let window_class = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW | CS_DBLCLKS,
        lpfnWndProc: Some(window_proc),
        hInstance: hinstance,
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(|e| os_error("LoadCursorW", e))?,
        lpszClassName: WINDOW_CLASS,
        ..Default::default()
    };
    if unsafe { RegisterClassExW(&window_class) } == 0 {
        return Err(last_error("RegisterClassExW"));
    }

    let surface_class = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_OWNDC,
        lpfnWndProc: Some(surface_proc),
        hInstance: hinstance,
        lpszClassName: SURFACE_CLASS,
        ..Default::default()
    };
    if unsafe { RegisterClassExW(&surface_class) } == 0 {
        return Err(last_error("RegisterClassExW"));
    }

    debug!("Window classes registered");
    Ok(())
}

/// Native window pair driven by the Win32 message queue
pub struct Win32Platform {
    hwnd: HWND,
    child: HWND,
    slot: SharedSlot,
    icons: Vec<HICON>,
}

impl Win32Platform {
    pub fn new() -> Self {
        enable_dpi_awareness();
        Self {
            hwnd: HWND::default(),
            child: HWND::default(),
            slot: Arc::new(Mutex::new(WindowSlot::default())),
            icons: Vec::new(),
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn destroy_icons(&mut self) {
        for icon in self.icons.drain(..) {
            unsafe {
                let _ = DestroyIcon(icon);
            }
        }
    }

    fn create_icon(icon: &Icon) -> OsResult<HICON> {
        let hinstance = module_handle()?;
        let (width, height) = (icon.width() as i32, icon.height() as i32);

        // 32bpp colour plane in BGRA order; alpha makes the AND mask moot
        let bgra: Vec<u8> = icon
            .rgba()
            .chunks_exact(4)
            .flat_map(|p| [p[2], p[1], p[0], p[3]])
            .collect();
        let mask_stride = ((width + 15) / 16 * 2) as usize;
        let mask = vec![0u8; mask_stride * height as usize];

        unsafe { CreateIcon(hinstance, width, height, 1, 32, mask.as_ptr(), bgra.as_ptr()) }
            .map_err(|e| os_error("CreateIcon", e))
    }
}

impl Default for Win32Platform {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Win32Platform {
    fn drop(&mut self) {
        self.destroy_icons();
    }
}

impl Platform for Win32Platform {
    fn create_window(&mut self, desc: &WindowDesc) -> OsResult<()> {
        CLASSES.get_or_try_init(register_classes)?;
        let hinstance = module_handle()?;
        let title = to_wide(&desc.title);

        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                WINDOW_CLASS,
                PCWSTR(title.as_ptr()),
                style_for(desc.border),
                desc.rect.x,
                desc.rect.y,
                desc.rect.width,
                desc.rect.height,
                None,
                None,
                hinstance,
                None,
            )
        }
        .map_err(|e| os_error("CreateWindowExW", e))?;

        self.hwnd = hwnd;
        SLOTS.lock().insert(hwnd.0 as isize, self.slot.clone());
        debug!("Created window {:?}", hwnd);
        Ok(())
    }

    fn create_child(&mut self, size: Size) -> OsResult<()> {
        let hinstance = module_handle()?;
        let child = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                SURFACE_CLASS,
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE | WS_CLIPSIBLINGS | WS_CLIPCHILDREN,
                0,
                0,
                size.width,
                size.height,
                self.hwnd,
                None,
                hinstance,
                None,
            )
        }
        .map_err(|e| os_error("CreateWindowExW", e))?;

        self.child = child;
        self.slot.lock().child = child.0 as isize;
        Ok(())
    }

    fn destroy_window(&mut self) -> OsResult<()> {
        unsafe { DestroyWindow(self.hwnd) }.map_err(|e| os_error("DestroyWindow", e))?;
        self.destroy_icons();
        Ok(())
    }

    fn pump(&mut self) {
        let mut msg = MSG::default();
        unsafe {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    fn next_event(&mut self) -> Option<OsEvent> {
        self.slot.lock().events.pop_front()
    }

    fn dpi(&self) -> u32 {
        let dpi = if self.hwnd.is_invalid() {
            unsafe { GetDpiForSystem() }
        } else {
            unsafe { GetDpiForWindow(self.hwnd) }
        };
        match dpi {
            0 => BASE_DPI,
            dpi => dpi,
        }
    }

    fn window_rect(&self) -> OsResult<Rect> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(self.hwnd, &mut rect) }.map_err(|e| os_error("GetWindowRect", e))?;
        Ok(from_native(rect))
    }

    fn frame_bounds(&self) -> OsResult<Rect> {
        let mut rect = RECT::default();
        unsafe {
            DwmGetWindowAttribute(
                self.hwnd,
                DWMWA_EXTENDED_FRAME_BOUNDS,
                &mut rect as *mut RECT as *mut c_void,
                std::mem::size_of::<RECT>() as u32,
            )
        }
        .map_err(|e| os_error("DwmGetWindowAttribute", e))?;
        Ok(from_native(rect))
    }

    fn client_rect(&self) -> OsResult<Rect> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(self.hwnd, &mut rect) }.map_err(|e| os_error("GetClientRect", e))?;

        let mut origin = POINT::default();
        if !unsafe { ClientToScreen(self.hwnd, &mut origin) }.as_bool() {
            return Err(last_error("ClientToScreen"));
        }
        Ok(Rect::new(origin.x, origin.y, rect.right, rect.bottom))
    }

    fn frame_insets(&self, border: BorderStyle, dpi: u32) -> OsResult<Insets> {
        let mut rect = RECT::default();
        unsafe {
            AdjustWindowRectExForDpi(&mut rect, style_for(border), BOOL(0), WINDOW_EX_STYLE::default(), dpi)
        }
        .map_err(|e| os_error("AdjustWindowRectExForDpi", e))?;
        Ok(Insets::new(-rect.left, -rect.top, rect.right, rect.bottom))
    }

    fn work_area(&self) -> OsResult<Rect> {
        monitor_info(self.hwnd).map(|info| from_native(info.rcWork))
    }

    fn monitor_rect(&self) -> OsResult<Rect> {
        monitor_info(self.hwnd).map(|info| from_native(info.rcMonitor))
    }

    fn set_window_rect(&mut self, rect: Rect) -> OsResult<()> {
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| os_error("SetWindowPos", e))
    }

    fn set_frame(&mut self, border: BorderStyle, rect: Rect) -> OsResult<()> {
        unsafe {
            let current = WINDOW_STYLE(GetWindowLongW(self.hwnd, GWL_STYLE) as u32);
            let keep = current & (WS_VISIBLE | WS_MINIMIZE | WS_MAXIMIZE);
            let style = style_for(border) | keep;

            SetLastError(WIN32_ERROR(0));
            if SetWindowLongW(self.hwnd, GWL_STYLE, style.0 as i32) == 0 && GetLastError().0 != 0 {
                return Err(last_error("SetWindowLongW"));
            }

            SetWindowPos(
                self.hwnd,
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_FRAMECHANGED | SWP_NOZORDER | SWP_NOACTIVATE,
            )
            .map_err(|e| os_error("SetWindowPos", e))
        }
    }

    fn resize_child(&mut self, size: Size) -> OsResult<()> {
        if self.child.is_invalid() {
            return Ok(());
        }
        unsafe { MoveWindow(self.child, 0, 0, size.width, size.height, true) }
            .map_err(|e| os_error("MoveWindow", e))
    }

    fn show(&mut self, command: ShowCommand) -> OsResult<()> {
        let cmd = match command {
            ShowCommand::Show => SW_SHOW,
            ShowCommand::Hide => SW_HIDE,
            ShowCommand::Normal => SW_SHOWNORMAL,
            ShowCommand::Minimize => SW_MINIMIZE,
            ShowCommand::Maximize => SW_MAXIMIZE,
        };
        // the return value is the previous visibility, not an error
        unsafe {
            let _ = ShowWindow(self.hwnd, cmd);
        }
        Ok(())
    }

    fn set_size_limits(&mut self, limits: SizeLimits) {
        self.slot.lock().limits = limits;
    }

    fn set_title(&mut self, title: &str) -> OsResult<()> {
        let wide = to_wide(title);
        unsafe { SetWindowTextW(self.hwnd, PCWSTR(wide.as_ptr())) }
            .map_err(|e| os_error("SetWindowTextW", e))
    }

    fn set_icon(&mut self, icon: Option<&Icon>) -> OsResult<()> {
        let handle = match icon {
            Some(icon) => Some(Self::create_icon(icon)?),
            None => None,
        };
        let lparam = LPARAM(handle.map(|h| h.0 as isize).unwrap_or(0));
        unsafe {
            SendMessageW(self.hwnd, WM_SETICON, WPARAM(ICON_BIG_PARAM), lparam);
            SendMessageW(self.hwnd, WM_SETICON, WPARAM(ICON_SMALL_PARAM), lparam);
        }

        self.destroy_icons();
        self.icons.extend(handle);
        Ok(())
    }

    fn clip_cursor(&mut self, rect: Option<Rect>) -> OsResult<()> {
        let result = match rect {
            Some(rect) => {
                let native = to_native(rect);
                unsafe { ClipCursor(Some(&native as *const RECT)) }
            }
            None => unsafe { ClipCursor(None) },
        };
        result.map_err(|e| os_error("ClipCursor", e))
    }

    fn set_cursor(&mut self, cursor: CursorIcon) -> OsResult<()> {
        let id = match cursor {
            CursorIcon::Arrow => IDC_ARROW,
            CursorIcon::IBeam => IDC_IBEAM,
            CursorIcon::Crosshair => IDC_CROSS,
            CursorIcon::Hand => IDC_HAND,
            CursorIcon::Wait => IDC_WAIT,
            CursorIcon::SizeAll => IDC_SIZEALL,
            CursorIcon::SizeNs => IDC_SIZENS,
            CursorIcon::SizeWe => IDC_SIZEWE,
            CursorIcon::No => IDC_NO,
        };
        let handle = unsafe { LoadCursorW(None, id) }.map_err(|e| os_error("LoadCursorW", e))?;
        self.slot.lock().cursor = handle.0 as isize;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.slot.lock().cursor_hidden = !visible;
    }

    fn focus(&mut self) -> OsResult<()> {
        unsafe {
            if !SetForegroundWindow(self.hwnd).as_bool() {
                SetFocus(self.hwnd).map_err(|e| os_error("SetFocus", e))?;
            }
        }
        Ok(())
    }

    fn is_focused(&self) -> bool {
        unsafe { GetForegroundWindow() == self.hwnd }
    }

    fn device_context(&mut self) -> OsResult<DeviceContext> {
        let hdc = unsafe { GetDC(self.child) };
        if hdc.is_invalid() {
            return Err(last_error("GetDC"));
        }
        Ok(DeviceContext(hdc.0 as isize))
    }

    fn release_device_context(&mut self, dc: DeviceContext) {
        unsafe {
            ReleaseDC(self.child, HDC(dc.0 as *mut c_void));
        }
    }

    fn post_close(&mut self) -> OsResult<()> {
        unsafe { PostMessageW(self.hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)) }
            .map_err(|e| os_error("PostMessageW", e))
    }
}

fn monitor_info(hwnd: HWND) -> OsResult<MONITORINFO> {
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    unsafe {
        let monitor = MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST);
        if !GetMonitorInfoW(monitor, &mut info).as_bool() {
            return Err(last_error("GetMonitorInfoW"));
        }
    }
    Ok(info)
}

/// Answer `WM_SIZING` by clamping the proposed rect in place
unsafe fn clamp_sizing(hwnd: HWND, slot: &SharedSlot, wparam: WPARAM, lparam: LPARAM) -> bool {
    let limits = slot.lock().limits;
    if limits.is_unbounded() {
        return false;
    }
    let Some(edge) = DragEdge::from_wmsz(wparam.0 as u32) else {
        return false;
    };

    let mut window = RECT::default();
    let mut client = RECT::default();
    if GetWindowRect(hwnd, &mut window).is_err() || GetClientRect(hwnd, &mut client).is_err() {
        return false;
    }
    let non_client = Size::new(
        (window.right - window.left) - client.right,
        (window.bottom - window.top) - client.bottom,
    );

    let proposal = &mut *(lparam.0 as *mut RECT);
    let scale = scale_for(GetDpiForWindow(hwnd));
    match constrain_sizing(from_native(*proposal), edge, non_client, &limits, scale) {
        Some(fixed) => {
            *proposal = to_native(fixed);
            true
        }
        None => false,
    }
}

fn push_char(slot: &SharedSlot, unit: u16) {
    let mut slot = slot.lock();
    let c = match unit {
        0xD800..=0xDBFF => {
            slot.high_surrogate = Some(unit);
            return;
        }
        0xDC00..=0xDFFF => match slot.high_surrogate.take() {
            Some(high) => char::decode_utf16([high, unit]).next().and_then(Result::ok),
            None => None,
        },
        _ => char::from_u32(unit as u32),
    };
    match c {
        Some(c) => slot.events.push_back(OsEvent::Char(c)),
        None => warn!("Dropping unpaired UTF-16 unit {:#06x}", unit),
    }
}

/// Window procedure for the outer window
unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let Some(slot) = slot_for(hwnd) else {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    };

    match msg {
        WM_SIZING => {
            if clamp_sizing(hwnd, &slot, wparam, lparam) {
                trace!("Clamped live resize");
                LRESULT(1)
            } else {
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
        }

        WM_SIZE => {
            let kind = match wparam.0 {
                SIZE_MINIMIZED_PARAM => SizeKind::Minimized,
                SIZE_MAXIMIZED_PARAM => SizeKind::Maximized,
                _ => SizeKind::Restored,
            };
            if kind != SizeKind::Minimized {
                // keep the surface glued to the client area during modal drags
                let child = slot.lock().child;
                if child != 0 {
                    let width = (lparam.0 & 0xFFFF) as i32;
                    let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
                    let _ = MoveWindow(HWND(child as *mut c_void), 0, 0, width, height, true);
                }
            }
            push_event(&slot, OsEvent::Resized { kind });
            LRESULT(0)
        }

        WM_MOVE => {
            push_event(&slot, OsEvent::Moved);
            LRESULT(0)
        }

        // applied here, not after the modal drag loop returns, or the window
        // would snap back to where it crossed the monitor edge
        WM_DPICHANGED => {
            let dpi = (wparam.0 & 0xFFFF) as u32;
            let suggested = from_native(*(lparam.0 as *const RECT));
            // queued first so the WM_SIZE/WM_MOVE below are read at the new scale
            push_event(&slot, OsEvent::DpiChanged { dpi, suggested });
            if let Err(e) = SetWindowPos(
                hwnd,
                None,
                suggested.x,
                suggested.y,
                suggested.width,
                suggested.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            ) {
                warn!("SetWindowPos for DPI change failed: {}", e);
            }
            LRESULT(0)
        }

        WM_ENTERSIZEMOVE => {
            push_event(&slot, OsEvent::EnterSizeMove);
            LRESULT(0)
        }

        WM_EXITSIZEMOVE => {
            push_event(&slot, OsEvent::ExitSizeMove);
            LRESULT(0)
        }

        WM_SETFOCUS => {
            push_event(&slot, OsEvent::Focus(true));
            LRESULT(0)
        }

        WM_KILLFOCUS => {
            push_event(&slot, OsEvent::Focus(false));
            LRESULT(0)
        }

        // DefWindowProc would destroy the window; the core decides
        WM_CLOSE => {
            push_event(&slot, OsEvent::CloseRequested);
            LRESULT(0)
        }

        WM_DESTROY => {
            push_event(&slot, OsEvent::Destroyed);
            SLOTS.lock().remove(&(hwnd.0 as isize));
            LRESULT(0)
        }

        WM_CHAR => {
            push_char(&slot, wparam.0 as u16);
            LRESULT(0)
        }

        WM_KEYDOWN | WM_SYSKEYDOWN => {
            push_event(&slot, OsEvent::KeyDown(KeyCode::from_params(wparam.0, lparam.0)));
            if msg == WM_SYSKEYDOWN {
                // keep Alt+F4 and the system menu working
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            }
            LRESULT(0)
        }

        WM_KEYUP | WM_SYSKEYUP => {
            push_event(&slot, OsEvent::KeyUp(KeyCode::from_params(wparam.0, lparam.0)));
            if msg == WM_SYSKEYUP {
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            }
            LRESULT(0)
        }

        WM_SETCURSOR if (lparam.0 & 0xFFFF) == HT_CLIENT => {
            let (cursor, hidden) = {
                let slot = slot.lock();
                (slot.cursor, slot.cursor_hidden)
            };
            if hidden {
                let _ = SetCursor(HCURSOR::default());
            } else if cursor == 0 {
                // nothing chosen yet: the class arrow
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            } else {
                let _ = SetCursor(HCURSOR(cursor as *mut c_void));
            }
            LRESULT(1)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Window procedure for the child drawing surface
unsafe extern "system" fn surface_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // GL repaints the whole surface
        WM_ERASEBKGND => LRESULT(1),
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
