//! In-memory desktop that behaves like Windows 10
//!
//! Used to drive the window core without a real message loop. It models
//! the parts of the OS the core has to reconcile against:
//!
//! - sizable frames carry a 7px (at 96 DPI) invisible border on the left,
//!   right and bottom edges; fixed frames carry 2px
//! - a hidden window reports frame bounds equal to its window rect
//! - maximize fills the work area with the invisible border hanging off
//!   screen, minimize parks the window at -32000
//! - geometry changes queue `Resized`/`Moved` exactly like `SetWindowPos`
//!   sends `WM_SIZE`/`WM_MOVE`
//! - interactive drags and DPI changes can be triggered from tests
//!
//! Every OS call is appended to a shared [`CallLog`] so ordering can be
//! checked, and any named call can be made to fail.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use log::trace;

use crate::error::{FrameError, FrameResult};
use crate::events::{DragEdge, KeyCode, OsEvent, SizeKind};
use crate::geometry::{Insets, Rect, Size};
use crate::reconcile::{constrain_sizing, scale_for, to_physical, SizeLimits, BASE_DPI};
use crate::render::{ContextHandle, DeviceContext, GlVersion, GraphicsBootstrap};
use crate::window::BorderStyle;

use super::{CursorIcon, Icon, OsError, OsResult, Platform, ShowCommand, WindowDesc};

/// Shared, ordered record of simulated OS and graphics calls
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// `ERROR_INVALID_WINDOW_HANDLE`
const INVALID_HANDLE: u32 = 1400;
/// Error code reported by injected failures
const INJECTED_FAILURE: u32 = 0x1F;

/// Monitor the simulated window lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Desktop {
    pub monitor: Rect,
    pub work_area: Rect,
    pub dpi: u32,
}

impl Default for Desktop {
    fn default() -> Self {
        Self {
            monitor: Rect::new(0, 0, 1920, 1080),
            // 40px taskbar at the bottom
            work_area: Rect::new(0, 0, 1920, 1040),
            dpi: 96,
        }
    }
}

/// Reported-minus-client insets, as `AdjustWindowRectExForDpi` returns them
pub fn frame_insets_at(border: BorderStyle, dpi: u32) -> Insets {
    let s = scale_for(dpi);
    let p = |v| to_physical(v, s);
    match border {
        BorderStyle::SizingBorder => Insets::new(p(8), p(31), p(8), p(8)),
        BorderStyle::Border => Insets::new(p(3), p(26), p(3), p(3)),
        BorderStyle::NoBorder => Insets::ZERO,
    }
}

/// Reported-minus-actual insets while the window is visible
pub fn invisible_borders_at(border: BorderStyle, dpi: u32) -> Insets {
    let s = scale_for(dpi);
    let p = |v| to_physical(v, s);
    match border {
        BorderStyle::SizingBorder => Insets::new(p(7), 0, p(7), p(7)),
        BorderStyle::Border => Insets::new(p(2), 0, p(2), p(2)),
        BorderStyle::NoBorder => Insets::ZERO,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Normal,
    Minimized,
    Maximized,
}

impl Placement {
    fn size_kind(self) -> SizeKind {
        match self {
            Placement::Normal => SizeKind::Restored,
            Placement::Minimized => SizeKind::Minimized,
            Placement::Maximized => SizeKind::Maximized,
        }
    }
}

pub struct SimulatedPlatform {
    desktop: Desktop,
    log: CallLog,
    events: VecDeque<OsEvent>,
    failing: HashSet<&'static str>,
    created: bool,
    destroyed: bool,
    child: Option<Size>,
    border: BorderStyle,
    visible: bool,
    placement: Placement,
    reported: Rect,
    normal_reported: Rect,
    limits: SizeLimits,
    clip: Option<Rect>,
    cursor: CursorIcon,
    cursor_visible: bool,
    focused: bool,
    title: String,
    icon: Option<Icon>,
    geometry_calls: usize,
}

impl SimulatedPlatform {
    pub fn new() -> Self {
        Self::with_desktop(Desktop::default())
    }

    pub fn with_desktop(desktop: Desktop) -> Self {
        Self {
            desktop,
            log: Rc::new(RefCell::new(Vec::new())),
            events: VecDeque::new(),
            failing: HashSet::new(),
            created: false,
            destroyed: false,
            child: None,
            border: BorderStyle::SizingBorder,
            visible: false,
            placement: Placement::Normal,
            reported: Rect::default(),
            normal_reported: Rect::default(),
            limits: SizeLimits::default(),
            clip: None,
            cursor: CursorIcon::Arrow,
            cursor_visible: true,
            focused: false,
            title: String::new(),
            icon: None,
            geometry_calls: 0,
        }
    }

    /// Handle to the call log, shareable with [`SimulatedGraphics`]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Make every later call to `function` fail
    pub fn fail(&mut self, function: &'static str) {
        self.failing.insert(function);
    }

    /// Number of calls that moved, resized or re-framed the window
    pub fn geometry_calls(&self) -> usize {
        self.geometry_calls
    }

    pub fn desktop(&self) -> Desktop {
        self.desktop
    }

    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn child_size(&self) -> Option<Size> {
        self.child
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn size_limits(&self) -> SizeLimits {
        self.limits
    }

    /// The user clicks the close button
    pub fn user_close(&mut self) {
        self.events.push_back(OsEvent::CloseRequested);
    }

    /// Another application takes or gives back the focus
    pub fn user_focus(&mut self, focused: bool) {
        self.set_focus(focused);
    }

    /// The user presses and releases a key while the window has focus
    pub fn press_key(&mut self, key: KeyCode) {
        self.events.push_back(OsEvent::KeyDown(key));
        self.events.push_back(OsEvent::KeyUp(key));
    }

    /// The user drags `edge` of the frame by (`dx`, `dy`) pixels
    pub fn drag_edge(&mut self, edge: DragEdge, dx: i32, dy: i32) {
        self.events.push_back(OsEvent::EnterSizeMove);

        let r = self.reported;
        let left = if edge.moves_left() { r.x + dx } else { r.x };
        let right = if edge.moves_right() { r.right() + dx } else { r.right() };
        let top = if edge.moves_top() { r.y + dy } else { r.y };
        let bottom = if edge.moves_bottom() { r.bottom() + dy } else { r.bottom() };
        let mut proposal = Rect::from_edges(left, top, right, bottom);

        let insets = frame_insets_at(self.border, self.desktop.dpi);
        let non_client = Size::new(insets.horizontal(), insets.vertical());
        if let Some(fixed) = constrain_sizing(
            proposal,
            edge,
            non_client,
            &self.limits,
            scale_for(self.desktop.dpi),
        ) {
            proposal = fixed;
        }

        self.apply_rect(proposal, false);
        self.events.push_back(OsEvent::ExitSizeMove);
    }

    /// The user drags the caption by (`dx`, `dy`) pixels
    pub fn drag_move(&mut self, dx: i32, dy: i32) {
        self.events.push_back(OsEvent::EnterSizeMove);
        let r = self.reported;
        self.apply_rect(Rect::new(r.x + dx, r.y + dy, r.width, r.height), false);
        self.events.push_back(OsEvent::ExitSizeMove);
    }

    /// The window lands on a monitor with a different DPI. The DPI change is
    /// queued ahead of the resize it causes.
    pub fn change_dpi(&mut self, dpi: u32) {
        let old = self.desktop.dpi;
        self.desktop.dpi = dpi;
        let ratio = dpi as f64 / old as f64;
        let r = self.reported;
        let suggested = Rect::new(
            r.x,
            r.y,
            to_physical(r.width, ratio),
            to_physical(r.height, ratio),
        );
        self.events.push_back(OsEvent::DpiChanged { dpi, suggested });
        // the backend adopts the suggested rect while handling the message
        self.apply_rect(suggested, false);
    }

    fn record(&self, call: &str) {
        trace!("simulated call: {}", call);
        self.log.borrow_mut().push(call.to_string());
    }

    fn check(&self, function: &'static str) -> OsResult<()> {
        if self.failing.contains(function) {
            return Err(OsError::new(function, INJECTED_FAILURE));
        }
        if self.destroyed {
            return Err(OsError::new(function, INVALID_HANDLE));
        }
        Ok(())
    }

    fn set_focus(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.events.push_back(OsEvent::Focus(focused));
        }
    }

    /// Apply a new reported rect and queue what `SetWindowPos` would send
    fn apply_rect(&mut self, rect: Rect, force_size: bool) {
        let old = self.reported;
        self.reported = rect;
        if self.placement == Placement::Normal {
            self.normal_reported = rect;
        }
        if old.origin() != rect.origin() {
            self.events.push_back(OsEvent::Moved);
        }
        if force_size || old.size() != rect.size() {
            self.events.push_back(OsEvent::Resized {
                kind: self.placement.size_kind(),
            });
        }
    }
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SimulatedPlatform {
    fn create_window(&mut self, desc: &WindowDesc) -> OsResult<()> {
        self.check("CreateWindowExW")?;
        self.record("create_window");
        self.created = true;
        self.title = desc.title.clone();
        self.border = desc.border;
        self.reported = desc.rect;
        self.normal_reported = desc.rect;
        Ok(())
    }

    fn create_child(&mut self, size: Size) -> OsResult<()> {
        self.check("CreateWindowExW")?;
        self.record("create_child");
        self.child = Some(size);
        Ok(())
    }

    fn destroy_window(&mut self) -> OsResult<()> {
        self.check("DestroyWindow")?;
        self.record("destroy_window");
        self.set_focus(false);
        self.destroyed = true;
        self.visible = false;
        self.child = None;
        self.events.push_back(OsEvent::Destroyed);
        Ok(())
    }

    fn pump(&mut self) {}

    fn next_event(&mut self) -> Option<OsEvent> {
        self.events.pop_front()
    }

    fn dpi(&self) -> u32 {
        // like GetDpiForWindow, only meaningful once the window exists
        if self.created {
            self.desktop.dpi
        } else {
            BASE_DPI
        }
    }

    fn window_rect(&self) -> OsResult<Rect> {
        self.check("GetWindowRect")?;
        Ok(self.reported)
    }

    fn frame_bounds(&self) -> OsResult<Rect> {
        self.check("DwmGetWindowAttribute")?;
        if !self.visible || self.placement == Placement::Minimized {
            return Ok(self.reported);
        }
        Ok(self
            .reported
            .shrink(invisible_borders_at(self.border, self.desktop.dpi)))
    }

    fn client_rect(&self) -> OsResult<Rect> {
        self.check("GetClientRect")?;
        if self.placement == Placement::Minimized {
            return Ok(Rect::new(self.reported.x, self.reported.y, 0, 0));
        }
        Ok(self
            .reported
            .shrink(frame_insets_at(self.border, self.desktop.dpi)))
    }

    fn frame_insets(&self, border: BorderStyle, dpi: u32) -> OsResult<Insets> {
        self.check("AdjustWindowRectExForDpi")?;
        Ok(frame_insets_at(border, dpi))
    }

    fn work_area(&self) -> OsResult<Rect> {
        self.check("GetMonitorInfoW")?;
        Ok(self.desktop.work_area)
    }

    fn monitor_rect(&self) -> OsResult<Rect> {
        self.check("GetMonitorInfoW")?;
        Ok(self.desktop.monitor)
    }

    fn set_window_rect(&mut self, rect: Rect) -> OsResult<()> {
        self.check("SetWindowPos")?;
        self.record("set_window_rect");
        self.geometry_calls += 1;
        self.apply_rect(rect, false);
        Ok(())
    }

    fn set_frame(&mut self, border: BorderStyle, rect: Rect) -> OsResult<()> {
        self.check("SetWindowLongPtrW")?;
        self.record("set_frame");
        self.geometry_calls += 1;
        self.border = border;
        // the client area changes with the frame even at the same outer size
        self.apply_rect(rect, true);
        Ok(())
    }

    fn resize_child(&mut self, size: Size) -> OsResult<()> {
        self.check("MoveWindow")?;
        self.child = Some(size);
        Ok(())
    }

    fn show(&mut self, command: ShowCommand) -> OsResult<()> {
        self.check("ShowWindow")?;
        self.record(&format!("show {:?}", command));
        match command {
            ShowCommand::Show => {
                self.visible = true;
                self.set_focus(true);
            }
            ShowCommand::Hide => {
                self.visible = false;
                self.set_focus(false);
            }
            ShowCommand::Maximize => {
                if self.placement == Placement::Maximized && self.visible {
                    return Ok(());
                }
                self.geometry_calls += 1;
                self.placement = Placement::Maximized;
                self.visible = true;
                let target = self
                    .desktop
                    .work_area
                    .expand(invisible_borders_at(self.border, self.desktop.dpi));
                self.apply_rect(target, true);
                self.set_focus(true);
            }
            ShowCommand::Minimize => {
                if self.placement == Placement::Minimized {
                    return Ok(());
                }
                self.geometry_calls += 1;
                self.placement = Placement::Minimized;
                self.visible = true;
                self.apply_rect(Rect::new(-32000, -32000, 160, 28), true);
                self.set_focus(false);
            }
            ShowCommand::Normal => {
                if self.placement == Placement::Normal && self.visible {
                    return Ok(());
                }
                self.geometry_calls += 1;
                self.placement = Placement::Normal;
                self.visible = true;
                self.apply_rect(self.normal_reported, true);
                self.set_focus(true);
            }
        }
        Ok(())
    }

    fn set_size_limits(&mut self, limits: SizeLimits) {
        self.limits = limits;
    }

    fn set_title(&mut self, title: &str) -> OsResult<()> {
        self.check("SetWindowTextW")?;
        self.title = title.to_string();
        Ok(())
    }

    fn set_icon(&mut self, icon: Option<&Icon>) -> OsResult<()> {
        self.check("CreateIcon")?;
        self.icon = icon.cloned();
        Ok(())
    }

    fn clip_cursor(&mut self, rect: Option<Rect>) -> OsResult<()> {
        self.check("ClipCursor")?;
        self.record(if rect.is_some() { "clip_cursor" } else { "release_cursor" });
        self.clip = rect;
        Ok(())
    }

    fn set_cursor(&mut self, cursor: CursorIcon) -> OsResult<()> {
        self.check("LoadCursorW")?;
        self.cursor = cursor;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn focus(&mut self) -> OsResult<()> {
        self.check("SetForegroundWindow")?;
        self.set_focus(true);
        Ok(())
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn device_context(&mut self) -> OsResult<DeviceContext> {
        self.check("GetDC")?;
        self.record("get_dc");
        Ok(DeviceContext(0x1dc))
    }

    fn release_device_context(&mut self, _dc: DeviceContext) {
        self.record("release_dc");
    }

    fn post_close(&mut self) -> OsResult<()> {
        self.check("PostMessageW")?;
        self.events.push_back(OsEvent::CloseRequested);
        Ok(())
    }
}

/// Graphics bootstrap that hands out numbered contexts
pub struct SimulatedGraphics {
    log: CallLog,
    next: isize,
    live: Vec<ContextHandle>,
    current: Option<ContextHandle>,
    fail_create: bool,
}

impl SimulatedGraphics {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            next: 1,
            live: Vec::new(),
            current: None,
            fail_create: false,
        }
    }

    /// Make context creation fail like a missing pixel format
    pub fn fail_create(&mut self) {
        self.fail_create = true;
    }

    pub fn live_contexts(&self) -> &[ContextHandle] {
        &self.live
    }

    pub fn current(&self) -> Option<ContextHandle> {
        self.current
    }

    fn record(&self, call: &str) {
        self.log.borrow_mut().push(call.to_string());
    }
}

impl GraphicsBootstrap for SimulatedGraphics {
    fn create_context(
        &mut self,
        version: GlVersion,
        _dc: DeviceContext,
        share: Option<ContextHandle>,
    ) -> FrameResult<ContextHandle> {
        if !version.is_valid() {
            return Err(FrameError::Graphics(format!(
                "unsupported OpenGL version {}",
                version
            )));
        }
        if self.fail_create {
            return Err(FrameError::Win32 {
                function: "SetPixelFormat",
                code: INJECTED_FAILURE,
            });
        }
        if let Some(share) = share {
            if !self.live.contains(&share) {
                return Err(FrameError::Graphics("share context is not alive".into()));
            }
        }

        let context = ContextHandle(self.next);
        self.next += 1;
        self.live.push(context);
        self.record("create_context");
        Ok(context)
    }

    fn make_current(&mut self, _dc: DeviceContext, context: Option<ContextHandle>) -> FrameResult<()> {
        self.record(if context.is_some() { "make_current" } else { "clear_current" });
        self.current = context;
        Ok(())
    }

    fn delete_context(&mut self, context: ContextHandle) {
        if let Some(pos) = self.live.iter().position(|c| *c == context) {
            self.live.remove(pos);
            if self.current == Some(context) {
                self.current = None;
            }
            self.record("delete_context");
        }
    }

    fn swap_buffers(&mut self, _dc: DeviceContext) -> FrameResult<()> {
        self.record("swap_buffers");
        Ok(())
    }
}
