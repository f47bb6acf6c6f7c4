//! Window core: construction, the property surface and the lifecycle
//!
//! `Window` owns the outer window, its child drawing surface and the render
//! context created on it. Every rectangle the window knows about lives here
//! and is rewritten only from OS measurements (`sync_geometry`), so the
//! cached user, actual and reported rects never disagree with the desktop.

use std::collections::vec_deque::Drain;
use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::config::WindowSettings;
use crate::error::FrameResult;
use crate::events::WindowEvent;
use crate::geometry::{Insets, Point, Rect, Size};
use crate::platform::{CursorIcon, Icon, OsError, OsResult, Platform, ShowCommand, WindowDesc};
use crate::reconcile::{
    actual_from_reported, clamp_client, invisible_borders, reported_from_actual,
    reported_from_user, scale_for, size_to_logical, size_to_physical, to_physical,
    user_from_actual, SizeLimits,
};
use crate::render::{ContextHandle, GlVersion, GraphicsBootstrap, RenderSurface};

use super::state::{BorderStyle, FrameState, WindowState};

/// A native window with a render context bound to its client area.
///
/// All methods must be called from the thread that created the window.
/// Runtime OS failures are logged and the operation is skipped; only
/// construction returns errors.
pub struct Window<P: Platform, G: GraphicsBootstrap> {
    pub(super) platform: P,
    pub(super) graphics: G,
    pub(super) surface: Option<RenderSurface>,
    pub(super) frame: FrameState,
    pub(super) dpi: u32,

    // logical units
    pub(super) user_position: Rect,
    pub(super) user_client_size: Size,
    // pixels
    pub(super) actual_position: Rect,
    pub(super) actual_client: Rect,
    pub(super) reported_position: Rect,
    pub(super) invisible: Insets,

    pub(super) limits: SizeLimits,
    pub(super) visible: bool,
    pub(super) exit_on_close: bool,
    pub(super) title: String,
    pub(super) icon: Option<Icon>,
    pub(super) cursor: CursorIcon,
    pub(super) cursor_visible: bool,
    pub(super) cursor_locked: bool,
    pub(super) focused: bool,
    pub(super) open: bool,
    pub(super) close_pending: bool,
    /// State requested while hidden, applied by the next show
    pub(super) deferred_state: Option<WindowState>,
    pub(super) disposed: bool,
    pub(super) correcting: bool,
    pub(super) border_fallback: i32,
    pub(super) fullscreen_covers_monitor: bool,
    pub(super) events: VecDeque<WindowEvent>,
}

impl<P: Platform, G: GraphicsBootstrap> Window<P, G> {
    /// Create a window and a render context of `settings.gl_version`
    pub fn new(platform: P, graphics: G, settings: &WindowSettings) -> FrameResult<Self> {
        Self::build(platform, graphics, settings, None)
    }

    /// Like [`Window::new`], with a render context that shares objects
    /// (textures, buffers) with `share`
    pub fn new_shared(
        platform: P,
        graphics: G,
        settings: &WindowSettings,
        share: ContextHandle,
    ) -> FrameResult<Self> {
        Self::build(platform, graphics, settings, Some(share))
    }

    fn build(
        mut platform: P,
        graphics: G,
        settings: &WindowSettings,
        share: Option<ContextHandle>,
    ) -> FrameResult<Self> {
        settings.validate()?;

        let provisional_dpi = platform.dpi();
        let rect = Self::initial_rect(&platform, settings, provisional_dpi)?;
        platform.create_window(&WindowDesc {
            title: settings.title.clone(),
            border: settings.border,
            rect,
        })?;
        // the monitor's DPI is only known once the window exists on it
        let dpi = platform.dpi();

        // from here on Drop tears the native window down if a later step fails
        let mut window = Self {
            platform,
            graphics,
            surface: None,
            frame: FrameState::new(settings.border),
            dpi,
            user_position: Rect::default(),
            user_client_size: Size::ZERO,
            actual_position: rect,
            actual_client: Rect::default(),
            reported_position: rect,
            invisible: Insets::ZERO,
            limits: settings.size_limits(),
            visible: false,
            exit_on_close: settings.exit_on_close,
            title: settings.title.clone(),
            icon: None,
            cursor: CursorIcon::default(),
            cursor_visible: true,
            cursor_locked: false,
            focused: false,
            open: true,
            close_pending: false,
            deferred_state: None,
            disposed: false,
            correcting: false,
            border_fallback: settings.invisible_border_fallback,
            fullscreen_covers_monitor: settings.fullscreen_covers_monitor,
            events: VecDeque::new(),
        };

        window.platform.set_size_limits(window.limits);
        if dpi != provisional_dpi {
            debug!("Window created at {} DPI, resizing for {}", provisional_dpi, dpi);
            match Self::initial_rect(&window.platform, settings, dpi) {
                Ok(rect) => window.apply_reported(rect),
                Err(e) => window.os_warning(e),
            }
        }
        window.sync_geometry();
        if settings.centre {
            window.centre();
        } else {
            let target = window
                .user_position
                .with_origin(Point::new(settings.x, settings.y));
            window.move_to_user_rect(target);
        }

        window.platform.create_child(window.actual_client.size())?;
        let surface = window.create_surface(settings.gl_version, share)?;
        window.surface = Some(surface);

        if let Some(path) = &settings.icon {
            match Icon::from_path(path) {
                Ok(icon) => window.set_icon(Some(icon)),
                Err(e) => warn!("Could not load window icon {:?}: {}", path, e),
            }
        }
        window.set_cursor(settings.cursor);
        window.set_cursor_visible(settings.cursor_visible);

        if settings.visible {
            window.set_visible(true);
        }
        if settings.state != WindowState::Normal {
            window.set_state(settings.state);
        }
        window.set_cursor_locked(settings.cursor_locked_to_window);

        window.drain_os_events();
        window.events.clear();
        window.focused = window.platform.is_focused();

        info!(
            "Window '{}' created at {:?} (client {}x{}, dpi {})",
            window.title,
            window.user_position,
            window.user_client_size.width,
            window.user_client_size.height,
            window.dpi
        );
        Ok(window)
    }

    /// Reported rect whose client area is the requested size at `dpi`
    fn initial_rect(platform: &P, settings: &WindowSettings, dpi: u32) -> OsResult<Rect> {
        let scale = scale_for(dpi);
        let client = size_to_physical(settings.client_size(), scale);
        let insets = platform.frame_insets(settings.border, dpi)?;
        let origin = Point::new(to_physical(settings.x, scale), to_physical(settings.y, scale));
        Ok(Rect::new(0, 0, client.width, client.height)
            .expand(insets)
            .with_origin(origin))
    }

    fn create_surface(
        &mut self,
        version: GlVersion,
        share: Option<ContextHandle>,
    ) -> FrameResult<RenderSurface> {
        let dc = self.platform.device_context()?;
        let context = match self.graphics.create_context(version, dc, share) {
            Ok(context) => context,
            Err(e) => {
                self.platform.release_device_context(dc);
                return Err(e);
            }
        };
        if let Err(e) = self.graphics.make_current(dc, Some(context)) {
            self.graphics.delete_context(context);
            self.platform.release_device_context(dc);
            return Err(e);
        }

        debug!("OpenGL {} context ready", version);
        Ok(RenderSurface { dc, context })
    }

    // ---- property surface ----------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if !self.alive("set_visible") || visible == self.visible {
            return;
        }

        let wanted = self.user_position.origin();
        let command = if visible { ShowCommand::Show } else { ShowCommand::Hide };
        if let Err(e) = self.platform.show(command) {
            self.os_warning(e);
            return;
        }
        self.visible = visible;
        self.drain_os_events();

        if visible {
            // the real invisible border only shows up once the window is on screen
            self.sync_geometry();
            if self.frame.state() == WindowState::Normal && self.user_position.origin() != wanted {
                debug!("Re-placing window after show ({:?} -> {:?})", self.user_position, wanted);
                self.move_to_user_rect(self.user_position.with_origin(wanted));
            }
            if let Some(state) = self.deferred_state.take() {
                self.apply_state(state);
            }
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if !self.alive("set_title") || title == self.title {
            return;
        }
        match self.platform.set_title(&title) {
            Ok(()) => self.title = title,
            Err(e) => self.os_warning(e),
        }
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: Option<Icon>) {
        if !self.alive("set_icon") {
            return;
        }
        match self.platform.set_icon(icon.as_ref()) {
            Ok(()) => self.icon = icon,
            Err(e) => self.os_warning(e),
        }
    }

    /// Frame style currently applied (`NoBorder` while fullscreen)
    pub fn border(&self) -> BorderStyle {
        self.frame.border()
    }

    pub fn state(&self) -> WindowState {
        self.frame.state()
    }

    /// Outer visible frame in logical units
    pub fn position(&self) -> Rect {
        self.user_position
    }

    /// Move and resize the visible frame to `position` (logical units).
    /// A maximized, minimized or fullscreen window is restored first.
    pub fn set_position(&mut self, position: Rect) {
        if !self.alive("set_position") {
            return;
        }
        if position.is_degenerate() {
            warn!("Ignoring empty window position {:?}", position);
            return;
        }
        self.restore_normal();
        if position == self.user_position {
            return;
        }
        self.move_to_user_rect(position);
    }

    pub fn x(&self) -> i32 {
        self.user_position.x
    }

    pub fn y(&self) -> i32 {
        self.user_position.y
    }

    pub fn width(&self) -> i32 {
        self.user_position.width
    }

    pub fn height(&self) -> i32 {
        self.user_position.height
    }

    pub fn set_x(&mut self, x: i32) {
        let p = self.user_position;
        self.set_position(Rect::new(x, p.y, p.width, p.height));
    }

    pub fn set_y(&mut self, y: i32) {
        let p = self.user_position;
        self.set_position(Rect::new(p.x, y, p.width, p.height));
    }

    pub fn set_width(&mut self, width: i32) {
        let p = self.user_position;
        self.set_position(Rect::new(p.x, p.y, width, p.height));
    }

    pub fn set_height(&mut self, height: i32) {
        let p = self.user_position;
        self.set_position(Rect::new(p.x, p.y, p.width, height));
    }

    /// Client area size in logical units
    pub fn client_size(&self) -> Size {
        self.user_client_size
    }

    /// Resize so the client area becomes `size`, clamped into the
    /// min/max limits. The top-left corner of the frame stays put.
    pub fn set_client_size(&mut self, size: Size) {
        if !self.alive("set_client_size") {
            return;
        }
        if size.width <= 0 || size.height <= 0 {
            warn!("Ignoring non-positive client size {:?}", size);
            return;
        }
        self.restore_normal();

        let size = clamp_client(size, &self.limits);
        if size == self.user_client_size {
            return;
        }
        self.resize_client_to(size);
    }

    pub fn min_client_size(&self) -> Size {
        self.limits.min
    }

    pub fn max_client_size(&self) -> Size {
        self.limits.max
    }

    pub fn set_min_client_size(&mut self, min: Size) {
        self.set_size_limits(SizeLimits::new(min, self.limits.max));
    }

    pub fn set_max_client_size(&mut self, max: Size) {
        self.set_size_limits(SizeLimits::new(self.limits.min, max));
    }

    fn set_size_limits(&mut self, limits: SizeLimits) {
        if !self.alive("set_size_limits") || limits == self.limits {
            return;
        }
        if !limits.is_consistent() {
            warn!("Ignoring inconsistent client size limits {:?}", limits);
            return;
        }

        self.limits = limits;
        self.platform.set_size_limits(limits);

        let clamped = clamp_client(self.user_client_size, &limits);
        if self.frame.state() == WindowState::Normal && clamped != self.user_client_size {
            debug!("Client size {:?} outside new limits, resizing to {:?}", self.user_client_size, clamped);
            self.resize_client_to(clamped);
        }
    }

    /// Whether the window has keyboard focus, as last reported by the OS
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorIcon) {
        if !self.alive("set_cursor") || cursor == self.cursor {
            return;
        }
        match self.platform.set_cursor(cursor) {
            Ok(()) => self.cursor = cursor,
            Err(e) => self.os_warning(e),
        }
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        if !self.alive("set_cursor_visible") || visible == self.cursor_visible {
            return;
        }
        self.platform.set_cursor_visible(visible);
        self.cursor_visible = visible;
    }

    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Confine the cursor to the visible frame, or release it
    pub fn set_cursor_locked(&mut self, locked: bool) {
        if !self.alive("set_cursor_locked") || locked == self.cursor_locked {
            return;
        }
        self.cursor_locked = locked;
        if locked {
            self.confine_cursor();
        } else if let Err(e) = self.platform.clip_cursor(None) {
            self.os_warning(e);
        }
    }

    /// Scale factor of the hosting monitor (1.0 at 96 DPI)
    pub fn scale(&self) -> f64 {
        scale_for(self.dpi)
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn exit_on_close(&self) -> bool {
        self.exit_on_close
    }

    pub fn set_exit_on_close(&mut self, exit_on_close: bool) {
        self.exit_on_close = exit_on_close;
    }

    /// Visible frame in pixels
    pub fn actual_rect(&self) -> Rect {
        self.actual_position
    }

    /// Client area in screen pixels
    pub fn client_rect(&self) -> Rect {
        self.actual_client
    }

    /// What `GetWindowRect` returns, invisible borders included
    pub fn reported_rect(&self) -> Rect {
        self.reported_position
    }

    pub fn invisible_borders(&self) -> Insets {
        self.invisible
    }

    pub fn render_surface(&self) -> Option<RenderSurface> {
        self.surface
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    // ---- methods ---------------------------------------------------------

    /// Ask the window to close. The request arrives as
    /// [`WindowEvent::CloseAttempted`] on the next [`Window::process_events`].
    pub fn close(&mut self) {
        if !self.alive("close") {
            return;
        }
        if let Err(e) = self.platform.post_close() {
            self.os_warning(e);
        }
    }

    /// Keep the window open after a [`WindowEvent::CloseAttempted`]
    pub fn cancel_close(&mut self) {
        if self.close_pending {
            debug!("Close of window '{}' cancelled", self.title);
            self.close_pending = false;
        }
    }

    /// Whether a close request will destroy the window on the next
    /// [`Window::process_events`]
    pub fn is_close_pending(&self) -> bool {
        self.close_pending
    }

    /// Destroy the window now, without asking
    pub fn exit(&mut self) {
        if !self.open {
            return;
        }
        self.close_pending = false;
        info!("Destroying window '{}'", self.title);

        if self.cursor_locked {
            if let Err(e) = self.platform.clip_cursor(None) {
                self.os_warning(e);
            }
        }
        self.release_surface();
        if let Err(e) = self.platform.destroy_window() {
            self.os_warning(e);
            return;
        }
        self.drain_os_events();
    }

    /// Translate pending OS messages into [`WindowEvent`]s; never blocks.
    /// A close left uncancelled since the last call destroys the window first.
    pub fn process_events(&mut self) {
        if !self.open {
            return;
        }
        if self.close_pending {
            self.exit();
            return;
        }
        self.platform.pump();
        self.drain_os_events();
    }

    pub fn poll_event(&mut self) -> Option<WindowEvent> {
        self.events.pop_front()
    }

    pub fn drain_events(&mut self) -> Drain<'_, WindowEvent> {
        self.events.drain(..)
    }

    pub fn swap_buffers(&mut self) {
        let Some(surface) = self.surface else {
            warn!("swap_buffers ignored: window has no render surface");
            return;
        };
        if let Err(e) = self.graphics.swap_buffers(surface.dc) {
            warn!("SwapBuffers failed: {}", e);
        }
    }

    /// Centre the visible frame on the work area of the hosting monitor
    pub fn centre(&mut self) {
        if !self.alive("centre") {
            return;
        }
        if self.frame.state() != WindowState::Normal {
            debug!("centre ignored in state {:?}", self.frame.state());
            return;
        }

        let work_area = match self.platform.work_area() {
            Ok(rect) => rect,
            Err(e) => return self.os_warning(e),
        };
        let actual = work_area.centre(self.actual_position.size());
        self.apply_reported(reported_from_actual(actual, self.invisible));
    }

    pub fn make_focused(&mut self) {
        if !self.alive("make_focused") {
            return;
        }
        if let Err(e) = self.platform.focus() {
            self.os_warning(e);
        }
        self.drain_os_events();
    }

    /// Release the render context and destroy the window. Safe to call
    /// any number of times; `Drop` calls it too.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        if self.open {
            self.exit();
        }
        self.release_surface();
        debug!("Window '{}' disposed", self.title);
    }

    // ---- internals shared with proc.rs and transitions.rs ----------------

    /// False (with a warning) once the window is gone
    pub(super) fn alive(&self, operation: &str) -> bool {
        if !self.open {
            warn!("{} ignored: window '{}' is closed", operation, self.title);
        }
        self.open
    }

    pub(super) fn os_warning(&self, error: OsError) {
        warn!("{} (code {:#x}); operation skipped", error, error.code);
    }

    pub(super) fn drain_os_events(&mut self) {
        while let Some(event) = self.platform.next_event() {
            self.handle_os_event(event);
        }
    }

    /// Re-derive every cached rectangle from the OS
    pub(super) fn sync_geometry(&mut self) {
        if self.frame.state() == WindowState::Minimized {
            return;
        }

        let reported = match self.platform.window_rect() {
            Ok(rect) => rect,
            Err(e) => return self.os_warning(e),
        };
        let client = match self.platform.client_rect() {
            Ok(rect) => rect,
            Err(e) => return self.os_warning(e),
        };
        // an iconic window has an empty client area and parked coordinates
        if client.size().is_zero() {
            return;
        }
        let actual = match self.platform.frame_bounds() {
            Ok(rect) => rect,
            Err(e) => {
                self.os_warning(e);
                reported
            }
        };

        let mut invisible = invisible_borders(actual, reported);
        if invisible.is_zero() && !self.visible {
            invisible = self.fallback_borders();
        }

        let scale = self.scale();
        self.reported_position = reported;
        self.invisible = invisible;
        self.actual_position = actual_from_reported(reported, invisible);
        self.actual_client = client;
        self.user_position = user_from_actual(self.actual_position, scale);
        self.user_client_size = size_to_logical(client.size(), scale);
    }

    /// Invisible border assumed for a hidden window, which reports none
    fn fallback_borders(&self) -> Insets {
        if self.border_fallback == 0 || self.frame.border() == BorderStyle::NoBorder {
            return Insets::ZERO;
        }
        let edge = to_physical(self.border_fallback, self.scale());
        Insets::new(edge, 0, edge, edge)
    }

    /// Place the visible frame on `user` through the reconciler
    pub(super) fn move_to_user_rect(&mut self, user: Rect) {
        let reported = reported_from_user(user, self.scale(), self.invisible);
        self.apply_reported(reported);
    }

    pub(super) fn apply_reported(&mut self, reported: Rect) {
        if reported == self.reported_position {
            return;
        }
        if let Err(e) = self.platform.set_window_rect(reported) {
            return self.os_warning(e);
        }
        self.drain_os_events();
    }

    /// Resize the frame so the client area becomes `size` (logical units)
    pub(super) fn resize_client_to(&mut self, size: Size) {
        let client = size_to_physical(size, self.scale());
        let non_client = Size::new(
            self.actual_position.width - self.actual_client.width,
            self.actual_position.height - self.actual_client.height,
        );
        let actual = self.actual_position.with_size(Size::new(
            client.width + non_client.width,
            client.height + non_client.height,
        ));
        self.apply_reported(reported_from_actual(actual, self.invisible));
    }

    /// Clip the cursor to the visible frame if the lock is on
    pub(super) fn confine_cursor(&mut self) {
        if !self.cursor_locked || !self.open {
            return;
        }
        if let Err(e) = self.platform.clip_cursor(Some(self.actual_position)) {
            self.os_warning(e);
        }
    }

    /// Unbind and delete the render context, then give the DC back
    pub(super) fn release_surface(&mut self) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        if let Err(e) = self.graphics.make_current(surface.dc, None) {
            warn!("Could not unbind render context: {}", e);
        }
        self.graphics.delete_context(surface.context);
        self.platform.release_device_context(surface.dc);
        debug!("Render surface released");
    }
}

impl<P: Platform, G: GraphicsBootstrap> Drop for Window<P, G> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::platform::simulated::{CallLog, SimulatedGraphics, SimulatedPlatform};

    type TestWindow = Window<SimulatedPlatform, SimulatedGraphics>;

    fn open(settings: &WindowSettings) -> (TestWindow, CallLog) {
        let platform = SimulatedPlatform::new();
        let log = platform.log();
        let graphics = SimulatedGraphics::new(log.clone());
        let window = Window::new(platform, graphics, settings).expect("window");
        (window, log)
    }

    fn calls(log: &CallLog, name: &str) -> usize {
        log.borrow().iter().filter(|c| c.as_str() == name).count()
    }

    fn position_of(log: &CallLog, name: &str) -> usize {
        log.borrow()
            .iter()
            .position(|c| c.as_str() == name)
            .unwrap_or_else(|| panic!("{} never called", name))
    }

    fn square(width: i32, height: i32) -> WindowSettings {
        WindowSettings {
            x: 100,
            y: 100,
            width,
            height,
            ..WindowSettings::default()
        }
    }

    #[test]
    fn construction_places_visible_frame_at_requested_origin() {
        let (window, _) = open(&square(400, 300));
        assert!(window.is_open());
        assert!(window.is_visible());
        assert_eq!(window.client_size(), Size::new(400, 300));
        assert_eq!(window.position().origin(), Point::new(100, 100));
        assert_eq!(window.invisible_borders(), Insets::new(7, 0, 7, 7));
        assert_eq!(
            window.reported_rect(),
            window.actual_rect().expand(window.invisible_borders())
        );
        assert_eq!(window.platform().child_size(), Some(Size::new(400, 300)));
        assert!(window.render_surface().is_some());
    }

    #[test]
    fn construction_uses_the_monitor_dpi() {
        use crate::platform::simulated::Desktop;

        let platform = SimulatedPlatform::with_desktop(Desktop {
            dpi: 144,
            ..Desktop::default()
        });
        let graphics = SimulatedGraphics::new(platform.log());
        let window = Window::new(platform, graphics, &square(400, 300)).unwrap();

        assert_eq!(window.dpi(), 144);
        assert_eq!(window.client_size(), Size::new(400, 300));
        assert_eq!(window.client_rect().size(), Size::new(600, 450));
        assert_eq!(window.platform().child_size(), Some(Size::new(600, 450)));
        assert_eq!(window.position().origin(), Point::new(100, 100));
        assert_eq!(window.invisible_borders(), Insets::new(11, 0, 11, 11));
    }

    #[test]
    fn focus_follows_the_platform_after_construction() {
        let (window, _) = open(&square(400, 300));
        assert!(window.is_focused());

        let hidden = WindowSettings {
            visible: false,
            ..square(400, 300)
        };
        let (window, _) = open(&hidden);
        assert!(!window.is_focused());
    }

    #[test]
    fn hidden_window_applies_requested_state_when_shown() {
        let settings = WindowSettings {
            visible: false,
            state: WindowState::Maximized,
            ..square(400, 300)
        };
        let (mut window, _) = open(&settings);
        assert!(!window.is_visible());
        assert!(!window.platform().is_visible());
        assert_eq!(window.state(), WindowState::Normal);

        window.set_visible(true);
        assert_eq!(window.state(), WindowState::Maximized);
        assert_eq!(window.actual_rect(), window.platform().desktop().work_area);
    }

    #[test]
    fn construction_events_are_not_delivered() {
        let (mut window, _) = open(&square(400, 300));
        assert!(window.poll_event().is_none());
    }

    #[test]
    fn hidden_window_uses_border_fallback() {
        let settings = WindowSettings {
            visible: false,
            ..square(400, 300)
        };
        let (mut window, _) = open(&settings);
        assert!(!window.platform().is_visible());
        assert_eq!(window.invisible_borders(), Insets::new(7, 0, 7, 7));
        let before = window.position();

        window.set_visible(true);
        assert_eq!(window.position(), before);
    }

    #[test]
    fn disabled_fallback_is_corrected_on_show() {
        let settings = WindowSettings {
            visible: false,
            invisible_border_fallback: 0,
            ..square(400, 300)
        };
        let (mut window, _) = open(&settings);
        assert_eq!(window.invisible_borders(), Insets::ZERO);

        window.set_visible(true);
        assert_eq!(window.invisible_borders(), Insets::new(7, 0, 7, 7));
        assert_eq!(window.position().origin(), Point::new(100, 100));
    }

    #[test]
    fn client_size_is_clamped_to_minimum() {
        let settings = WindowSettings {
            min_client_size: Size::new(200, 200),
            max_client_size: Size::new(800, 800),
            ..square(400, 400)
        };
        let (mut window, _) = open(&settings);

        window.set_client_size(Size::new(100, 100));
        assert_eq!(window.client_size(), Size::new(200, 200));

        window.set_client_size(Size::new(5000, 300));
        assert_eq!(window.client_size(), Size::new(800, 300));
    }

    #[test]
    fn centre_lands_on_work_area_centre() {
        let settings = WindowSettings {
            centre: true,
            ..square(400, 400)
        };
        let (window, _) = open(&settings);
        let work_area = window.platform().desktop().work_area;
        let p = window.position();

        assert!((p.center_x() - work_area.center_x()).abs() <= 1);
        assert!((p.center_y() - work_area.center_y()).abs() <= 1);
    }

    #[test]
    fn centre_on_full_height_desktop() {
        use crate::platform::simulated::Desktop;

        let desktop = Desktop {
            work_area: Rect::new(0, 0, 1920, 1080),
            ..Desktop::default()
        };
        let platform = SimulatedPlatform::with_desktop(desktop);
        let graphics = SimulatedGraphics::new(platform.log());
        let settings = WindowSettings {
            centre: true,
            ..square(400, 400)
        };
        let window = Window::new(platform, graphics, &settings).unwrap();

        assert_eq!(window.position().center_x(), 960);
        assert_eq!(window.position().center_y(), 540);
    }

    #[test]
    fn setting_same_position_makes_no_os_calls() {
        let (mut window, _) = open(&square(400, 300));
        let target = Rect::new(250, 180, 500, 400);

        window.set_position(target);
        assert_eq!(window.position(), target);
        let after_first = window.platform().geometry_calls();

        window.set_position(window.position());
        window.set_position(window.position());
        assert_eq!(window.platform().geometry_calls(), after_first);
        assert_eq!(window.position(), target);
    }

    #[test]
    fn derived_setters_only_touch_one_axis() {
        let (mut window, _) = open(&square(400, 300));
        let before = window.position();

        window.set_x(300);
        window.set_height(500);
        assert_eq!(window.position(), Rect::new(300, before.y, before.width, 500));
    }

    #[test]
    fn raised_minimum_grows_the_window() {
        let (mut window, _) = open(&square(300, 300));
        window.set_min_client_size(Size::new(350, 0));
        assert_eq!(window.client_size(), Size::new(350, 300));
        assert_eq!(window.platform().size_limits().min, Size::new(350, 0));
    }

    #[test]
    fn inconsistent_limits_are_ignored() {
        let settings = WindowSettings {
            max_client_size: Size::new(600, 600),
            ..square(300, 300)
        };
        let (mut window, _) = open(&settings);
        window.set_min_client_size(Size::new(700, 0));
        assert_eq!(window.min_client_size(), Size::ZERO);
    }

    #[test]
    fn cursor_lock_follows_actual_rect() {
        let (mut window, _) = open(&square(400, 300));
        window.set_cursor_locked(true);
        assert_eq!(window.platform().clip(), Some(window.actual_rect()));

        window.set_client_size(Size::new(640, 480));
        assert_eq!(window.platform().clip(), Some(window.actual_rect()));

        window.set_cursor_locked(false);
        assert_eq!(window.platform().clip(), None);
    }

    #[test]
    fn redundant_cursor_lock_is_a_no_op() {
        let (mut window, log) = open(&square(400, 300));
        window.set_cursor_locked(true);
        window.set_cursor_locked(true);
        assert_eq!(calls(&log, "clip_cursor"), 1);
        window.set_cursor_locked(false);
        window.set_cursor_locked(false);
        assert_eq!(calls(&log, "release_cursor"), 1);
    }

    #[test]
    fn failed_title_keeps_old_title() {
        let (mut window, _) = open(&square(400, 300));
        window.platform_mut().fail("SetWindowTextW");
        window.set_title("Renamed");
        assert_eq!(window.title(), "Haigh Window");
        assert!(window.is_open());

        let mut working = open(&square(400, 300)).0;
        working.set_title("Renamed");
        assert_eq!(working.title(), "Renamed");
        assert_eq!(working.platform().title(), "Renamed");
    }

    #[test]
    fn cursor_settings_reach_the_platform() {
        let settings = WindowSettings {
            cursor: CursorIcon::Crosshair,
            cursor_visible: false,
            ..square(400, 300)
        };
        let (window, _) = open(&settings);
        assert_eq!(window.platform().cursor(), CursorIcon::Crosshair);
        assert!(!window.platform().cursor_visible());
        assert!(!window.is_cursor_visible());
    }

    #[test]
    fn invalid_settings_fail_before_any_window_exists() {
        let platform = SimulatedPlatform::new();
        let log = platform.log();
        let graphics = SimulatedGraphics::new(log.clone());
        let settings = WindowSettings {
            min_client_size: Size::new(500, 500),
            ..square(400, 400)
        };

        let result = Window::new(platform, graphics, &settings);
        assert!(matches!(result, Err(FrameError::InvalidSettings(_))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn graphics_failure_tears_the_window_down() {
        let platform = SimulatedPlatform::new();
        let log = platform.log();
        let mut graphics = SimulatedGraphics::new(log.clone());
        graphics.fail_create();

        let result = Window::new(platform, graphics, &square(400, 300));
        assert!(matches!(
            result,
            Err(FrameError::Win32 { function: "SetPixelFormat", .. })
        ));
        assert_eq!(calls(&log, "release_dc"), 1);
        assert_eq!(calls(&log, "destroy_window"), 1);
    }

    #[test]
    fn window_creation_failure_carries_os_code() {
        let mut platform = SimulatedPlatform::new();
        platform.fail("CreateWindowExW");
        let graphics = SimulatedGraphics::new(platform.log());

        match Window::new(platform, graphics, &square(400, 300)) {
            Err(FrameError::Win32 { function, code }) => {
                assert_eq!(function, "CreateWindowExW");
                assert_eq!(code, 0x1F);
            }
            other => panic!("expected a Win32 error, got {:?}", other.err()),
        }
    }

    #[test]
    fn shared_context_needs_a_live_context() {
        let platform = SimulatedPlatform::new();
        let graphics = SimulatedGraphics::new(platform.log());
        let result = Window::new_shared(platform, graphics, &square(400, 300), ContextHandle(99));
        assert!(matches!(result, Err(FrameError::Graphics(_))));
    }

    #[test]
    fn dispose_twice_releases_once_in_order() {
        let (mut window, log) = open(&square(400, 300));
        window.dispose();
        window.dispose();
        assert!(!window.is_open());
        assert!(window.graphics().live_contexts().is_empty());

        assert_eq!(calls(&log, "delete_context"), 1);
        assert_eq!(calls(&log, "release_dc"), 1);
        assert_eq!(calls(&log, "destroy_window"), 1);
        assert!(position_of(&log, "delete_context") < position_of(&log, "release_dc"));
        assert!(position_of(&log, "release_dc") < position_of(&log, "destroy_window"));

        drop(window);
        assert_eq!(calls(&log, "destroy_window"), 1);
    }

    #[test]
    fn calls_after_exit_are_ignored() {
        let (mut window, log) = open(&square(400, 300));
        window.exit();
        let recorded = log.borrow().len();

        window.set_position(Rect::new(0, 0, 300, 300));
        window.set_title("gone");
        window.set_state(WindowState::Maximized);
        window.set_cursor_locked(true);
        window.close();
        window.swap_buffers();
        window.process_events();

        assert_eq!(log.borrow().len(), recorded);
        assert_eq!(window.title(), "Haigh Window");
    }

    #[test]
    fn swap_buffers_goes_to_graphics() {
        let (mut window, log) = open(&square(400, 300));
        window.swap_buffers();
        assert_eq!(calls(&log, "swap_buffers"), 1);
    }
}
