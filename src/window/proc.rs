//! OS event handlers for the window core
//!
//! The platform backend turns native messages into [`OsEvent`]s; each one
//! lands in a named handler here. Handlers run on the window thread and may
//! issue further OS calls, whose own events are drained in order behind
//! them instead of re-entering the handler that caused them.

use log::{debug, info, trace, warn};

use crate::events::{OsEvent, SizeKind, WindowEvent};
use crate::geometry::Rect;
use crate::platform::Platform;
use crate::reconcile::clamp_client;
use crate::render::GraphicsBootstrap;

use super::manager::Window;
use super::state::WindowState;

impl<P: Platform, G: GraphicsBootstrap> Window<P, G> {
    pub(super) fn handle_os_event(&mut self, event: OsEvent) {
        if !self.open && event != OsEvent::Destroyed {
            trace!("Dropping {:?} for a closed window", event);
            return;
        }

        match event {
            OsEvent::Resized { kind } => self.on_resized(kind),
            OsEvent::Moved => self.on_moved(),
            OsEvent::DpiChanged { dpi, suggested } => self.on_dpi_changed(dpi, suggested),
            OsEvent::EnterSizeMove => {
                trace!("Interactive size/move started");
                self.frame.begin_drag();
            }
            OsEvent::ExitSizeMove => self.on_exit_size_move(),
            OsEvent::Focus(focused) => self.on_focus(focused),
            OsEvent::CloseRequested => self.on_close_requested(),
            OsEvent::Destroyed => self.on_destroyed(),
            OsEvent::Char(c) => self.events.push_back(WindowEvent::CharEntered(c)),
            OsEvent::KeyDown(key) => self.events.push_back(WindowEvent::KeyDown(key)),
            OsEvent::KeyUp(key) => self.events.push_back(WindowEvent::KeyUp(key)),
        }
    }

    fn on_resized(&mut self, kind: SizeKind) {
        if let Some(state) = self.frame.apply_size_kind(kind) {
            debug!("Window state changed by the OS to {:?}", state);
        }
        if kind == SizeKind::Minimized {
            return;
        }

        self.sync_geometry();

        let clamped = clamp_client(self.user_client_size, &self.limits);
        if clamped != self.user_client_size
            && self.frame.state() == WindowState::Normal
            && !self.correcting
        {
            debug!(
                "Confirmed client size {:?} violates limits, correcting to {:?}",
                self.user_client_size, clamped
            );
            self.correcting = true;
            self.resize_client_to(clamped);
            self.correcting = false;
            return;
        }

        if let Err(e) = self.platform.resize_child(self.actual_client.size()) {
            self.os_warning(e);
        }
        self.events.push_back(WindowEvent::Resized {
            width: self.user_client_size.width,
            height: self.user_client_size.height,
        });

        if !self.frame.is_dragging() {
            self.confine_cursor();
        }
    }

    fn on_moved(&mut self) {
        if self.frame.state() == WindowState::Minimized {
            return;
        }

        self.sync_geometry();
        self.events.push_back(WindowEvent::Moved {
            x: self.user_position.x,
            y: self.user_position.y,
        });

        if !self.frame.is_dragging() {
            self.confine_cursor();
        }
    }

    fn on_exit_size_move(&mut self) {
        trace!("Interactive size/move finished");
        self.frame.end_drag();
        self.sync_geometry();
        self.confine_cursor();
    }

    /// The backend has already moved the window to the suggested rect; the
    /// size and move events that follow are read at the new scale
    fn on_dpi_changed(&mut self, dpi: u32, suggested: Rect) {
        debug!("DPI changed {} -> {}, suggested rect {:?}", self.dpi, dpi, suggested);
        self.dpi = dpi;
        self.sync_geometry();
        self.events.push_back(WindowEvent::DpiChanged { scale: self.scale() });
    }

    fn on_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.events.push_back(WindowEvent::FocusChanged(focused));

        // the OS may have dropped the clip while another window was active
        if focused {
            self.confine_cursor();
        }
    }

    /// Destruction waits for the next pump so the application can see
    /// `CloseAttempted` and cancel it
    fn on_close_requested(&mut self) {
        self.events.push_back(WindowEvent::CloseAttempted);
        if self.exit_on_close {
            self.close_pending = true;
        } else {
            debug!("Close request left to the application");
        }
    }

    fn on_destroyed(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.focused = false;
        self.visible = false;

        // reached without exit() when the OS destroys the window itself
        self.release_surface();
        if self.cursor_locked {
            if let Err(e) = self.platform.clip_cursor(None) {
                warn!("Could not release cursor clip: {}", e);
            }
        }

        self.events.push_back(WindowEvent::Closed);
        info!("Window '{}' closed", self.title);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::WindowSettings;
    use crate::events::{DragEdge, WindowEvent};
    use crate::geometry::{Rect, Size};
    use crate::platform::simulated::{SimulatedGraphics, SimulatedPlatform};
    use crate::platform::Platform;
    use crate::window::{Window, WindowState};

    type TestWindow = Window<SimulatedPlatform, SimulatedGraphics>;

    fn open(settings: WindowSettings) -> TestWindow {
        let platform = SimulatedPlatform::new();
        let graphics = SimulatedGraphics::new(platform.log());
        Window::new(platform, graphics, &settings).expect("window")
    }

    fn limited() -> WindowSettings {
        WindowSettings {
            x: 200,
            y: 150,
            width: 400,
            height: 400,
            min_client_size: Size::new(200, 200),
            max_client_size: Size::new(800, 800),
            ..WindowSettings::default()
        }
    }

    fn events(window: &mut TestWindow) -> Vec<WindowEvent> {
        window.drain_events().collect()
    }

    #[test]
    fn dragging_left_edge_keeps_right_edge() {
        let mut window = open(limited());
        let right = window.actual_rect().right();

        // try to shrink the client to 100px wide
        window.platform_mut().drag_edge(DragEdge::Left, 300, 0);
        window.process_events();

        assert_eq!(window.client_size(), Size::new(200, 400));
        assert_eq!(window.actual_rect().right(), right);
    }

    #[test]
    fn dragging_within_limits_passes_through() {
        let mut window = open(limited());
        window.platform_mut().drag_edge(DragEdge::BottomRight, 50, -30);
        window.process_events();
        assert_eq!(window.client_size(), Size::new(450, 370));
    }

    #[test]
    fn dragging_top_left_corner_past_maximum() {
        let mut window = open(limited());
        let before = window.actual_rect();

        window.platform_mut().drag_edge(DragEdge::TopLeft, -600, -600);
        window.process_events();

        assert_eq!(window.client_size(), Size::new(800, 800));
        assert_eq!(window.actual_rect().right(), before.right());
        assert_eq!(window.actual_rect().bottom(), before.bottom());
    }

    #[test]
    fn resize_reports_final_client_size() {
        let mut window = open(limited());
        window.set_client_size(Size::new(300, 250));

        let resized: Vec<_> = events(&mut window)
            .into_iter()
            .filter(|e| matches!(e, WindowEvent::Resized { .. }))
            .collect();
        assert_eq!(resized.last(), Some(&WindowEvent::Resized { width: 300, height: 250 }));
        assert_eq!(window.platform().child_size(), Some(Size::new(300, 250)));
    }

    #[test]
    fn clip_is_reapplied_after_drag_not_during() {
        let mut window = open(limited());
        window.set_cursor_locked(true);
        let log = window.platform().log();
        let clips_before = log.borrow().iter().filter(|c| *c == "clip_cursor").count();

        window.platform_mut().drag_edge(DragEdge::Right, 120, 0);
        window.process_events();

        let clips_after = log.borrow().iter().filter(|c| *c == "clip_cursor").count();
        assert_eq!(clips_after, clips_before + 1);
        assert_eq!(window.platform().clip(), Some(window.actual_rect()));
    }

    #[test]
    fn caption_drag_moves_and_reclips() {
        let mut window = open(limited());
        window.set_cursor_locked(true);
        let before = window.position();

        window.platform_mut().drag_move(40, 25);
        window.process_events();

        assert_eq!(window.position().x, before.x + 40);
        assert_eq!(window.position().y, before.y + 25);
        assert_eq!(window.platform().clip(), Some(window.actual_rect()));
        assert!(events(&mut window).contains(&WindowEvent::Moved {
            x: before.x + 40,
            y: before.y + 25
        }));
    }

    #[test]
    fn focus_regain_reasserts_clip() {
        let mut window = open(limited());
        window.set_cursor_locked(true);

        window.platform_mut().user_focus(false);
        window.process_events();
        assert!(!window.is_focused());
        // simulate the OS dropping the clip while unfocused
        window.platform_mut().clip_cursor(None).unwrap();

        window.platform_mut().user_focus(true);
        window.process_events();
        assert!(window.is_focused());
        assert_eq!(window.platform().clip(), Some(window.actual_rect()));
        assert!(window.is_cursor_locked());

        let focus: Vec<_> = events(&mut window)
            .into_iter()
            .filter(|e| matches!(e, WindowEvent::FocusChanged(_)))
            .collect();
        assert_eq!(focus, vec![WindowEvent::FocusChanged(false), WindowEvent::FocusChanged(true)]);
    }

    #[test]
    fn dpi_change_adopts_suggested_rect() {
        let mut window = open(limited());
        let client = window.client_size();

        window.platform_mut().change_dpi(144);
        let expected = {
            let r = window.reported_rect();
            Rect::new(r.x, r.y, (r.width as f64 * 1.5).round() as i32, (r.height as f64 * 1.5).round() as i32)
        };
        window.process_events();

        assert_eq!(window.dpi(), 144);
        assert_eq!(window.scale(), 1.5);
        assert_eq!(window.reported_rect(), expected);
        assert_eq!(window.client_size(), client);
        assert!(events(&mut window).contains(&WindowEvent::DpiChanged { scale: 1.5 }));
    }

    #[test]
    fn close_with_exit_on_close_destroys_on_next_pump() {
        let mut window = open(limited());
        window.close();
        window.process_events();

        // the application sees the attempt while the window still exists
        assert!(window.is_open());
        assert!(window.is_close_pending());
        assert_eq!(window.poll_event(), Some(WindowEvent::CloseAttempted));

        window.process_events();
        assert!(!window.is_open());
        assert!(window.platform().is_destroyed());
        // destruction takes the focus away before WM_DESTROY arrives
        assert_eq!(
            events(&mut window),
            vec![WindowEvent::FocusChanged(false), WindowEvent::Closed]
        );
    }

    #[test]
    fn cancelled_close_keeps_window_open() {
        let mut window = open(limited());
        window.platform_mut().user_close();
        window.process_events();
        assert_eq!(events(&mut window), vec![WindowEvent::CloseAttempted]);

        window.cancel_close();
        window.process_events();
        window.process_events();

        assert!(window.is_open());
        assert!(!window.is_close_pending());
        assert!(!window.platform().is_destroyed());
        assert!(events(&mut window).is_empty());

        // a later request is honoured again
        window.close();
        window.process_events();
        window.process_events();
        assert!(!window.is_open());
    }

    #[test]
    fn dpi_change_during_caption_drag_keeps_the_drag() {
        let mut window = open(limited());
        let client = window.client_size();
        let before = window.reported_rect();

        window.platform_mut().change_dpi(144);
        window.platform_mut().drag_move(40, 0);
        window.process_events();

        assert_eq!(window.dpi(), 144);
        assert_eq!(window.reported_rect().x, before.x + 40);
        assert_eq!(window.reported_rect().y, before.y);
        assert_eq!(window.client_size(), client);
    }

    #[test]
    fn close_without_exit_on_close_is_swallowed() {
        let mut window = open(WindowSettings {
            exit_on_close: false,
            ..limited()
        });
        window.platform_mut().user_close();
        window.process_events();

        assert!(window.is_open());
        assert_eq!(events(&mut window), vec![WindowEvent::CloseAttempted]);

        window.exit();
        assert!(!window.is_open());
        assert_eq!(
            events(&mut window),
            vec![WindowEvent::FocusChanged(false), WindowEvent::Closed]
        );
    }

    #[test]
    fn os_minimize_and_restore_track_state() {
        let mut window = open(limited());
        let before = window.position();

        window.set_state(WindowState::Minimized);
        assert_eq!(window.state(), WindowState::Minimized);
        // parked coordinates never leak into the cached rects
        assert_eq!(window.position(), before);

        window.set_state(WindowState::Normal);
        assert_eq!(window.position(), before);
    }

    #[test]
    fn keyboard_events_are_forwarded() {
        use crate::events::{KeyCode, OsEvent};

        let mut window = open(limited());
        let key = KeyCode {
            virtual_key: 0x41,
            scan_code: 0x1E,
        };
        window.handle_os_event(OsEvent::KeyDown(key));
        window.handle_os_event(OsEvent::Char('a'));
        window.handle_os_event(OsEvent::KeyUp(key));

        assert_eq!(
            events(&mut window),
            vec![
                WindowEvent::KeyDown(key),
                WindowEvent::CharEntered('a'),
                WindowEvent::KeyUp(key)
            ]
        );
    }
}
