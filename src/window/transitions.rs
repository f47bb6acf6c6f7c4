//! Window state and border style transitions
//!
//! Every change goes through Normal when the target needs a clean
//! baseline: fullscreen is entered from a restored window and left by
//! putting back the saved border and rect before anything else happens.

use log::debug;

use crate::platform::{Platform, ShowCommand};
use crate::reconcile::reported_from_actual;
use crate::render::GraphicsBootstrap;

use super::manager::Window;
use super::state::{BorderStyle, WindowState};

impl<P: Platform, G: GraphicsBootstrap> Window<P, G> {
    /// Request a window state. Asking for the current state does nothing.
    ///
    /// A hidden window stays hidden: the request is kept and applied when
    /// the window is next shown, and [`Window::state`] reports the state
    /// actually in effect until then.
    pub fn set_state(&mut self, target: WindowState) {
        if !self.alive("set_state") {
            return;
        }
        if !self.visible {
            self.deferred_state = (target != self.frame.state()).then_some(target);
            if self.deferred_state.is_some() {
                debug!("Window hidden, {:?} applies on show", target);
            }
            return;
        }
        self.apply_state(target);
    }

    pub(super) fn apply_state(&mut self, target: WindowState) {
        let current = self.frame.state();
        if target == current {
            return;
        }
        debug!("Window state {:?} -> {:?}", current, target);

        if self.frame.holds_fullscreen() {
            self.leave_fullscreen();
            if target == WindowState::Normal {
                return;
            }
        }

        match target {
            WindowState::Normal => self.show_as(ShowCommand::Normal, WindowState::Normal),
            WindowState::Minimized => self.show_as(ShowCommand::Minimize, WindowState::Minimized),
            WindowState::Maximized => self.show_as(ShowCommand::Maximize, WindowState::Maximized),
            WindowState::Fullscreen => self.enter_fullscreen(),
        }
    }

    /// Change the frame style while keeping the client size.
    ///
    /// A maximized, minimized or fullscreen window is restored for the
    /// change and put back in its state afterwards.
    pub fn set_border(&mut self, border: BorderStyle) {
        if !self.alive("set_border") {
            return;
        }
        let current = self
            .frame
            .saved()
            .map(|saved| saved.border)
            .unwrap_or_else(|| self.frame.border());
        if border == current {
            return;
        }

        let resume = self.frame.state();
        let deferred = self.deferred_state.take();
        if resume != WindowState::Normal {
            debug!("Restoring from {:?} to change border", resume);
            self.restore_normal();
        }

        self.reframe(border);

        if resume != WindowState::Normal {
            let hidden = !self.visible;
            self.apply_state(resume);
            if hidden {
                self.set_visible(false);
            }
        }
        self.deferred_state = deferred;
    }

    /// Bring the window back to Normal for a geometry change. A hidden
    /// window is hidden again afterwards and loses any deferred state.
    pub(super) fn restore_normal(&mut self) {
        self.deferred_state = None;
        if self.frame.state() == WindowState::Normal {
            return;
        }
        let hidden = !self.visible;
        self.apply_state(WindowState::Normal);
        if hidden {
            self.set_visible(false);
        }
    }

    /// Apply `border` around the current client rect
    fn reframe(&mut self, border: BorderStyle) {
        let insets = match self.platform.frame_insets(border, self.dpi) {
            Ok(insets) => insets,
            Err(e) => return self.os_warning(e),
        };
        let reported = self.actual_client.expand(insets);

        debug!("Border {:?} -> {:?}, reported {:?}", self.frame.border(), border, reported);
        if let Err(e) = self.platform.set_frame(border, reported) {
            return self.os_warning(e);
        }
        self.frame.set_border(border);
        self.drain_os_events();
        self.sync_geometry();
    }

    fn show_as(&mut self, command: ShowCommand, state: WindowState) {
        if let Err(e) = self.platform.show(command) {
            return self.os_warning(e);
        }
        self.frame.set_state(state);
        // every one of these show commands also makes the window visible
        self.visible = true;
        self.drain_os_events();
        self.sync_geometry();
    }

    fn enter_fullscreen(&mut self) {
        if self.frame.state() != WindowState::Normal {
            self.show_as(ShowCommand::Normal, WindowState::Normal);
        }

        let target = if self.fullscreen_covers_monitor {
            self.platform.monitor_rect()
        } else {
            self.platform.work_area()
        };
        let target = match target {
            Ok(rect) => rect,
            Err(e) => return self.os_warning(e),
        };

        self.frame.enter_fullscreen(self.reported_position);
        if let Err(e) = self.platform.set_frame(BorderStyle::NoBorder, target) {
            self.frame.leave_fullscreen();
            return self.os_warning(e);
        }
        self.drain_os_events();
        self.sync_geometry();

        // a borderless frame should have no invisible border left
        let reported = reported_from_actual(target, self.invisible);
        if reported != self.reported_position {
            debug!("Correcting fullscreen rect by {:?}", self.invisible);
            self.apply_reported(reported);
        }
    }

    /// Put back the border and reported rect saved on entering fullscreen
    fn leave_fullscreen(&mut self) {
        if self.frame.state() == WindowState::Minimized {
            // restore the borderless frame first; this comes back as Fullscreen
            if let Err(e) = self.platform.show(ShowCommand::Normal) {
                self.os_warning(e);
            }
            self.drain_os_events();
        }

        let Some(saved) = self.frame.leave_fullscreen() else {
            return;
        };
        debug!("Leaving fullscreen, restoring {:?} at {:?}", saved.border, saved.reported);
        if let Err(e) = self.platform.set_frame(saved.border, saved.reported) {
            self.os_warning(e);
        }
        self.drain_os_events();
        self.sync_geometry();
    }
}
