//! Window chrome: geometry, visibility and always-on-top for the borderless window
//!
//! `WindowChrome` holds the authoritative window state on the host side and
//! drives a `WindowBackend`. Every geometry change is written to the bounds file.

mod dialogs;
mod egui_backend;

pub use dialogs::{Dialogs, NativeDialogs};
pub use egui_backend::EguiWindow;

use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::WindowBounds;
use crate::constants::{timing, window};

/// Native window operations the chrome controller needs
pub trait WindowBackend {
    fn set_outer_position(&mut self, x: i32, y: i32);
    fn set_inner_size(&mut self, width: u32, height: u32);
    fn set_always_on_top(&mut self, on_top: bool);
    fn set_minimized(&mut self, minimized: bool);
    fn show(&mut self);
    fn focus(&mut self);
    fn close(&mut self);
}

pub struct WindowChrome<B> {
    /// `None` once the window has been closed
    window: Option<B>,
    bounds: WindowBounds,
    bounds_path: PathBuf,
    /// Always-on-top as last requested by the user
    user_on_top: bool,
    /// Forced always-on-top expires at this instant
    forced_until: Option<Instant>,
    applied_on_top: bool,
    /// Geometry last commanded, until the window system reports it or the settle period ends
    settling: Option<(WindowBounds, Instant)>,
}

impl<B: WindowBackend> WindowChrome<B> {
    pub fn new(window: B, bounds: WindowBounds, bounds_path: PathBuf) -> Self {
        Self {
            window: Some(window),
            bounds,
            bounds_path,
            user_on_top: false,
            forced_until: None,
            applied_on_top: false,
            settling: None,
        }
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    /// Effective always-on-top state last applied to the window
    pub fn is_always_on_top(&self) -> bool {
        self.applied_on_top
    }

    /// When the opening grace period ends, if one is running
    pub fn grace_deadline(&self) -> Option<Instant> {
        self.forced_until
    }

    /// Shift the window by a delta; no-op if closed or position unknown
    pub fn move_by(&mut self, dx: i32, dy: i32, now: Instant) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let Some((x, y)) = self.bounds.position() else {
            debug!("Window position not known yet, ignoring move");
            return;
        };
        let (x, y) = (x + dx, y + dy);
        window.set_outer_position(x, y);
        self.bounds.x = Some(x);
        self.bounds.y = Some(y);
        self.commanded(now);
        self.save_bounds();
    }

    /// Grow or shrink from the top-left corner, never below the minimum size
    pub fn resize_by(&mut self, dx: i32, dy: i32, now: Instant) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let width = (self.bounds.width as i64 + dx as i64).max(window::MIN_WIDTH as i64) as u32;
        let height = (self.bounds.height as i64 + dy as i64).max(window::MIN_HEIGHT as i64) as u32;
        if (width, height) == (self.bounds.width, self.bounds.height) {
            return;
        }
        window.set_inner_size(width, height);
        self.bounds.width = width;
        self.bounds.height = height;
        self.commanded(now);
        self.save_bounds();
    }

    /// Record the user's choice; a running grace period keeps the window on top
    pub fn set_always_on_top(&mut self, on_top: bool) {
        info!(on_top, "Always-on-top requested");
        self.user_on_top = on_top;
        self.apply_on_top(on_top || self.forced_until.is_some());
    }

    pub fn minimize(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.set_minimized(true);
        }
    }

    /// Save bounds and close; later requests become no-ops
    pub fn close(&mut self) {
        let Some(mut window) = self.window.take() else {
            return;
        };
        info!("Closing window");
        self.save_bounds();
        window.close();
    }

    /// Bring the window forward and hold it on top for the grace period
    ///
    /// Everything is applied before returning; only the revert is deferred to `tick`.
    pub fn notify_opening_external(&mut self, now: Instant) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        window.set_minimized(false);
        window.show();
        self.apply_on_top(true);
        if let Some(window) = self.window.as_mut() {
            window.focus();
        }
        self.forced_until = Some(now + timing::OPENING_GRACE_PERIOD);
        debug!("Forced always-on-top while an external target opens");
    }

    /// Revert forced always-on-top once the grace period has elapsed
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.forced_until
            && now >= deadline
        {
            self.forced_until = None;
            debug!(user_on_top = self.user_on_top, "Opening grace period over");
            self.apply_on_top(self.user_on_top);
        }
    }

    /// Take geometry reported by the window system (user moves, first placement)
    ///
    /// While a move or resize we sent is still settling, reports that differ from
    /// it are snapshots taken before the window caught up and are dropped.
    pub fn observe(&mut self, mut bounds: WindowBounds, now: Instant) {
        if self.window.is_none() {
            return;
        }
        bounds.clamp_to_minimum();
        if let Some((expected, until)) = self.settling {
            if bounds == expected {
                self.settling = None;
                return;
            }
            if now < until {
                debug!(?bounds, ?expected, "Ignoring stale window geometry");
                return;
            }
            self.settling = None;
        }
        if bounds != self.bounds {
            self.bounds = bounds;
            self.save_bounds();
        }
    }

    /// Persist bounds without touching the window
    pub fn save_bounds(&self) {
        if let Err(e) = self.bounds.save(&self.bounds_path) {
            error!(error = ?e, "Failed to save window bounds");
        }
    }

    fn commanded(&mut self, now: Instant) {
        self.settling = Some((self.bounds, now + timing::GEOMETRY_SETTLE_PERIOD));
    }

    fn apply_on_top(&mut self, on_top: bool) {
        if let Some(window) = self.window.as_mut() {
            window.set_always_on_top(on_top);
            self.applied_on_top = on_top;
        }
    }
}
