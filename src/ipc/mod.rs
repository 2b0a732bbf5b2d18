//! UI → host request channel
//!
//! The UI owns a `ChromeClient`; a `ChromeHost` on its own thread owns the
//! window chrome and the native dialogs and serves one request at a time.
//! Most requests are fire-and-forget. The pickers and the opening
//! notification are blocking round-trips: a lost reply resolves to `None`/`false`.

use std::sync::mpsc;
use tracing::warn;

mod host;
mod messages;

pub use host::{join_host, spawn_host};
pub use messages::ChromeRequest;

use crate::config::WindowBounds;

/// UI-side handle to the window host
#[derive(Debug, Clone)]
pub struct ChromeClient {
    tx: mpsc::Sender<ChromeRequest>,
}

impl ChromeClient {
    pub fn new(tx: mpsc::Sender<ChromeRequest>) -> Self {
        Self { tx }
    }

    pub fn set_always_on_top(&self, on_top: bool) {
        self.send(ChromeRequest::SetAlwaysOnTop(on_top));
    }

    pub fn minimize(&self) {
        self.send(ChromeRequest::Minimize);
    }

    pub fn close(&self) {
        self.send(ChromeRequest::Close);
    }

    pub fn move_by(&self, dx: i32, dy: i32) {
        self.send(ChromeRequest::MoveBy { dx, dy });
    }

    pub fn resize_by(&self, dx: i32, dy: i32) {
        self.send(ChromeRequest::ResizeBy { dx, dy });
    }

    pub fn observed(&self, bounds: WindowBounds) {
        self.send(ChromeRequest::Observed(bounds));
    }

    pub fn shutdown(&self) {
        self.send(ChromeRequest::Shutdown);
    }

    /// Blocks until the host has forced the window forward
    pub fn notify_opening_external(&self) -> bool {
        let (ack, rx) = mpsc::channel();
        self.send(ChromeRequest::NotifyOpeningExternal { ack });
        rx.recv().is_ok()
    }

    /// Blocks while the picker is open
    pub fn pick_image_file(&self) -> Option<String> {
        let (reply, rx) = mpsc::channel();
        self.send(ChromeRequest::PickImageFile { reply });
        rx.recv().ok().flatten()
    }

    /// Blocks while the picker is open
    pub fn pick_folder_path(&self) -> Option<String> {
        let (reply, rx) = mpsc::channel();
        self.send(ChromeRequest::PickFolderPath { reply });
        rx.recv().ok().flatten()
    }

    fn send(&self, request: ChromeRequest) {
        if let Err(e) = self.tx.send(request) {
            warn!(request = ?e.0, "Window host is gone, dropping request");
        }
    }
}
