//! Host side of the request channel

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, error, info};

use super::{ChromeClient, ChromeRequest};
use crate::window::{Dialogs, WindowBackend, WindowChrome};

/// Whether the host loop keeps serving after a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct ChromeHost<B, D> {
    chrome: WindowChrome<B>,
    dialogs: D,
}

impl<B: WindowBackend, D: Dialogs> ChromeHost<B, D> {
    pub fn new(chrome: WindowChrome<B>, dialogs: D) -> Self {
        Self { chrome, dialogs }
    }

    #[cfg(test)]
    pub fn chrome(&self) -> &WindowChrome<B> {
        &self.chrome
    }

    pub fn handle(&mut self, request: ChromeRequest, now: Instant) -> Flow {
        match request {
            ChromeRequest::SetAlwaysOnTop(on_top) => self.chrome.set_always_on_top(on_top),
            ChromeRequest::Minimize => self.chrome.minimize(),
            ChromeRequest::Close => self.chrome.close(),
            ChromeRequest::MoveBy { dx, dy } => self.chrome.move_by(dx, dy, now),
            ChromeRequest::ResizeBy { dx, dy } => self.chrome.resize_by(dx, dy, now),
            ChromeRequest::Observed(bounds) => self.chrome.observe(bounds, now),

            ChromeRequest::NotifyOpeningExternal { ack } => {
                self.chrome.notify_opening_external(now);
                // Receiver may have given up; nothing to undo
                ack.send(()).ok();
            }

            ChromeRequest::PickImageFile { reply } => {
                let picked = self.dialogs.pick_image_file();
                reply.send(picked).ok();
            }

            ChromeRequest::PickFolderPath { reply } => {
                let picked = self.dialogs.pick_folder_path();
                reply.send(picked).ok();
            }

            ChromeRequest::Shutdown => {
                info!(bounds = ?self.chrome.bounds(), "Received shutdown request");
                self.chrome.save_bounds();
                return Flow::Stop;
            }
        }
        Flow::Continue
    }

    /// Serve requests until shutdown or until every client is dropped
    ///
    /// Waits no longer than the grace deadline so the always-on-top revert
    /// happens on time even when the UI is idle.
    pub fn run(mut self, rx: Receiver<ChromeRequest>) {
        info!("Window host started");
        loop {
            let received = match self.chrome.grace_deadline() {
                Some(deadline) => {
                    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                        Ok(request) => Some(request),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match rx.recv() {
                    Ok(request) => Some(request),
                    Err(_) => break,
                },
            };

            let now = Instant::now();
            if let Some(request) = received {
                debug!(request = ?request, "Handling window request");
                if self.handle(request, now) == Flow::Stop {
                    return;
                }
            }
            self.chrome.tick(now);
        }

        info!("UI disconnected, saving window bounds");
        self.chrome.save_bounds();
    }
}

/// Start the host thread and hand back the UI's client
pub fn spawn_host<B, D>(chrome: WindowChrome<B>, dialogs: D) -> (ChromeClient, JoinHandle<()>)
where
    B: WindowBackend + Send + 'static,
    D: Dialogs + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = std::thread::spawn(move || {
        let host = ChromeHost::new(chrome, dialogs);
        host.run(rx);
    });
    (ChromeClient::new(tx), handle)
}

/// Join the host thread, logging if it panicked
pub fn join_host(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        error!("Window host thread panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowBounds;
    use crate::constants::timing;
    use crate::window::testing::{Call, RecordingWindow};

    #[derive(Debug, Default)]
    struct FakeDialogs {
        image: Option<String>,
        folder: Option<String>,
    }

    impl Dialogs for FakeDialogs {
        fn pick_image_file(&mut self) -> Option<String> {
            self.image.clone()
        }

        fn pick_folder_path(&mut self) -> Option<String> {
            self.folder.clone()
        }
    }

    fn placed() -> WindowBounds {
        WindowBounds { x: Some(0), y: Some(0), width: 800, height: 600 }
    }

    #[test]
    fn test_handle_dispatches_to_chrome() {
        let dir = tempfile::tempdir().unwrap();
        let window = RecordingWindow::default();
        let chrome = WindowChrome::new(window.clone(), placed(), dir.path().join("b.json"));
        let mut host = ChromeHost::new(chrome, FakeDialogs::default());
        let now = Instant::now();

        assert_eq!(host.handle(ChromeRequest::MoveBy { dx: 5, dy: 6 }, now), Flow::Continue);
        host.handle(ChromeRequest::ResizeBy { dx: -1000, dy: 0 }, now);
        host.handle(ChromeRequest::SetAlwaysOnTop(true), now);
        host.handle(ChromeRequest::Minimize, now);

        assert_eq!(
            window.take(),
            vec![
                Call::Position(5, 6),
                Call::Size(400, 600),
                Call::OnTop(true),
                Call::Minimized(true),
            ]
        );
        assert_eq!(host.handle(ChromeRequest::Shutdown, now), Flow::Stop);
    }

    #[test]
    fn test_opening_notification_acks_after_forcing_on_top() {
        let dir = tempfile::tempdir().unwrap();
        let chrome = WindowChrome::new(RecordingWindow::default(), placed(), dir.path().join("b.json"));
        let mut host = ChromeHost::new(chrome, FakeDialogs::default());
        let (ack, rx) = mpsc::channel();
        let now = Instant::now();

        host.handle(ChromeRequest::NotifyOpeningExternal { ack }, now);
        assert_eq!(rx.try_recv(), Ok(()));
        assert!(host.chrome().is_always_on_top());
        assert_eq!(host.chrome().grace_deadline(), Some(now + timing::OPENING_GRACE_PERIOD));
    }

    #[test]
    fn test_client_round_trips_through_host_thread() {
        let dir = tempfile::tempdir().unwrap();
        let bounds_path = dir.path().join("window-bounds.json");
        let window = RecordingWindow::default();
        let chrome = WindowChrome::new(window.clone(), placed(), bounds_path.clone());
        let dialogs = FakeDialogs {
            image: Some("file:///tmp/a.png".to_string()),
            folder: None,
        };

        let (client, handle) = spawn_host(chrome, dialogs);
        assert!(client.notify_opening_external());
        assert_eq!(client.pick_image_file().as_deref(), Some("file:///tmp/a.png"));
        assert_eq!(client.pick_folder_path(), None);
        client.observed(WindowBounds { x: Some(7), y: Some(8), width: 900, height: 650 });

        drop(client);
        handle.join().unwrap();

        // Disconnect saves the latest bounds
        let saved = WindowBounds::load(&bounds_path);
        assert_eq!(saved, WindowBounds { x: Some(7), y: Some(8), width: 900, height: 650 });
        assert!(window.take().contains(&Call::Focus));
    }

    #[test]
    fn test_shutdown_stops_host() {
        let dir = tempfile::tempdir().unwrap();
        let chrome = WindowChrome::new(RecordingWindow::default(), placed(), dir.path().join("b.json"));
        let (client, handle) = spawn_host(chrome, FakeDialogs::default());
        client.shutdown();
        join_host(handle);
        assert!(!client.notify_opening_external());
    }

    #[test]
    fn test_release_frame_snapshot_keeps_final_resize() {
        let dir = tempfile::tempdir().unwrap();
        let bounds_path = dir.path().join("b.json");
        let start = WindowBounds { x: Some(0), y: Some(0), width: 500, height: 400 };
        let window = RecordingWindow::default();
        let chrome = WindowChrome::new(window.clone(), start, bounds_path.clone());
        let mut host = ChromeHost::new(chrome, FakeDialogs::default());
        let now = Instant::now();

        host.handle(ChromeRequest::ResizeBy { dx: 100, dy: 0 }, now);
        host.handle(ChromeRequest::Observed(start), now);
        host.handle(ChromeRequest::ResizeBy { dx: 3, dy: 0 }, now);

        assert_eq!(host.chrome().bounds().width, 603);
        assert_eq!(WindowBounds::load(&bounds_path).width, 603);
        assert_eq!(window.take(), vec![Call::Size(600, 400), Call::Size(603, 400)]);
    }

    #[test]
    fn test_host_thread_reverts_on_top_after_grace_period() {
        let dir = tempfile::tempdir().unwrap();
        let window = RecordingWindow::default();
        let chrome = WindowChrome::new(window.clone(), placed(), dir.path().join("b.json"));
        let (client, handle) = spawn_host(chrome, FakeDialogs::default());

        assert!(client.notify_opening_external());
        std::thread::sleep(timing::OPENING_GRACE_PERIOD + std::time::Duration::from_millis(300));

        let calls = window.take();
        assert!(calls.contains(&Call::OnTop(true)));
        assert_eq!(calls.last(), Some(&Call::OnTop(false)));

        client.shutdown();
        join_host(handle);
    }
}
