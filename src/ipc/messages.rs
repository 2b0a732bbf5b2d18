//! Request types for UI → host communication

use std::sync::mpsc::Sender;

use crate::config::WindowBounds;

/// Requests sent from the UI to the window host
///
/// Variants carrying a `Sender` are round-trips; the UI blocks on the reply.
#[derive(Debug)]
pub enum ChromeRequest {
    /// User toggled always-on-top
    SetAlwaysOnTop(bool),

    Minimize,

    /// Close the window (bounds are saved first)
    Close,

    /// Title-bar drag
    MoveBy { dx: i32, dy: i32 },

    /// Resize-handle drag, already coalesced
    ResizeBy { dx: i32, dy: i32 },

    /// An external target is about to open; acked once the window is forced forward
    NotifyOpeningExternal { ack: Sender<()> },

    /// Replies with a `file://` URL or `None` if cancelled
    PickImageFile { reply: Sender<Option<String>> },

    /// Replies with an absolute path or `None` if cancelled
    PickFolderPath { reply: Sender<Option<String>> },

    /// Geometry as reported by the window system
    Observed(WindowBounds),

    /// UI is exiting; save bounds and stop
    Shutdown,
}
