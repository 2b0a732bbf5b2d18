//! Hand card targets to the OS default handler

use anyhow::{Context, Result};
use tracing::info;

use crate::types::Mode;

/// Open a URL in the default browser or a folder in the file manager
pub fn open_target(mode: Mode, target: &str) -> Result<()> {
    info!(mode = %mode, target = %target, "Opening external target");
    open::that_detached(target).context(format!("Failed to open {mode} target '{target}'"))
}
