//! Native file and folder pickers

use std::path::Path;
use tracing::debug;

use crate::constants::cards::IMAGE_EXTENSIONS;

/// Blocking pickers; `None` means cancelled
pub trait Dialogs {
    /// Chosen image as a `file://` URL
    fn pick_image_file(&mut self) -> Option<String>;

    /// Chosen directory as an absolute path
    fn pick_folder_path(&mut self) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_image_file(&mut self) -> Option<String> {
        let path = rfd::FileDialog::new()
            .set_title("Choose image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file();
        debug!(picked = ?path, "Image picker closed");
        path.map(|p| file_url(&p))
    }

    fn pick_folder_path(&mut self) -> Option<String> {
        let path = rfd::FileDialog::new().set_title("Choose folder").pick_folder();
        debug!(picked = ?path, "Folder picker closed");
        path.map(|p| p.to_string_lossy().into_owned())
    }
}

/// `file://` URL with forward slashes regardless of platform
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.to_string_lossy().replace('\\', "/"))
}
