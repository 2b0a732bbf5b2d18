//! Configuration records and on-disk locations
//!
//! - **settings**: display preferences stored in the key-value store
//! - **bounds**: window geometry stored in its own file

pub mod bounds;
pub mod settings;

pub use bounds::WindowBounds;
pub use settings::Settings;

use std::path::{Path, PathBuf};

use crate::constants::config::{APP_DIR, BOUNDS_FILENAME, STORE_FILENAME};

/// Resolved locations of every persisted file
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    /// Use `override_dir` if given, otherwise the platform config dir
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        let root = override_dir.unwrap_or_else(|| {
            let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(APP_DIR);
            path
        });
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_file(&self) -> PathBuf {
        self.root.join(STORE_FILENAME)
    }

    pub fn bounds_file(&self) -> PathBuf {
        self.root.join(BOUNDS_FILENAME)
    }
}
