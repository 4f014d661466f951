use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::Rng;

use super::{ContentStore, StoreError};
use crate::models::content::{ContentDocument, default_document, merge_over_defaults};

pub const STORAGE_FILE: &str = "storage.json";

/// The document as one pretty-printed JSON file, `<data_dir>/storage.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    path: PathBuf,
}

impl FileStore {
    /// Create the store, making the data directory if needed. A directory
    /// that cannot be created is logged; loads then serve defaults and
    /// saves report the failure.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            log::warn!("Could not create data directory {}: {e}", dir.display());
        }
        let path = dir.join(STORAGE_FILE);
        FileStore { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            target: self.path.display().to_string(),
            source,
        }
    }

    /// Sibling temp file, unique per write so concurrent saves never share one.
    fn temp_path(&self) -> PathBuf {
        let suffix: [u8; 8] = rand::rng().random();
        self.dir
            .join(format!(".{STORAGE_FILE}.{}.tmp", hex::encode(suffix)))
    }
}

impl ContentStore for FileStore {
    fn load(&self) -> ContentDocument {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No saved content at {}, serving defaults", self.path.display());
                return default_document();
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}, serving defaults", self.path.display());
                return default_document();
            }
        };

        match serde_json::from_str(&text) {
            Ok(saved) => merge_over_defaults(&saved, default_document()),
            Err(e) => {
                log::warn!("Could not parse {}: {e}, serving defaults", self.path.display());
                default_document()
            }
        }
    }

    fn save(&self, doc: &ContentDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;

        // The directory may have been removed since startup
        if let Err(e) = fs::create_dir_all(&self.dir) {
            log::debug!("Could not create data directory {}: {e}", self.dir.display());
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| self.write_error(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_error(e));
        }

        log::debug!("Saved content to {}", self.path.display());
        Ok(())
    }
}
