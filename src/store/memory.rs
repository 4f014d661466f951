use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use super::{ContentStore, StoreError};
use crate::models::content::{ContentDocument, default_document, merge_over_defaults};

/// Keeps the serialized document in process memory. Goes through the same
/// JSON encode and merge path as [`super::FileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Value>>,
    read_only: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already saved raw JSON value.
    pub fn with_saved(saved: Value) -> Self {
        MemoryStore {
            saved: Mutex::new(Some(saved)),
            read_only: AtomicBool::new(false),
        }
    }

    /// While read-only, every save fails with [`StoreError::Write`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// The raw value last written, if any.
    pub fn raw(&self) -> Option<Value> {
        self.saved.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ContentStore for MemoryStore {
    fn load(&self) -> ContentDocument {
        match self.raw() {
            Some(saved) => merge_over_defaults(&saved, default_document()),
            None => default_document(),
        }
    }

    fn save(&self, doc: &ContentDocument) -> Result<(), StoreError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                target: "memory".to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        let value = serde_json::to_value(doc)?;
        *self.saved.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
        Ok(())
    }
}
