//! Persistence for the content document.
//!
//! Reads fail open: anything that goes wrong while loading is logged and the
//! built-in default document is served instead. Writes fail loud: every
//! save-family operation returns a [`StoreError`] the caller must surface.
//!
//! There is no locking around load-modify-save. Two concurrent writers race
//! and the last completed write wins.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::io;

use chrono::Utc;

use crate::models::content::rsvp::next_rsvp_id;
use crate::models::content::{ContentDocument, NewRsvp, RsvpResponse, rsvp_id};

#[derive(Debug)]
pub enum StoreError {
    /// The backing medium refused the write.
    Write { target: String, source: io::Error },
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Write { target, source } => write!(f, "Write error ({target}): {source}"),
            StoreError::Serialize(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Write { source, .. } => Some(source),
            StoreError::Serialize(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialize(e)
    }
}

/// Sole authority for reading and writing the content document.
///
/// Saved values of unexpected shape pass through `load` and `save`
/// untouched, including RSVP entries the RSVP operations did not write.
pub trait ContentStore: Send + Sync {
    /// Current document merged over defaults. Never fails.
    fn load(&self) -> ContentDocument;

    /// Replace the stored document wholesale. `doc` is never modified.
    fn save(&self, doc: &ContentDocument) -> Result<(), StoreError>;

    /// Append a response with a fresh unique id and `submittedAt = now`.
    fn append_rsvp(&self, rsvp: NewRsvp) -> Result<RsvpResponse, StoreError> {
        let mut doc = self.load();
        let now = Utc::now();
        let id = next_rsvp_id(&doc.rsvp_responses, now);
        let stored = rsvp.into_response(id, now);
        doc.rsvp_responses.push(serde_json::to_value(&stored)?);
        self.save(&doc)?;
        log::info!("Stored RSVP response {} ({} total)", stored.id, doc.rsvp_responses.len());
        Ok(stored)
    }

    /// Remove the response with `id`. Returns whether one was removed;
    /// an unknown id is not an error.
    fn delete_rsvp(&self, id: &str) -> Result<bool, StoreError> {
        let mut doc = self.load();
        let before = doc.rsvp_responses.len();
        doc.rsvp_responses.retain(|raw| rsvp_id(raw) != Some(id));
        let removed = doc.rsvp_responses.len() != before;
        self.save(&doc)?;
        if removed {
            log::info!("Deleted RSVP response {id}");
        } else {
            log::debug!("RSVP response {id} not found, nothing deleted");
        }
        Ok(removed)
    }
}
