use serde::Serialize;
use serde_json::Value;

use super::modules::ModuleData;
use super::types::{ContentDocument, MobilePreviewButton, ModuleKey, Music};

/// One module as the public page renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedModule {
    pub key: ModuleKey,
    pub order: f64,
    /// Typed data with defaults filled in for missing or invalid fields.
    pub data: Value,
}

/// What the public page needs: ordered, enabled modules plus the page-wide
/// toggles. RSVP responses are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub modules: Vec<RenderedModule>,
    pub music: Music,
    pub mobile_preview_button: MobilePreviewButton,
}

impl PageView {
    pub fn from_document(doc: &ContentDocument) -> Self {
        let modules = doc
            .ordered_modules()
            .into_iter()
            .map(|(key, entry)| RenderedModule {
                key,
                order: entry.order_value(),
                data: ModuleData::decode(key, entry.data()).to_value(),
            })
            .collect();

        PageView {
            modules,
            music: doc.music_settings(),
            mobile_preview_button: doc.preview_button(),
        }
    }
}
