use std::collections::BTreeMap;

use serde_json::{Map, json};

use super::modules::ModuleData;
use super::types::{ContentDocument, ModuleEntry, ModuleKey};

/// Default render position of each module. The calendar comes after the
/// final block, matching the layout the site launched with.
fn default_order(key: ModuleKey) -> i64 {
    match key {
        ModuleKey::Hero => 1,
        ModuleKey::Invitation => 2,
        ModuleKey::Story => 3,
        ModuleKey::EventDetails => 4,
        ModuleKey::Program => 5,
        ModuleKey::DressCode => 6,
        ModuleKey::Wishes => 7,
        ModuleKey::Gifts => 8,
        ModuleKey::Rsvp => 9,
        ModuleKey::Gallery => 10,
        ModuleKey::Organizer => 11,
        ModuleKey::FinalBlock => 12,
        ModuleKey::Calendar => 13,
    }
}

pub fn default_module(key: ModuleKey) -> ModuleEntry {
    ModuleEntry::new(true, ModuleData::default_for(key).to_value(), default_order(key))
}

/// The built-in document served when nothing has been saved yet.
pub fn default_document() -> ContentDocument {
    let modules: BTreeMap<String, ModuleEntry> = ModuleKey::ALL
        .iter()
        .map(|&key| (key.as_str().to_string(), default_module(key)))
        .collect();

    ContentDocument {
        modules,
        // No bundled track: the player stays hidden until an admin sets a URL
        music: json!({ "enabled": true, "url": "" }),
        mobile_preview_button: json!({ "enabled": true }),
        rsvp_responses: Vec::new(),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_has_every_module() {
        let doc = default_document();
        assert!(doc.has_all_modules());
        assert_eq!(doc.modules.len(), ModuleKey::ALL.len());
        assert!(doc.rsvp_responses.is_empty());
    }

    #[test]
    fn default_music_is_enabled_without_a_track() {
        let music = default_document().music_settings();
        assert!(music.enabled);
        assert!(music.url.is_empty());
        assert!(default_document().preview_button().enabled);
    }

    #[test]
    fn default_orders_are_distinct() {
        let mut orders: Vec<i64> = ModuleKey::ALL.iter().map(|&k| default_order(k)).collect();
        orders.sort();
        orders.dedup();
        assert_eq!(orders.len(), ModuleKey::ALL.len());
    }

    #[test]
    fn default_render_order_puts_calendar_last() {
        let doc = default_document();
        let ordered = doc.ordered_modules();
        assert_eq!(ordered.first().map(|(k, _)| *k), Some(ModuleKey::Hero));
        assert_eq!(ordered.last().map(|(k, _)| *k), Some(ModuleKey::Calendar));
    }
}
