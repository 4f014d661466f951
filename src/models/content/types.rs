use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value, json};

use super::modules::overlay;

/// The fixed set of page sections. Declaration order is the canonical
/// order used to break ties between modules sharing the same `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleKey {
    Hero,
    Invitation,
    Story,
    EventDetails,
    Program,
    DressCode,
    Wishes,
    Gifts,
    Rsvp,
    Gallery,
    Organizer,
    Calendar,
    FinalBlock,
}

impl ModuleKey {
    pub const ALL: [ModuleKey; 13] = [
        ModuleKey::Hero,
        ModuleKey::Invitation,
        ModuleKey::Story,
        ModuleKey::EventDetails,
        ModuleKey::Program,
        ModuleKey::DressCode,
        ModuleKey::Wishes,
        ModuleKey::Gifts,
        ModuleKey::Rsvp,
        ModuleKey::Gallery,
        ModuleKey::Organizer,
        ModuleKey::Calendar,
        ModuleKey::FinalBlock,
    ];

    /// Key as it appears in the `modules` map of the JSON document.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKey::Hero => "hero",
            ModuleKey::Invitation => "invitation",
            ModuleKey::Story => "story",
            ModuleKey::EventDetails => "eventDetails",
            ModuleKey::Program => "program",
            ModuleKey::DressCode => "dressCode",
            ModuleKey::Wishes => "wishes",
            ModuleKey::Gifts => "gifts",
            ModuleKey::Rsvp => "rsvp",
            ModuleKey::Gallery => "gallery",
            ModuleKey::Organizer => "organizer",
            ModuleKey::Calendar => "calendar",
            ModuleKey::FinalBlock => "finalBlock",
        }
    }

    pub fn parse(key: &str) -> Option<ModuleKey> {
        ModuleKey::ALL.iter().copied().find(|k| k.as_str() == key)
    }

    /// Index in [`ModuleKey::ALL`].
    pub fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static NULL: Value = Value::Null;

/// One toggleable section of the page, held exactly as saved.
///
/// Reads are lenient: a missing or non-boolean `enabled` reads as false, a
/// missing or non-numeric `order` as 0. The raw entry is written back
/// untouched, so values of the wrong type survive a load/save cycle. Typed
/// access to `data` goes through [`super::modules::ModuleData::decode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleEntry(Value);

impl ModuleEntry {
    pub fn new(enabled: bool, data: Value, order: i64) -> Self {
        ModuleEntry(json!({ "enabled": enabled, "data": data, "order": order }))
    }

    pub fn from_value(raw: Value) -> Self {
        ModuleEntry(raw)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn enabled(&self) -> bool {
        self.0.get("enabled").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn data(&self) -> &Value {
        self.0.get("data").unwrap_or(&NULL)
    }

    pub fn order(&self) -> Option<&Number> {
        match self.0.get("order") {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Sort position; a missing order counts as 0.
    pub fn order_value(&self) -> f64 {
        self.order().and_then(Number::as_f64).unwrap_or(0.0)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.set("enabled", Value::Bool(enabled));
    }

    pub fn set_data(&mut self, data: Value) {
        self.set("data", data);
    }

    pub fn set_order(&mut self, order: Number) {
        self.set("order", Value::Number(order));
    }

    /// A non-object entry is replaced by an object holding just `field`.
    fn set(&mut self, field: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.0 {
            map.insert(field.to_string(), value);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Music {
    pub enabled: bool,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobilePreviewButton {
    pub enabled: bool,
}

/// A guest's attendance confirmation, as the store writes it. Saved entries
/// are read back through `RsvpResponse::from_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RsvpResponse {
    pub id: String,
    pub name: String,
    pub attending: bool,
    pub guests_count: u32,
    pub comment: String,
    pub selected_drinks: Vec<String>,
    pub wish: String,
    /// RFC 3339, UTC, assigned by the store.
    pub submitted_at: String,
}

impl Default for RsvpResponse {
    fn default() -> Self {
        RsvpResponse {
            id: String::new(),
            name: String::new(),
            attending: false,
            guests_count: 1,
            comment: String::new(),
            selected_drinks: Vec::new(),
            wish: String::new(),
            submitted_at: String::new(),
        }
    }
}

/// `id` of a saved RSVP entry, if it has a string one.
pub fn rsvp_id(raw: &Value) -> Option<&str> {
    raw.get("id").and_then(Value::as_str)
}

/// The whole persisted aggregate.
///
/// Everything below `modules` is kept as saved JSON. Nothing is validated
/// on the way in, and typed reads fall back to defaults field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub modules: BTreeMap<String, ModuleEntry>,
    #[serde(default)]
    pub music: Value,
    #[serde(default)]
    pub mobile_preview_button: Value,
    #[serde(default)]
    pub rsvp_responses: Vec<Value>,
    /// Top-level fields this version does not know about, kept as saved.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentDocument {
    pub fn module(&self, key: ModuleKey) -> Option<&ModuleEntry> {
        self.modules.get(key.as_str())
    }

    pub fn module_mut(&mut self, key: ModuleKey) -> Option<&mut ModuleEntry> {
        self.modules.get_mut(key.as_str())
    }

    /// True when every known module key is present.
    pub fn has_all_modules(&self) -> bool {
        ModuleKey::ALL.iter().all(|k| self.modules.contains_key(k.as_str()))
    }

    /// Enabled, known modules in render order: ascending `order`, ties
    /// broken by the key's position in [`ModuleKey::ALL`]. Unknown keys are
    /// kept in the document but never rendered.
    pub fn ordered_modules(&self) -> Vec<(ModuleKey, &ModuleEntry)> {
        let mut visible: Vec<(ModuleKey, &ModuleEntry)> = self
            .modules
            .iter()
            .filter(|(_, entry)| entry.enabled())
            .filter_map(|(name, entry)| ModuleKey::parse(name).map(|key| (key, entry)))
            .collect();
        visible.sort_by(|(ka, a), (kb, b)| {
            a.order_value()
                .total_cmp(&b.order_value())
                .then(ka.position().cmp(&kb.position()))
        });
        visible
    }

    pub fn music_settings(&self) -> Music {
        overlay(Music::default(), &self.music)
    }

    pub fn preview_button(&self) -> MobilePreviewButton {
        overlay(MobilePreviewButton::default(), &self.mobile_preview_button)
    }

    /// Typed reading of every saved response, in submission order.
    pub fn rsvps(&self) -> Vec<RsvpResponse> {
        self.rsvp_responses.iter().map(RsvpResponse::from_value).collect()
    }

    pub fn find_rsvp(&self, id: &str) -> Option<RsvpResponse> {
        self.rsvp_responses
            .iter()
            .find(|raw| rsvp_id(raw) == Some(id))
            .map(RsvpResponse::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_key_roundtrips_through_str() {
        for key in ModuleKey::ALL {
            assert_eq!(ModuleKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(ModuleKey::parse("footer"), None);
    }

    #[test]
    fn module_key_serde_matches_as_str() {
        let json = serde_json::to_string(&ModuleKey::EventDetails).unwrap();
        assert_eq!(json, "\"eventDetails\"");
        let json = serde_json::to_string(&ModuleKey::FinalBlock).unwrap();
        assert_eq!(json, "\"finalBlock\"");
    }

    #[test]
    fn missing_order_counts_as_zero() {
        let entry: ModuleEntry = serde_json::from_str(r#"{"enabled": true, "data": {}}"#).unwrap();
        assert_eq!(entry.order(), None);
        assert_eq!(entry.order_value(), 0.0);
    }

    #[test]
    fn wrongly_typed_entry_fields_read_as_defaults_and_write_back_unchanged() {
        let raw = json!({"enabled": "yes", "order": "3", "data": {"title": 1}, "note": "x"});
        let entry: ModuleEntry = serde_json::from_value(raw.clone()).unwrap();
        assert!(!entry.enabled());
        assert_eq!(entry.order_value(), 0.0);
        assert_eq!(entry.data(), &json!({"title": 1}));
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn setters_turn_a_non_object_entry_into_an_object() {
        let mut entry = ModuleEntry::from_value(json!("broken"));
        assert_eq!(entry.data(), &Value::Null);
        entry.set_enabled(true);
        assert_eq!(entry.as_value(), &json!({"enabled": true}));
    }

    #[test]
    fn music_and_button_read_leniently() {
        let mut doc = crate::models::content::default_document();
        doc.music = json!({"enabled": "yes", "url": "https://music.example/a.mp3"});
        doc.mobile_preview_button = json!(true);
        assert_eq!(
            doc.music_settings(),
            Music { enabled: false, url: "https://music.example/a.mp3".into() }
        );
        assert!(!doc.preview_button().enabled);
    }

    #[test]
    fn integer_order_is_written_back_as_integer() {
        let entry = ModuleEntry::new(true, Value::Null, 4);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"order\":4"), "{json}");
    }
}
