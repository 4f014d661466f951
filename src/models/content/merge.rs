use serde_json::Value;

use super::types::{ContentDocument, ModuleEntry};

/// Top-level fields with dedicated merge rules.
const KNOWN_FIELDS: [&str; 4] = ["modules", "music", "mobilePreviewButton", "rsvpResponses"];

/// Layer a saved (possibly partial, possibly older) document over `defaults`.
///
/// - `modules`: merged key by key. A saved entry replaces the default entry
///   for its key as-is, defaults fill in absent keys, unknown keys are kept.
/// - `mobilePreviewButton`: merged field by field.
/// - `music`, `rsvpResponses`: taken as saved when present.
/// - other top-level fields are kept as saved.
///
/// Saved values are never validated or reshaped here, so a later save
/// writes them back unchanged. Only a `modules` that is not an object or an
/// `rsvpResponses` that is not an array is replaced by its default.
/// A saved value that is not a JSON object yields `defaults` unchanged.
pub fn merge_over_defaults(saved: &Value, defaults: ContentDocument) -> ContentDocument {
    let Value::Object(saved) = saved else {
        log::warn!("Saved content is not a JSON object, using defaults");
        return defaults;
    };
    let mut doc = defaults;

    match saved.get("modules") {
        Some(Value::Object(modules)) => {
            for (name, raw) in modules {
                if !raw.is_object() {
                    log::warn!("Saved module '{name}' is not an object, keeping it as saved");
                }
                doc.modules.insert(name.clone(), ModuleEntry::from_value(raw.clone()));
            }
        }
        Some(other) => log::warn!("Saved 'modules' is not an object ({other}), using defaults"),
        None => {}
    }

    if let Some(raw) = saved.get("music") {
        doc.music = raw.clone();
    }

    if let Some(raw) = saved.get("mobilePreviewButton") {
        doc.mobile_preview_button = merge_fields(&doc.mobile_preview_button, raw);
    }

    match saved.get("rsvpResponses") {
        Some(Value::Array(items)) => doc.rsvp_responses = items.clone(),
        Some(other) => log::warn!("Saved 'rsvpResponses' is not an array ({other}), using default"),
        None => {}
    }

    for (field, value) in saved {
        if !KNOWN_FIELDS.contains(&field.as_str()) {
            doc.extra.insert(field.clone(), value.clone());
        }
    }

    doc
}

/// Saved fields over default fields. Anything but two objects yields the
/// saved value.
fn merge_fields(base: &Value, saved: &Value) -> Value {
    match (base, saved) {
        (Value::Object(base), Value::Object(saved)) => {
            let mut merged = base.clone();
            for (field, value) in saved {
                merged.insert(field.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => saved.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::defaults::default_document;
    use crate::models::content::types::ModuleKey;
    use serde_json::json;

    #[test]
    fn empty_object_gives_defaults() {
        let merged = merge_over_defaults(&json!({}), default_document());
        assert_eq!(merged, default_document());
    }

    #[test]
    fn non_object_gives_defaults() {
        let merged = merge_over_defaults(&json!([1, 2, 3]), default_document());
        assert_eq!(merged, default_document());
    }

    #[test]
    fn saved_module_replaces_whole_default_entry() {
        let saved = json!({
            "modules": {"hero": {"enabled": false, "data": {"groomName": "Ivan"}, "order": 7}}
        });
        let merged = merge_over_defaults(&saved, default_document());
        let hero = merged.module(ModuleKey::Hero).unwrap();
        assert!(!hero.enabled());
        assert_eq!(hero.data(), &json!({"groomName": "Ivan"}));
        assert_eq!(hero.order_value(), 7.0);
        assert!(merged.has_all_modules());
    }

    #[test]
    fn unknown_module_and_top_level_fields_are_kept() {
        let saved = json!({
            "modules": {"guestbook": {"enabled": true, "data": {}, "order": 3}},
            "theme": "gold"
        });
        let merged = merge_over_defaults(&saved, default_document());
        assert!(merged.modules.contains_key("guestbook"));
        assert_eq!(merged.extra.get("theme"), Some(&json!("gold")));
        assert!(merged.ordered_modules().iter().all(|(k, _)| k.as_str() != "guestbook"));
    }

    #[test]
    fn mobile_preview_button_merges_field_by_field() {
        let saved = json!({"mobilePreviewButton": {}});
        let merged = merge_over_defaults(&saved, default_document());
        assert!(merged.preview_button().enabled);

        let saved = json!({"mobilePreviewButton": {"enabled": false, "label": "Preview"}});
        let merged = merge_over_defaults(&saved, default_document());
        assert!(!merged.preview_button().enabled);
        assert_eq!(merged.mobile_preview_button["label"], "Preview");
    }

    #[test]
    fn music_is_taken_as_saved() {
        let saved = json!({"music": {"enabled": false}});
        let merged = merge_over_defaults(&saved, default_document());
        assert_eq!(merged.music, json!({"enabled": false}));
        assert!(!merged.music_settings().enabled);
        assert_eq!(merged.music_settings().url, "");
    }

    #[test]
    fn malformed_music_is_kept_as_saved() {
        let saved = json!({"music": {"enabled": "yes", "url": "https://music.example/x.m3u8"}});
        let merged = merge_over_defaults(&saved, default_document());
        assert_eq!(merged.music, saved["music"]);
        assert_eq!(merged.music_settings().url, "https://music.example/x.m3u8");
    }

    #[test]
    fn malformed_known_module_is_kept_as_saved() {
        let saved = json!({"modules": {"gifts": {"enabled": "sometimes", "order": "3"}}});
        let merged = merge_over_defaults(&saved, default_document());
        let gifts = merged.module(ModuleKey::Gifts).unwrap();
        assert_eq!(gifts.as_value(), &saved["modules"]["gifts"]);
        assert!(!gifts.enabled());
        assert!(merged.has_all_modules());
    }

    #[test]
    fn malformed_rsvp_entries_are_kept_as_saved() {
        let saved = json!({
            "rsvpResponses": [
                {"id": "1", "name": "Anna", "attending": true, "guestsCount": 2},
                {"id": "2", "name": "Olga", "guestsCount": "3", "phone": "+100"},
                "stray"
            ]
        });
        let merged = merge_over_defaults(&saved, default_document());
        assert_eq!(Value::Array(merged.rsvp_responses.clone()), saved["rsvpResponses"]);
        let names: Vec<String> = merged.rsvps().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Anna", "Olga", ""]);
    }

    #[test]
    fn non_array_rsvp_responses_fall_back_to_default() {
        let saved = json!({"rsvpResponses": {"id": "1"}});
        let merged = merge_over_defaults(&saved, default_document());
        assert!(merged.rsvp_responses.is_empty());
    }
}
