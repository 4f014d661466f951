use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::modules::overlay;
use super::types::{RsvpResponse, rsvp_id};

/// A guest count of at least 1, given as a number or a numeric string.
fn guest_count(value: &Value) -> Option<u32> {
    let count = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(count).ok().filter(|n| *n >= 1)
}

/// A guest submission before the store assigns `id` and `submittedAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRsvp {
    pub name: String,
    pub attending: bool,
    pub guests_count: u32,
    pub comment: String,
    pub selected_drinks: Vec<String>,
    pub wish: String,
}

impl Default for NewRsvp {
    fn default() -> Self {
        NewRsvp {
            name: String::new(),
            attending: false,
            guests_count: 1,
            comment: String::new(),
            selected_drinks: Vec::new(),
            wish: String::new(),
        }
    }
}

impl NewRsvp {
    /// Build from a submitted form body. Never fails: absent or invalid
    /// fields take their defaults (`guestsCount` falls back to 1).
    pub fn from_json(body: &Value) -> Self {
        let text = |field: &str| {
            body.get(field)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let guests_count = body.get("guestsCount").and_then(guest_count).unwrap_or(1);

        let mut selected_drinks: Vec<String> = Vec::new();
        if let Some(items) = body.get("selectedDrinks").and_then(Value::as_array) {
            for drink in items.iter().filter_map(Value::as_str) {
                if !selected_drinks.iter().any(|d| d == drink) {
                    selected_drinks.push(drink.to_string());
                }
            }
        }

        NewRsvp {
            name: text("name"),
            attending: body.get("attending").and_then(Value::as_bool).unwrap_or(false),
            guests_count,
            comment: text("comment"),
            selected_drinks,
            wish: text("wish"),
        }
    }

    /// Turn into a stored response with the given identity.
    pub fn into_response(self, id: String, submitted_at: DateTime<Utc>) -> RsvpResponse {
        RsvpResponse {
            id,
            name: self.name,
            attending: self.attending,
            guests_count: self.guests_count,
            comment: self.comment,
            selected_drinks: self.selected_drinks,
            wish: self.wish,
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl RsvpResponse {
    /// Typed reading of a saved entry. Fields that are missing or of the
    /// wrong type take their defaults; `guestsCount` also accepts numeric
    /// strings.
    pub fn from_value(raw: &Value) -> Self {
        let mut response = overlay(RsvpResponse::default(), raw);
        response.guests_count = raw.get("guestsCount").and_then(guest_count).unwrap_or(1);
        response
    }
}

/// Millisecond timestamp id, bumped until it collides with nothing in
/// `existing`.
pub fn next_rsvp_id(existing: &[Value], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|raw| rsvp_id(raw) == Some(id.as_str())) {
            return id;
        }
        candidate += 1;
    }
}

/// Admin overview of the responses collected so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSummary {
    pub total_responses: usize,
    pub attending_responses: usize,
    pub declined_responses: usize,
    /// Sum of `guestsCount` over attending responses.
    pub attending_guests: u64,
    /// Drink name -> number of attending responses that picked it.
    pub drinks: BTreeMap<String, usize>,
}

impl RsvpSummary {
    pub fn from_responses(responses: &[RsvpResponse]) -> Self {
        let mut summary = RsvpSummary {
            total_responses: responses.len(),
            ..RsvpSummary::default()
        };
        for response in responses {
            if !response.attending {
                summary.declined_responses += 1;
                continue;
            }
            summary.attending_responses += 1;
            summary.attending_guests += u64::from(response.guests_count);
            for drink in &response.selected_drinks {
                *summary.drinks.entry(drink.clone()).or_default() += 1;
            }
        }
        summary
    }
}
