use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::ModuleKey;

/// Decode `value` field by field over `T::default()`.
///
/// Fields missing from `value`, or whose value does not decode to the
/// field's type, keep their default. Fields `T` does not know are ignored.
pub fn decode_over_default<T>(value: &Value) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    overlay(T::default(), value)
}

/// Overlay the fields of a JSON object onto `base`, one field at a time.
pub fn overlay<T>(base: T, value: &Value) -> T
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(saved) = value else {
        return base;
    };
    let Ok(Value::Object(mut merged)) = serde_json::to_value(&base) else {
        return base;
    };

    for (field, candidate) in saved {
        if !merged.contains_key(field) {
            continue;
        }
        let previous = merged.insert(field.clone(), candidate.clone());
        if serde_json::from_value::<T>(Value::Object(merged.clone())).is_err() {
            log::debug!("Ignoring invalid value for field '{field}'");
            if let Some(previous) = previous {
                merged.insert(field.clone(), previous);
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or(base)
}

// ── Per-module payloads ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroData {
    pub groom_name: String,
    pub bride_name: String,
    pub wedding_date: String,
    pub background_image: String,
    pub show_countdown: bool,
}

impl Default for HeroData {
    fn default() -> Self {
        HeroData {
            groom_name: "Artem".to_string(),
            bride_name: "Valeria".to_string(),
            wedding_date: "2026-07-15".to_string(),
            background_image: "/images/hero.png".to_string(),
            show_countdown: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationData {
    pub title: String,
    pub text: String,
}

impl Default for InvitationData {
    fn default() -> Self {
        InvitationData {
            title: "Dear friends and family!".to_string(),
            text: "We are happy to invite you to share the most important day of our lives with us: our wedding day!".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryData {
    pub title: String,
    pub text: String,
    pub images: Vec<String>,
    pub show_timeline: bool,
}

impl Default for StoryData {
    fn default() -> Self {
        StoryData {
            title: "Our story".to_string(),
            text: "We met... and since then every day has been special.".to_string(),
            images: vec![
                "/images/story-1.png".to_string(),
                "/images/story-2.png".to_string(),
                "/images/story-3.png".to_string(),
                "/images/story-4.png".to_string(),
            ],
            show_timeline: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventItem {
    pub title: String,
    pub date: String,
    pub time: String,
    pub address: String,
    pub map_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDetailsData {
    pub title: String,
    pub events: Vec<EventItem>,
}

impl Default for EventDetailsData {
    fn default() -> Self {
        let venue = "Drozdy Club";
        let map_url = "https://yandex.by/maps/29630/minsk-district/?ll=27.447592%2C53.954722&z=18.48";
        EventDetailsData {
            title: "Event details".to_string(),
            events: vec![
                EventItem {
                    title: "Wedding ceremony".to_string(),
                    date: "2026-07-16".to_string(),
                    time: "15:30".to_string(),
                    address: venue.to_string(),
                    map_url: map_url.to_string(),
                },
                EventItem {
                    title: "Banquet".to_string(),
                    date: "2026-07-16".to_string(),
                    time: "18:00".to_string(),
                    address: venue.to_string(),
                    map_url: map_url.to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramItem {
    pub time: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramData {
    pub title: String,
    pub items: Vec<ProgramItem>,
}

impl Default for ProgramData {
    fn default() -> Self {
        let items = [
            ("14:00", "Guests arrive", "Welcome zone with drinks and light snacks.", "gathering"),
            ("15:30", "Wedding ceremony", "The most touching moment of our day.", "ring"),
            ("16:30", "Congratulations and buffet", "First toasts, flowers and photos with every guest.", "buffet"),
            ("18:00", "Banquet", "Dinner and welcome speeches from parents and friends.", "toast"),
            ("19:30", "First dance", "Our first dance as husband and wife, then the floor is yours.", "dance"),
            ("20:00", "Show programme", "Games, surprises and performances.", "show"),
            ("21:00", "Cake and bouquet toss", "The sweet highlight of the evening.", "cake"),
            ("22:00", "Dancing", "Time for good conversation and dancing.", "music"),
            ("23:30", "Fireworks", "A bright finale for everyone.", "fireworks"),
            ("00:00", "End of the official part", "Transfer is arranged for guests.", "transfer"),
        ];
        ProgramData {
            title: "Programme".to_string(),
            items: items
                .iter()
                .map(|(time, title, description, icon)| ProgramItem {
                    time: time.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    icon: icon.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DressCodeData {
    pub title: String,
    pub women_title: String,
    pub description: String,
    pub colors: Vec<String>,
    pub women_photo: String,
    pub men_title: String,
    pub men_description: String,
    pub men_colors: Vec<String>,
    pub men_photo: String,
}

impl Default for DressCodeData {
    fn default() -> Self {
        DressCodeData {
            title: "Dress code".to_string(),
            women_title: "Dress code for ladies".to_string(),
            description: "We would love to see you in elegant outfits in pastel tones".to_string(),
            colors: ["#2F4F4F", "#F5F1EB", "#C2A38B", "#D8CFC4"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            women_photo: "/images/dress-code-women.png".to_string(),
            men_title: "Dress code for gentlemen".to_string(),
            men_description: "We would love to see you in classic suits".to_string(),
            men_colors: ["#2B2E34", "#4A4F55", "#8C8578", "#C2B8A3"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            men_photo: "/images/dress-code-men.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WishesData {
    pub title: String,
    pub text: String,
}

impl Default for WishesData {
    fn default() -> Self {
        WishesData {
            title: "Wishes".to_string(),
            text: "Please do not bring flowers: we will not have time to enjoy them before we leave.\n\
                   Due to the venue we are celebrating with adult guests only.\n\
                   Thank you for understanding!"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GiftsData {
    pub title: String,
    pub text: String,
    pub wishlist_url: String,
    pub button_text: String,
}

impl Default for GiftsData {
    fn default() -> Self {
        GiftsData {
            title: "Gifts".to_string(),
            text: "Don't rack your brains over a present: we prepared a wishlist for you.".to_string(),
            wishlist_url: String::new(),
            button_text: "OPEN".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrinkOption {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RsvpData {
    pub title: String,
    pub subtitle: String,
    pub comment_label: String,
    pub drinks: Vec<DrinkOption>,
}

impl RsvpData {
    /// Drinks guests may pick from.
    pub fn offered_drinks(&self) -> impl Iterator<Item = &str> {
        self.drinks.iter().filter(|d| d.enabled).map(|d| d.name.as_str())
    }
}

impl Default for RsvpData {
    fn default() -> Self {
        RsvpData {
            title: "Please confirm your attendance".to_string(),
            subtitle: "Let us know whether you can share this day with us".to_string(),
            comment_label: String::new(),
            drinks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryData {
    pub title: String,
    pub text: String,
    pub telegram_url: String,
    pub button_text: String,
    pub images: Vec<String>,
}

impl Default for GalleryData {
    fn default() -> Self {
        GalleryData {
            title: "Gallery".to_string(),
            text: "After the wedding we will post photos and videos. You can watch them and share yours in our channel.".to_string(),
            telegram_url: String::new(),
            button_text: "OPEN".to_string(),
            images: (1..=8).map(|i| format!("/images/gallery-{i}.png")).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizerData {
    pub title: String,
    pub text: String,
    pub name: String,
    pub phone: String,
    pub photo: String,
}

impl Default for OrganizerData {
    fn default() -> Self {
        OrganizerData {
            title: "Our organizer".to_string(),
            text: "If you have any questions on the day, please contact our wedding organizer".to_string(),
            name: String::new(),
            phone: String::new(),
            photo: "/images/organizer.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarData {
    pub title: String,
    pub wedding_date: String,
}

impl Default for CalendarData {
    fn default() -> Self {
        CalendarData {
            title: "See you soon!".to_string(),
            wedding_date: "2026-07-16".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinalBlockData {
    pub title: String,
    pub signature: String,
    pub background_image: String,
}

impl Default for FinalBlockData {
    fn default() -> Self {
        FinalBlockData {
            title: "We can't wait to see you!".to_string(),
            signature: "With love, Artem and Valeria".to_string(),
            background_image: "/images/final.png".to_string(),
        }
    }
}

// ── Module data union ────────────────────────────────────────────

/// Typed view of a module's `data`, one variant per [`ModuleKey`].
///
/// The module key is the tag: variants are built only by [`ModuleData::decode`]
/// and [`ModuleData::default_for`], never deserialized directly. Serialization
/// is untagged, so [`ModuleData::to_value`] yields the bare data object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleData {
    Hero(HeroData),
    Invitation(InvitationData),
    Story(StoryData),
    EventDetails(EventDetailsData),
    Program(ProgramData),
    DressCode(DressCodeData),
    Wishes(WishesData),
    Gifts(GiftsData),
    Rsvp(RsvpData),
    Gallery(GalleryData),
    Organizer(OrganizerData),
    Calendar(CalendarData),
    FinalBlock(FinalBlockData),
}

impl ModuleData {
    pub fn default_for(key: ModuleKey) -> Self {
        Self::decode(key, &Value::Null)
    }

    /// Decode raw module data; never fails, see [`decode_over_default`].
    pub fn decode(key: ModuleKey, value: &Value) -> Self {
        match key {
            ModuleKey::Hero => ModuleData::Hero(decode_over_default(value)),
            ModuleKey::Invitation => ModuleData::Invitation(decode_over_default(value)),
            ModuleKey::Story => ModuleData::Story(decode_over_default(value)),
            ModuleKey::EventDetails => ModuleData::EventDetails(decode_over_default(value)),
            ModuleKey::Program => ModuleData::Program(decode_over_default(value)),
            ModuleKey::DressCode => ModuleData::DressCode(decode_over_default(value)),
            ModuleKey::Wishes => ModuleData::Wishes(decode_over_default(value)),
            ModuleKey::Gifts => ModuleData::Gifts(decode_over_default(value)),
            ModuleKey::Rsvp => ModuleData::Rsvp(decode_over_default(value)),
            ModuleKey::Gallery => ModuleData::Gallery(decode_over_default(value)),
            ModuleKey::Organizer => ModuleData::Organizer(decode_over_default(value)),
            ModuleKey::Calendar => ModuleData::Calendar(decode_over_default(value)),
            ModuleKey::FinalBlock => ModuleData::FinalBlock(decode_over_default(value)),
        }
    }

    pub fn key(&self) -> ModuleKey {
        match self {
            ModuleData::Hero(_) => ModuleKey::Hero,
            ModuleData::Invitation(_) => ModuleKey::Invitation,
            ModuleData::Story(_) => ModuleKey::Story,
            ModuleData::EventDetails(_) => ModuleKey::EventDetails,
            ModuleData::Program(_) => ModuleKey::Program,
            ModuleData::DressCode(_) => ModuleKey::DressCode,
            ModuleData::Wishes(_) => ModuleKey::Wishes,
            ModuleData::Gifts(_) => ModuleKey::Gifts,
            ModuleData::Rsvp(_) => ModuleKey::Rsvp,
            ModuleData::Gallery(_) => ModuleKey::Gallery,
            ModuleData::Organizer(_) => ModuleKey::Organizer,
            ModuleData::Calendar(_) => ModuleKey::Calendar,
            ModuleData::FinalBlock(_) => ModuleKey::FinalBlock,
        }
    }

    /// The payload as JSON, without any variant tag.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
