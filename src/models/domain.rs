use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

/// User profile as shown on the swipe deck and edited during onboarding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub id: String,
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(rename = "photo", default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub city: String,
}

fn default_avatar() -> String {
    "🙂".to_string()
}

impl Profile {
    pub fn new(id: &str, display_name: &str, city: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            age: None,
            avatar: default_avatar(),
            bio: String::new(),
            interests: BTreeSet::new(),
            city: city.to_string(),
        }
    }

    /// Builder-style helper to replace the interest set
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_interest(&self, tag: &str) -> bool {
        self.interests.contains(tag)
    }
}

/// Scores produced for a pairing of two profiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    #[serde(rename = "score")]
    pub overall_score: u8,
    #[serde(rename = "interestOverlap")]
    pub interest_overlap_score: u8,
    #[serde(rename = "eventAlignment")]
    pub event_alignment_score: u8,
    #[serde(rename = "distanceScore")]
    pub proximity_score: f64,
}

/// Weights of the overall compatibility score
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub interest_overlap: f64,
    pub event_alignment: f64,
    pub proximity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interest_overlap: 0.50,
            event_alignment: 0.25,
            proximity: 0.25,
        }
    }
}

/// The six reference event categories, also the interest vocabulary offered in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Music,
    Art,
    Food,
    Fitness,
    Tech,
    Coffee,
}

impl EventCategory {
    pub const ALL: [EventCategory; 6] = [
        EventCategory::Music,
        EventCategory::Art,
        EventCategory::Food,
        EventCategory::Fitness,
        EventCategory::Tech,
        EventCategory::Coffee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Music => "music",
            EventCategory::Art => "art",
            EventCategory::Food => "food",
            EventCategory::Fitness => "fitness",
            EventCategory::Tech => "tech",
            EventCategory::Coffee => "coffee",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventCategory::Music => "🎵",
            EventCategory::Art => "📸",
            EventCategory::Food => "🍔",
            EventCategory::Fitness => "🏋️",
            EventCategory::Tech => "💻",
            EventCategory::Coffee => "☕",
        }
    }

    /// Exact tag lookup, e.g. `"music"`
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a normalized event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOrigin {
    Eventbrite,
    Catalog,
}

/// Event in the shape the app renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub id: String,
    #[serde(rename = "name")]
    pub title: String,
    pub venue: String,
    #[serde(rename = "date")]
    pub date_time: String,
    pub price: String,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub source: EventOrigin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateTimeField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_1: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<VenueAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketAvailability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_ticket_price: Option<TicketPrice>,
}

/// Eventbrite-shaped event record; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTimeField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTimeField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_availability: Option<TicketAvailability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RawEvent {
    /// Extract a record from arbitrary JSON.
    ///
    /// Never fails: fields that are missing or of an unexpected type become `None`.
    /// Identifiers are accepted as strings or numbers.
    pub fn from_json(value: &Value) -> Self {
        let text = |pointer: &str| value.pointer(pointer).and_then(Value::as_str).map(str::to_string);
        let ident = |pointer: &str| match value.pointer(pointer) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let venue_name = text("/venue/name");
        let address_1 = text("/venue/address/address_1");
        let venue = match (venue_name, address_1) {
            (None, None) => None,
            (name, address_1) => Some(Venue {
                name,
                address: address_1.map(|a| VenueAddress { address_1: Some(a) }),
            }),
        };

        Self {
            id: ident("/id"),
            name: text("/name/text").map(|t| TextField { text: Some(t) }),
            start: text("/start/local").map(|l| DateTimeField { local: Some(l) }),
            end: text("/end/local").map(|l| DateTimeField { local: Some(l) }),
            venue,
            venue_id: ident("/venue_id"),
            is_free: value.get("is_free").and_then(Value::as_bool),
            ticket_availability: text("/ticket_availability/minimum_ticket_price/display").map(
                |display| TicketAvailability {
                    minimum_ticket_price: Some(TicketPrice { display: Some(display) }),
                },
            ),
            url: text("/url"),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| present(n.text.as_deref()))
    }

    pub fn start_local(&self) -> Option<&str> {
        self.start.as_ref().and_then(|s| present(s.local.as_deref()))
    }

    pub fn venue_name(&self) -> Option<&str> {
        self.venue.as_ref().and_then(|v| present(v.name.as_deref()))
    }

    pub fn venue_ref(&self) -> Option<&str> {
        present(self.venue_id.as_deref())
    }

    pub fn price_display(&self) -> Option<&str> {
        self.ticket_availability
            .as_ref()
            .and_then(|t| t.minimum_ticket_price.as_ref())
            .and_then(|p| present(p.display.as_deref()))
    }
}

/// Empty upstream strings count as missing
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// A right swipe that found mutual interests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub user: Profile,
    #[serde(rename = "mutualInterests")]
    pub mutual_interests: Vec<String>,
    pub compatibility: CompatibilityResult,
}

/// Swipe direction on the profile deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_missing_interests_is_empty() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "1",
            "name": "Sarah",
            "city": "London"
        }))
        .unwrap();

        assert!(profile.interests.is_empty());
        assert_eq!(profile.avatar, "🙂");
    }

    #[test]
    fn test_profile_interests_deduplicated() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "1",
            "interests": ["music", "art", "music"]
        }))
        .unwrap();

        assert_eq!(profile.interests.len(), 2);
    }

    #[test]
    fn test_raw_event_from_json_tolerates_wrong_types() {
        let raw = RawEvent::from_json(&json!({
            "id": 42,
            "name": "not an object",
            "start": { "local": 17 },
            "is_free": "yes"
        }));

        assert_eq!(raw.id.as_deref(), Some("42"));
        assert_eq!(raw.title(), None);
        assert_eq!(raw.start_local(), None);
        assert_eq!(raw.is_free, None);
    }

    #[test]
    fn test_raw_event_from_json_nested_fields() {
        let raw = RawEvent::from_json(&json!({
            "id": "e1",
            "name": { "text": "Live Jazz Night" },
            "start": { "local": "2026-10-19T19:00:00" },
            "venue": { "name": "The Blue Note", "address": { "address_1": "London" } },
            "ticket_availability": { "minimum_ticket_price": { "display": "£12" } }
        }));

        assert_eq!(raw.title(), Some("Live Jazz Night"));
        assert_eq!(raw.start_local(), Some("2026-10-19T19:00:00"));
        assert_eq!(raw.venue_name(), Some("The Blue Note"));
        assert_eq!(raw.price_display(), Some("£12"));
    }

    #[test]
    fn test_category_from_tag() {
        assert_eq!(EventCategory::from_tag("coffee"), Some(EventCategory::Coffee));
        assert_eq!(EventCategory::from_tag("Coffee"), None);
        assert_eq!(EventCategory::Tech.to_string(), "tech");
    }
}
