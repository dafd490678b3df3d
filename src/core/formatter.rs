use crate::core::categorize::infer_category;
use crate::models::{EventOrigin, NormalizedEvent, RawEvent};
use serde_json::Value;
use std::collections::HashSet;

const DEFAULT_TITLE: &str = "Event";
const UNKNOWN_VENUE: &str = "Location TBA";

/// Normalize upstream records into app events
///
/// Records sharing an identifier are collapsed to the first one seen; input
/// order is preserved otherwise. Records without an identifier share the
/// "missing" key, so only the first of them survives.
pub fn normalize<I>(raw_events: I) -> Vec<NormalizedEvent>
where
    I: IntoIterator<Item = RawEvent>,
{
    let mut seen: HashSet<Option<String>> = HashSet::new();

    raw_events
        .into_iter()
        .filter(|raw| seen.insert(raw.id.clone()))
        .map(|raw| normalize_one(&raw))
        .collect()
}

/// Normalize loosely-shaped JSON records; never fails
pub fn normalize_json(values: &[Value]) -> Vec<NormalizedEvent> {
    normalize(values.iter().map(RawEvent::from_json))
}

/// Normalize a single record without deduplication
pub fn normalize_one(raw: &RawEvent) -> NormalizedEvent {
    let title = raw.title().unwrap_or(DEFAULT_TITLE).to_string();
    let category = infer_category(&title);

    NormalizedEvent {
        id: raw.id.clone().unwrap_or_default(),
        venue: venue_label(raw),
        date_time: raw.start_local().unwrap_or_default().to_string(),
        price: price_label(raw),
        category,
        url: raw.url.clone(),
        source: EventOrigin::Eventbrite,
        title,
    }
}

fn venue_label(raw: &RawEvent) -> String {
    match (raw.venue_name(), raw.venue_ref()) {
        (Some(name), _) => name.to_string(),
        (None, Some(venue_id)) => format!("Venue {}", venue_id),
        (None, None) => UNKNOWN_VENUE.to_string(),
    }
}

fn price_label(raw: &RawEvent) -> String {
    match (raw.price_display(), raw.is_free) {
        (Some(display), _) => display.to_string(),
        (None, Some(true)) => "Free".to_string(),
        (None, _) => "Paid".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventCategory;
    use serde_json::json;

    fn raw(id: &str, title: &str) -> RawEvent {
        RawEvent::from_json(&json!({ "id": id, "name": { "text": title } }))
    }

    #[test]
    fn test_empty_title_uses_default() {
        let event = normalize_one(&raw("x", ""));
        assert_eq!(event.title, "Event");
        assert_eq!(event.category, EventCategory::Music);
    }

    #[test]
    fn test_empty_price_display_falls_back() {
        let events = normalize_json(&[
            json!({ "id": "free", "is_free": true, "ticket_availability": { "minimum_ticket_price": { "display": "" } } }),
            json!({ "id": "paid", "ticket_availability": { "minimum_ticket_price": { "display": "" } } }),
        ]);

        assert_eq!(events[0].price, "Free");
        assert_eq!(events[1].price, "Paid");
    }

    #[test]
    fn test_empty_venue_fields_fall_back() {
        let events = normalize_json(&[
            json!({ "id": "a", "venue_id": "" }),
            json!({ "id": "b", "venue": { "name": "" }, "venue_id": "42" }),
            json!({ "id": "c", "start": { "local": "" } }),
        ]);

        assert_eq!(events[0].venue, "Location TBA");
        assert_eq!(events[1].venue, "Venue 42");
        assert_eq!(events[2].date_time, "");
    }

    #[test]
    fn test_dedup_keeps_first() {
        let events = normalize(vec![
            raw("1", "Street Food Market"),
            raw("2", "Gallery Opening"),
            raw("1", "Live Jazz Night"),
        ]);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].title, "Street Food Market");
        assert_eq!(events[1].id, "2");
    }

    #[test]
    fn test_defaults_for_empty_record() {
        let event = normalize_one(&RawEvent::default());

        assert_eq!(event.title, "Event");
        assert_eq!(event.date_time, "");
        assert_eq!(event.venue, "Location TBA");
        assert_eq!(event.price, "Paid");
        assert_eq!(event.category, EventCategory::Music);
        assert_eq!(event.source, EventOrigin::Eventbrite);
    }

    #[test]
    fn test_price_labels() {
        let free = RawEvent::from_json(&json!({ "id": "a", "is_free": true }));
        let paid = RawEvent::from_json(&json!({ "id": "b", "is_free": false }));
        let explicit = RawEvent::from_json(&json!({
            "id": "c",
            "is_free": true,
            "ticket_availability": { "minimum_ticket_price": { "display": "£9" } }
        }));

        assert_eq!(normalize_one(&free).price, "Free");
        assert_eq!(normalize_one(&paid).price, "Paid");
        assert_eq!(normalize_one(&explicit).price, "£9");
    }

    #[test]
    fn test_venue_labels() {
        let named = RawEvent::from_json(&json!({ "venue": { "name": "Tate Modern" } }));
        let by_id = RawEvent::from_json(&json!({ "venue_id": 123 }));

        assert_eq!(normalize_one(&named).venue, "Tate Modern");
        assert_eq!(normalize_one(&by_id).venue, "Venue 123");
    }

    #[test]
    fn test_normalize_json_total_over_garbage() {
        let events = normalize_json(&[json!(null), json!("text"), json!({ "id": "x" })]);

        // null and "text" both have no id and collapse into one record
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, "x");
    }
}
