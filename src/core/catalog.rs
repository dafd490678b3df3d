//! Static demo data: the swipe deck, the fallback event catalog and the
//! templates the events proxy synthesizes upstream-shaped records from.

use crate::models::{EventCategory, EventOrigin, NormalizedEvent, Profile, RawEvent};
use crate::models::domain::{DateTimeField, TextField, TicketAvailability, TicketPrice, Venue, VenueAddress};
use chrono::NaiveDate;

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    venue: &'static str,
    date: &'static str,
    price: &'static str,
    category: EventCategory,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { id: "1", name: "The Big Indie Tribute Festival", venue: "The Garage, Highbury", date: "Saturday 8pm", price: "£13.69", category: EventCategory::Music },
    CatalogEntry { id: "2", name: "Jazz Night at Ronnie Scott's", venue: "Soho", date: "Friday 9pm", price: "£25", category: EventCategory::Music },
    CatalogEntry { id: "6", name: "Live Band Night", venue: "Electric Ballroom, Camden", date: "Thursday 7pm", price: "£15", category: EventCategory::Music },
    CatalogEntry { id: "3", name: "Contemporary Art Exhibition", venue: "Tate Modern, South Bank", date: "Sunday 2pm", price: "Free", category: EventCategory::Art },
    CatalogEntry { id: "7", name: "Street Art Walking Tour", venue: "Shoreditch", date: "Saturday 10am", price: "£12", category: EventCategory::Art },
    CatalogEntry { id: "4", name: "Street Food Market", venue: "Camden Market", date: "Saturday 12pm", price: "£10", category: EventCategory::Food },
    CatalogEntry { id: "8", name: "Dim Sum Lunch", venue: "Chinatown", date: "Sunday 1pm", price: "£18", category: EventCategory::Food },
    CatalogEntry { id: "5", name: "Outdoor Yoga Session", venue: "Hyde Park", date: "Sunday 10am", price: "£15", category: EventCategory::Fitness },
    CatalogEntry { id: "9", name: "Running Club Meetup", venue: "Victoria Park", date: "Wednesday 6pm", price: "Free", category: EventCategory::Fitness },
];

/// Fallback events for the given interest tags, in tag order
///
/// Tags without catalog entries (including `tech` and `coffee`) contribute nothing.
pub fn fallback_events<'a, I>(interests: I) -> Vec<NormalizedEvent>
where
    I: IntoIterator<Item = &'a str>,
{
    interests
        .into_iter()
        .filter_map(EventCategory::from_tag)
        .flat_map(|category| CATALOG.iter().filter(move |entry| entry.category == category))
        .map(|entry| NormalizedEvent {
            id: entry.id.to_string(),
            title: entry.name.to_string(),
            venue: entry.venue.to_string(),
            date_time: entry.date.to_string(),
            price: entry.price.to_string(),
            category: entry.category,
            url: None,
            source: EventOrigin::Catalog,
        })
        .collect()
}

/// The swipe deck
pub fn mock_users() -> Vec<Profile> {
    let user = |id: &str, name: &str, age: u8, photo: &str, interests: [&str; 3]| Profile {
        age: Some(age),
        avatar: photo.to_string(),
        ..Profile::new(id, name, "London").with_interests(interests)
    };

    vec![
        user("1", "Sarah", 28, "👩‍🎤", ["music", "art", "food"]),
        user("2", "Emma", 26, "👩‍💼", ["fitness", "music", "tech"]),
        user("3", "Olivia", 27, "👩‍🎨", ["art", "coffee", "music"]),
    ]
}

struct EventTemplate {
    name: &'static str,
    venue: &'static str,
    time: &'static str,
}

const MUSIC_TEMPLATES: &[EventTemplate] = &[
    EventTemplate { name: "Live Jazz Night", venue: "The Blue Note", time: "19:00" },
    EventTemplate { name: "Summer Music Festival", venue: "Hyde Park", time: "18:00" },
    EventTemplate { name: "Indie Rock Concert", venue: "Electric Ballroom", time: "20:00" },
    EventTemplate { name: "Classical Symphony", venue: "Royal Albert Hall", time: "19:30" },
];

const ART_TEMPLATES: &[EventTemplate] = &[
    EventTemplate { name: "Contemporary Art Exhibition", venue: "Tate Modern", time: "10:00" },
    EventTemplate { name: "Street Art Walking Tour", venue: "Shoreditch", time: "14:00" },
    EventTemplate { name: "Gallery Opening Night", venue: "Saatchi Gallery", time: "18:00" },
];

const FOOD_TEMPLATES: &[EventTemplate] = &[
    EventTemplate { name: "Street Food Market", venue: "Camden Market", time: "12:00" },
    EventTemplate { name: "Cooking Class", venue: "Borough Market", time: "18:00" },
    EventTemplate { name: "Food Festival", venue: "South Bank", time: "11:00" },
];

const FITNESS_TEMPLATES: &[EventTemplate] = &[
    EventTemplate { name: "Yoga in the Park", venue: "Hyde Park", time: "08:00" },
    EventTemplate { name: "Running Club Meetup", venue: "Victoria Park", time: "18:30" },
    EventTemplate { name: "Fitness Bootcamp", venue: "Regent's Park", time: "07:00" },
];

fn templates_for(query: &str) -> &'static [EventTemplate] {
    match query.to_lowercase().as_str() {
        "art" => ART_TEMPLATES,
        "food" => FOOD_TEMPLATES,
        "fitness" => FITNESS_TEMPLATES,
        _ => MUSIC_TEMPLATES,
    }
}

/// Upstream-shaped events for a query, as returned by the events proxy
///
/// Unknown queries get the music templates. Free flag and price are derived
/// from the record id so repeated calls agree.
pub fn synthesize_events(query: &str, location: &str, date: NaiveDate) -> Vec<RawEvent> {
    let day = date.format("%Y-%m-%d").to_string();

    templates_for(query)
        .iter()
        .enumerate()
        .map(|(idx, template)| {
            let id = format!("mock-{}-{}", query, idx);
            let hash = fnv1a(id.as_bytes());
            let is_free = hash % 10 >= 6;
            let start_hour: u32 = template
                .time
                .split(':')
                .next()
                .and_then(|h| h.parse().ok())
                .unwrap_or(0);

            let ticket_availability = (!is_free).then(|| TicketAvailability {
                minimum_ticket_price: Some(TicketPrice {
                    display: Some(format!("£{}", 5 + (hash >> 8) % 40)),
                }),
            });

            RawEvent {
                name: Some(TextField { text: Some(template.name.to_string()) }),
                start: Some(DateTimeField { local: Some(format!("{}T{}:00", day, template.time)) }),
                end: Some(DateTimeField { local: Some(format!("{}T{:02}:00:00", day, start_hour + 2)) }),
                venue: Some(Venue {
                    name: Some(template.venue.to_string()),
                    address: Some(VenueAddress { address_1: Some(location.to_string()) }),
                }),
                venue_id: None,
                is_free: Some(is_free),
                ticket_availability,
                url: None,
                id: Some(id),
            }
        })
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf29ce484222325_u64, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x100000001b3)
    })
}
