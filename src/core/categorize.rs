use crate::models::EventCategory;

/// Title keywords per category, in tie-break order
///
/// A title matching several groups gets the first one listed here.
pub const KEYWORD_GROUPS: [(EventCategory, &[&str]); 6] = [
    (EventCategory::Food, &["FOOD", "DINNER", "LUNCH"]),
    (EventCategory::Art, &["ART", "GALLERY", "EXHIBIT"]),
    (EventCategory::Fitness, &["FIT", "YOGA", "GYM"]),
    (EventCategory::Tech, &["TECH", "CODE", "DEVELOPER"]),
    (EventCategory::Coffee, &["COFFEE", "CAFE"]),
    (EventCategory::Music, &["MUSIC", "CONCERT", "FESTIVAL"]),
];

/// Category used when no keyword matches
pub const DEFAULT_CATEGORY: EventCategory = EventCategory::Music;

/// Guess an event's category from its title
///
/// Case-insensitive substring match, so "PARTY" counts as art.
pub fn infer_category(title: &str) -> EventCategory {
    let upper = title.to_uppercase();

    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| upper.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_title() {
        assert_eq!(infer_category("Street Food Market"), EventCategory::Food);
        assert_eq!(infer_category("Dim Sum lunch"), EventCategory::Food);
    }

    #[test]
    fn test_default_is_music() {
        assert_eq!(infer_category("Live Jazz Night"), EventCategory::Music);
        assert_eq!(infer_category(""), EventCategory::Music);
        assert_eq!(infer_category("Running Club Meetup"), EventCategory::Music);
    }

    #[test]
    fn test_priority_order() {
        // food beats music
        assert_eq!(infer_category("Food Festival"), EventCategory::Food);
        // art beats fitness
        assert_eq!(infer_category("Art Fitness Fair"), EventCategory::Art);
        // tech beats coffee
        assert_eq!(infer_category("Coffee & Code"), EventCategory::Tech);
    }

    #[test]
    fn test_substring_matches() {
        assert_eq!(infer_category("Rooftop Party"), EventCategory::Art);
        assert_eq!(infer_category("Fitness Bootcamp"), EventCategory::Fitness);
        assert_eq!(infer_category("cafe crawl"), EventCategory::Coffee);
        assert_eq!(infer_category("Developer Meetup"), EventCategory::Tech);
    }
}
