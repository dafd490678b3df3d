use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Profile;

/// Query string of the events proxy
///
/// Both fields are optional at the extractor level so that a missing parameter
/// produces the proxy's own 400 body rather than an extractor error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl EventsQuery {
    /// Returns `(query, location)` when both are present and non-empty
    pub fn required(&self) -> Option<(&str, &str)> {
        let query = self.query.as_deref().filter(|q| !q.is_empty())?;
        let location = self.location.as_deref().filter(|l| !l.is_empty())?;
        Some((query, location))
    }
}

/// Request to score a pairing of two profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompatibilityRequest {
    #[validate(nested)]
    pub current: Profile,
    #[validate(nested)]
    pub candidate: Profile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_empty_values() {
        let query = EventsQuery {
            query: Some("music".to_string()),
            location: Some(String::new()),
        };
        assert!(query.required().is_none());

        let query = EventsQuery {
            query: Some("music".to_string()),
            location: Some("London".to_string()),
        };
        assert_eq!(query.required(), Some(("music", "London")));
    }
}
