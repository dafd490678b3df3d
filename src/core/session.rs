use crate::core::catalog::mock_users;
use crate::core::compatibility::{mutual_interests, CompatibilityEngine, ProximityEstimator};
use crate::models::{Match, NormalizedEvent, Profile, SwipeDirection};
use serde::{Deserialize, Serialize};

/// Queried when neither the match nor the user has any interests
const DEFAULT_INTEREST: &str = "music";

/// Screens of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Home,
    Onboarding,
    Swipe,
    Match,
    Events,
}

/// Partial profile edit; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub age: Option<Option<u8>>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
}

/// User actions and async completions fed into [`reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetEmail(String),
    SetPassword(String),
    ShowEmailLogin(bool),
    LogIn,
    Navigate(Screen),
    UpdateProfile(ProfilePatch),
    ToggleInterest(String),
    SetToken(String),
    Swipe(SwipeDirection),
    OpenMatch(usize),
    ViewEvents,
    LoadEvents,
    EventsLoaded(Vec<NormalizedEvent>),
    BackToSwipe,
}

/// Side effects requested by a transition, run by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistProfile(Profile),
    PersistToken(String),
    FetchEvents { interests: Vec<String>, city: String },
}

/// Whole client session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub screen: Screen,
    pub email: String,
    pub password: String,
    pub show_email_login: bool,
    pub current_user: Profile,
    pub deck: Vec<Profile>,
    pub deck_index: usize,
    pub matches: Vec<Match>,
    pub current_match: Option<Match>,
    pub suggested_events: Vec<NormalizedEvent>,
    pub token: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_deck(mock_users())
    }
}

impl SessionState {
    pub fn with_deck(deck: Vec<Profile>) -> Self {
        Self {
            screen: Screen::Login,
            email: String::new(),
            password: String::new(),
            show_email_login: false,
            current_user: Profile::new("", "", ""),
            deck,
            deck_index: 0,
            matches: Vec::new(),
            current_match: None,
            suggested_events: Vec::new(),
            token: String::new(),
        }
    }

    /// Session state at startup, merging whatever was persisted
    pub fn restore(profile: Option<Profile>, token: Option<String>) -> Self {
        let mut state = Self::default();
        if let Some(profile) = profile {
            state.current_user = profile;
        }
        if let Some(token) = token {
            state.token = token;
        }
        state
    }

    /// Profile at the top of the deck
    pub fn current_profile(&self) -> Option<&Profile> {
        self.deck.get(self.deck_index)
    }
}

/// Result of feeding one action through the reducer
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn persist_profile(self) -> Self {
        let profile = self.state.current_user.clone();
        self.with(Effect::PersistProfile(profile))
    }
}

/// Apply `action` to `state`
pub fn reduce<P: ProximityEstimator>(
    mut state: SessionState,
    action: Action,
    engine: &CompatibilityEngine<P>,
) -> Transition {
    match action {
        Action::SetEmail(email) => {
            state.email = email;
            Transition::new(state)
        }
        Action::SetPassword(password) => {
            state.password = password;
            Transition::new(state)
        }
        Action::ShowEmailLogin(show) => {
            state.show_email_login = show;
            Transition::new(state)
        }
        Action::LogIn => {
            let mut changed = false;
            if state.current_user.id.is_empty() {
                state.current_user.id = uuid::Uuid::new_v4().to_string();
                changed = true;
            }
            if state.current_user.display_name.is_empty() {
                if let Some((local, _)) = state.email.split_once('@') {
                    state.current_user.display_name = local.to_string();
                    changed = true;
                }
            }
            state.show_email_login = false;
            state.password.clear();
            state.screen = Screen::Home;

            let transition = Transition::new(state);
            if changed {
                transition.persist_profile()
            } else {
                transition
            }
        }
        Action::Navigate(screen) => {
            state.screen = screen;
            Transition::new(state)
        }
        Action::UpdateProfile(patch) => {
            let user = &mut state.current_user;
            if let Some(name) = patch.display_name {
                user.display_name = name;
            }
            if let Some(age) = patch.age {
                user.age = age;
            }
            if let Some(avatar) = patch.avatar {
                user.avatar = avatar;
            }
            if let Some(bio) = patch.bio {
                user.bio = bio;
            }
            if let Some(city) = patch.city {
                user.city = city;
            }
            Transition::new(state).persist_profile()
        }
        Action::ToggleInterest(tag) => {
            if !state.current_user.interests.remove(&tag) {
                state.current_user.interests.insert(tag);
            }
            Transition::new(state).persist_profile()
        }
        Action::SetToken(token) => {
            state.token = token.clone();
            Transition::new(state).with(Effect::PersistToken(token))
        }
        Action::Swipe(direction) => swipe(state, direction, engine),
        Action::OpenMatch(index) => {
            if let Some(found) = state.matches.get(index).cloned() {
                state.current_match = Some(found);
                state.suggested_events.clear();
            }
            Transition::new(state)
        }
        Action::ViewEvents => {
            let fetch = state
                .current_match
                .as_ref()
                .filter(|_| state.suggested_events.is_empty())
                .map(|m| Effect::FetchEvents {
                    interests: m.mutual_interests.clone(),
                    city: state.current_user.city.clone(),
                });
            state.screen = Screen::Events;

            let transition = Transition::new(state);
            match fetch {
                Some(effect) => transition.with(effect),
                None => transition,
            }
        }
        Action::LoadEvents => {
            let interests = match &state.current_match {
                Some(m) if !m.mutual_interests.is_empty() => m.mutual_interests.clone(),
                _ if !state.current_user.interests.is_empty() => {
                    state.current_user.interests.iter().cloned().collect()
                }
                _ => vec![DEFAULT_INTEREST.to_string()],
            };
            let city = state.current_user.city.clone();
            Transition::new(state).with(Effect::FetchEvents { interests, city })
        }
        Action::EventsLoaded(events) => {
            state.suggested_events = events;
            Transition::new(state)
        }
        Action::BackToSwipe => {
            state.screen = Screen::Swipe;
            state.current_match = None;
            Transition::new(state)
        }
    }
}

fn swipe<P: ProximityEstimator>(
    mut state: SessionState,
    direction: SwipeDirection,
    engine: &CompatibilityEngine<P>,
) -> Transition {
    let Some(profile) = state.current_profile().cloned() else {
        return Transition::new(state);
    };

    // Deck wraps around after the last profile
    state.deck_index = (state.deck_index + 1) % state.deck.len();

    if direction == SwipeDirection::Left {
        return Transition::new(state);
    }

    let mutual = mutual_interests(&state.current_user, &profile);
    if mutual.is_empty() {
        return Transition::new(state);
    }

    let compatibility = engine.score(&state.current_user, &profile);
    tracing::debug!(
        "Matched with {} on {:?} (score {})",
        profile.display_name,
        mutual,
        compatibility.overall_score
    );

    let found = Match {
        user: profile,
        mutual_interests: mutual.clone(),
        compatibility,
    };

    state.matches.push(found.clone());
    state.current_match = Some(found);
    state.suggested_events.clear();
    state.screen = Screen::Match;

    let city = state.current_user.city.clone();
    Transition::new(state).with(Effect::FetchEvents {
        interests: mutual,
        city,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CompatibilityEngine {
        CompatibilityEngine::with_default_weights()
    }

    fn logged_in(interests: &[&str]) -> SessionState {
        let mut state = SessionState::default();
        state.current_user = Profile::new("me", "Tester", "London").with_interests(interests.iter().copied());
        state.screen = Screen::Swipe;
        state
    }

    #[test]
    fn test_login_without_name_goes_home() {
        let transition = reduce(SessionState::default(), Action::LogIn, &engine());

        assert_eq!(transition.state.screen, Screen::Home);
        assert!(!transition.state.current_user.id.is_empty());
        assert!(transition.state.current_user.display_name.is_empty());
        assert!(matches!(transition.effects.as_slice(), [Effect::PersistProfile(_)]));
    }

    #[test]
    fn test_email_login_names_user_from_local_part() {
        let state = reduce(SessionState::default(), Action::SetEmail("alex@example.com".into()), &engine()).state;
        let transition = reduce(state, Action::LogIn, &engine());

        assert_eq!(transition.state.screen, Screen::Home);
        assert_eq!(transition.state.current_user.display_name, "alex");
        assert!(matches!(
            transition.effects.as_slice(),
            [Effect::PersistProfile(p)] if p.display_name == "alex"
        ));
    }

    #[test]
    fn test_email_login_keeps_existing_name() {
        let mut state = logged_in(&[]);
        state.email = "alex@example.com".into();
        let transition = reduce(state, Action::LogIn, &engine());

        assert_eq!(transition.state.current_user.display_name, "Tester");
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn test_email_without_at_sign_leaves_name_empty() {
        let state = reduce(SessionState::default(), Action::SetEmail("alex".into()), &engine()).state;
        let state = reduce(state, Action::LogIn, &engine()).state;

        assert!(state.current_user.display_name.is_empty());
    }

    #[test]
    fn test_login_with_name_goes_home() {
        let transition = reduce(logged_in(&[]), Action::LogIn, &engine());

        assert_eq!(transition.state.screen, Screen::Home);
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn test_toggle_interest() {
        let state = reduce(logged_in(&[]), Action::ToggleInterest("music".into()), &engine()).state;
        assert!(state.current_user.has_interest("music"));

        let transition = reduce(state, Action::ToggleInterest("music".into()), &engine());
        assert!(!transition.state.current_user.has_interest("music"));
        assert!(matches!(transition.effects.as_slice(), [Effect::PersistProfile(_)]));
    }

    #[test]
    fn test_right_swipe_with_mutual_interests_matches() {
        let transition = reduce(
            logged_in(&["music", "art"]),
            Action::Swipe(SwipeDirection::Right),
            &engine(),
        );
        let state = &transition.state;

        assert_eq!(state.screen, Screen::Match);
        assert_eq!(state.matches.len(), 1);
        assert_eq!(state.deck_index, 1);

        let current = state.current_match.as_ref().unwrap();
        assert_eq!(current.user.display_name, "Sarah");
        assert_eq!(current.mutual_interests, vec!["art", "music"]);
        assert_eq!(current.compatibility.interest_overlap_score, 67);

        assert_eq!(
            transition.effects,
            vec![Effect::FetchEvents {
                interests: vec!["art".to_string(), "music".to_string()],
                city: "London".to_string(),
            }]
        );
    }

    #[test]
    fn test_right_swipe_without_mutual_interests() {
        let transition = reduce(logged_in(&["knitting"]), Action::Swipe(SwipeDirection::Right), &engine());

        assert_eq!(transition.state.screen, Screen::Swipe);
        assert!(transition.state.matches.is_empty());
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn test_left_swipe_only_advances() {
        let transition = reduce(logged_in(&["music"]), Action::Swipe(SwipeDirection::Left), &engine());

        assert_eq!(transition.state.deck_index, 1);
        assert!(transition.state.matches.is_empty());
    }

    #[test]
    fn test_deck_wraps_around() {
        let mut state = logged_in(&[]);
        for _ in 0..3 {
            state = reduce(state, Action::Swipe(SwipeDirection::Left), &engine()).state;
        }
        assert_eq!(state.deck_index, 0);
    }

    #[test]
    fn test_swipe_on_empty_deck_is_noop() {
        let mut state = SessionState::with_deck(vec![]);
        state.screen = Screen::Swipe;

        let transition = reduce(state.clone(), Action::Swipe(SwipeDirection::Right), &engine());
        assert_eq!(transition.state, state);
    }

    #[test]
    fn test_view_events_fetches_only_when_empty() {
        let state = reduce(logged_in(&["food"]), Action::Swipe(SwipeDirection::Right), &engine()).state;

        let transition = reduce(state.clone(), Action::ViewEvents, &engine());
        assert_eq!(transition.state.screen, Screen::Events);
        assert_eq!(transition.effects.len(), 1);

        let loaded = reduce(state, Action::EventsLoaded(crate::core::catalog::fallback_events(["food"])), &engine()).state;
        let transition = reduce(loaded, Action::ViewEvents, &engine());
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn test_back_to_swipe_clears_match() {
        let state = reduce(logged_in(&["music"]), Action::Swipe(SwipeDirection::Right), &engine()).state;
        let state = reduce(state, Action::BackToSwipe, &engine()).state;

        assert_eq!(state.screen, Screen::Swipe);
        assert!(state.current_match.is_none());
        assert_eq!(state.matches.len(), 1);
    }

    #[test]
    fn test_open_match_reselects_recorded_match() {
        let state = reduce(logged_in(&["music"]), Action::Swipe(SwipeDirection::Right), &engine()).state;
        let state = reduce(state, Action::BackToSwipe, &engine()).state;
        let state = reduce(state, Action::EventsLoaded(crate::core::catalog::fallback_events(["music"])), &engine()).state;

        let state = reduce(state, Action::OpenMatch(0), &engine()).state;
        assert_eq!(state.current_match.as_ref().map(|m| m.user.display_name.as_str()), Some("Sarah"));
        assert!(state.suggested_events.is_empty());
    }

    #[test]
    fn test_open_match_out_of_range_is_noop() {
        let state = logged_in(&["music"]);
        let transition = reduce(state.clone(), Action::OpenMatch(3), &engine());

        assert_eq!(transition.state, state);
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn test_load_events_prefers_mutual_interests() {
        let state = reduce(logged_in(&["music", "tech"]), Action::Swipe(SwipeDirection::Right), &engine()).state;
        let transition = reduce(state, Action::LoadEvents, &engine());

        assert_eq!(
            transition.effects,
            vec![Effect::FetchEvents {
                interests: vec!["music".to_string()],
                city: "London".to_string(),
            }]
        );
    }

    #[test]
    fn test_load_events_without_match_uses_own_interests() {
        let transition = reduce(logged_in(&["tech", "coffee"]), Action::LoadEvents, &engine());

        assert_eq!(
            transition.effects,
            vec![Effect::FetchEvents {
                interests: vec!["coffee".to_string(), "tech".to_string()],
                city: "London".to_string(),
            }]
        );
    }

    #[test]
    fn test_load_events_defaults_to_music() {
        let transition = reduce(logged_in(&[]), Action::LoadEvents, &engine());

        assert!(matches!(
            transition.effects.as_slice(),
            [Effect::FetchEvents { interests, .. }] if interests == &["music".to_string()]
        ));
    }

    #[test]
    fn test_set_token_persists() {
        let transition = reduce(SessionState::default(), Action::SetToken("abc".into()), &engine());
        assert_eq!(transition.state.token, "abc");
        assert_eq!(transition.effects, vec![Effect::PersistToken("abc".into())]);
    }

    #[test]
    fn test_update_profile_patch() {
        let patch = ProfilePatch {
            city: Some("Leeds".into()),
            age: Some(Some(30)),
            ..ProfilePatch::default()
        };
        let state = reduce(logged_in(&[]), Action::UpdateProfile(patch), &engine()).state;

        assert_eq!(state.current_user.city, "Leeds");
        assert_eq!(state.current_user.age, Some(30));
        assert_eq!(state.current_user.display_name, "Tester");
    }
}
