use crate::core::{reduce, Action, CityProximity, CompatibilityEngine, Effect, ProximityEstimator, SessionState};
use crate::services::events_client::EventSuggester;
use crate::services::storage::{KeyValueStore, SessionStorage, StorageError};
use std::collections::VecDeque;

/// Drives the session reducer and carries out its effects
///
/// Profile and token changes are written through to storage as they happen;
/// event fetches are awaited and fed back as [`Action::EventsLoaded`].
pub struct SessionRunner<S, P = CityProximity> {
    state: SessionState,
    engine: CompatibilityEngine<P>,
    storage: SessionStorage<S>,
    suggester: EventSuggester,
}

impl<S: KeyValueStore, P: ProximityEstimator> SessionRunner<S, P> {
    /// Restore the persisted profile and token and start at the login screen
    pub fn start(
        storage: SessionStorage<S>,
        suggester: EventSuggester,
        engine: CompatibilityEngine<P>,
    ) -> Result<Self, StorageError> {
        let profile = storage.load_profile()?;
        let token = storage.load_token()?;

        tracing::debug!(
            "Restored session (profile: {}, token: {})",
            profile.is_some(),
            token.is_some()
        );

        Ok(Self {
            state: SessionState::restore(profile, token),
            engine,
            storage,
            suggester,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn storage(&self) -> &SessionStorage<S> {
        &self.storage
    }

    /// Apply an action and every follow-up action its effects produce
    ///
    /// State changes are never rolled back. Event fetches run before writes, and a
    /// failed write does not stop the remaining effects; the first storage error
    /// is returned once the queue has drained.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), StorageError> {
        let mut pending = VecDeque::from([action]);
        let mut failure: Option<StorageError> = None;

        while let Some(action) = pending.pop_front() {
            let transition = reduce(std::mem::take(&mut self.state), action, &self.engine);
            self.state = transition.state;

            let (fetches, writes): (Vec<Effect>, Vec<Effect>) = transition
                .effects
                .into_iter()
                .partition(|effect| matches!(effect, Effect::FetchEvents { .. }));

            for effect in fetches.into_iter().chain(writes) {
                let written = match effect {
                    Effect::FetchEvents { interests, city } => {
                        let events = self
                            .suggester
                            .suggest(&interests, &city, &self.state.token)
                            .await;
                        pending.push_back(Action::EventsLoaded(events));
                        Ok(())
                    }
                    Effect::PersistProfile(profile) => self.storage.save_profile(&profile),
                    Effect::PersistToken(token) => self.storage.save_token(&token),
                };

                if let Err(e) = written {
                    tracing::warn!("Failed to persist session state: {}", e);
                    failure.get_or_insert(e);
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
