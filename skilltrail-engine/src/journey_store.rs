//! Journey selection and phase navigation state.
use serde::{Deserialize, Serialize};

use crate::ContentProvider;
use crate::content::{JourneyContent, JourneyPhase};
use crate::error::{FetchContext, describe_failure, empty_result_message};
use crate::repository::JourneyRepository;
use crate::unlock;

/// State container for journey browsing: the loaded journey list, the
/// selected journey and its phase cursor. No ambient singleton; construct as
/// many independent instances as needed.
///
/// Fetch operations never panic and never propagate errors; failures land in
/// `error` as a classified, human-readable string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JourneyStore {
    pub journeys: Vec<JourneyContent>,
    pub current_journey: Option<JourneyContent>,
    pub current_phase_index: usize,
    pub loading: bool,
    pub error: Option<String>,
}

/// Fields of the journey store that survive a reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySnapshot {
    #[serde(default)]
    pub current_journey: Option<JourneyContent>,
    #[serde(default)]
    pub current_phase_index: usize,
}

impl JourneyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from a persisted snapshot. Only the selected journey and the
    /// cursor survive; the journey list and transient flags start fresh.
    #[must_use]
    pub fn from_snapshot(snapshot: JourneySnapshot) -> Self {
        let mut store = Self {
            current_journey: snapshot.current_journey,
            ..Self::default()
        };
        // Stored cursors are re-clamped in case the journey shrank.
        if store.current_journey.is_some() {
            let cursor = isize::try_from(snapshot.current_phase_index).unwrap_or(isize::MAX);
            store.set_current_phase_index(cursor);
        }
        store
    }

    /// The fields worth persisting.
    #[must_use]
    pub fn snapshot(&self) -> JourneySnapshot {
        JourneySnapshot {
            current_journey: self.current_journey.clone(),
            current_phase_index: self.current_phase_index,
        }
    }

    /// Load every available journey into the store.
    pub fn fetch_all_journeys<P: ContentProvider>(&mut self, repo: &JourneyRepository<P>) {
        self.loading = true;
        self.error = None;
        match repo.get_all_journeys() {
            Ok(journeys) if journeys.is_empty() => {
                self.journeys = Vec::new();
                self.error = Some(empty_result_message(FetchContext::AllJourneys));
            }
            Ok(journeys) => {
                self.journeys = journeys;
            }
            Err(err) => {
                self.error = Some(describe_failure(FetchContext::AllJourneys, &err.to_string()));
            }
        }
        self.loading = false;
    }

    /// Load the journeys for one persona; the first result becomes the
    /// current journey.
    pub fn fetch_journeys_by_persona<P: ContentProvider>(
        &mut self,
        repo: &JourneyRepository<P>,
        persona: &str,
    ) {
        self.loading = true;
        self.error = None;
        match repo.get_journeys_by_persona(persona) {
            Ok(journeys) if journeys.is_empty() => {
                self.journeys = Vec::new();
                self.error = Some(empty_result_message(FetchContext::Persona(persona)));
            }
            Ok(journeys) => {
                self.set_current_journey(journeys.first().cloned());
                self.journeys = journeys;
            }
            Err(err) => {
                self.error = Some(describe_failure(
                    FetchContext::Persona(persona),
                    &err.to_string(),
                ));
            }
        }
        self.loading = false;
    }

    /// Resolve a slug and make the result the current journey.
    pub fn fetch_journey_by_slug<P: ContentProvider>(
        &mut self,
        repo: &JourneyRepository<P>,
        slug: &str,
    ) {
        self.loading = true;
        self.error = None;
        match repo.get_journey_by_slug(slug) {
            Ok(Some(journey)) => {
                self.set_current_journey(Some(journey));
            }
            Ok(None) => {
                self.error = Some(empty_result_message(FetchContext::Slug(slug)));
            }
            Err(err) => {
                self.error = Some(describe_failure(FetchContext::Slug(slug), &err.to_string()));
            }
        }
        self.loading = false;
    }

    /// Replace the current journey and reset the cursor to the first phase.
    pub fn set_current_journey(&mut self, journey: Option<JourneyContent>) {
        self.current_journey = journey;
        self.current_phase_index = 0;
    }

    /// Move the cursor, clamped into the journey's phase bounds. No-op when
    /// no journey is selected.
    pub fn set_current_phase_index(&mut self, index: isize) {
        let Some(journey) = &self.current_journey else {
            return;
        };
        if journey.phases.is_empty() {
            self.current_phase_index = 0;
            return;
        }
        let max_index = journey.phases.len() - 1;
        let clamped = index.clamp(0, max_index as isize);
        self.current_phase_index = clamped.unsigned_abs();
    }

    /// Advance the cursor one phase, staying inside bounds.
    pub fn next_phase(&mut self) {
        let Some(journey) = &self.current_journey else {
            return;
        };
        if self.current_phase_index + 1 < journey.phases.len() {
            self.current_phase_index += 1;
        }
    }

    /// Step the cursor back one phase, staying at the start if already there.
    pub fn previous_phase(&mut self) {
        if self.current_journey.is_some() {
            self.current_phase_index = self.current_phase_index.saturating_sub(1);
        }
    }

    /// Cursor back to the first phase; the journey selection is retained.
    pub fn reset_journey(&mut self) {
        self.current_phase_index = 0;
    }

    /// Phase under the cursor, if any.
    #[must_use]
    pub fn current_phase(&self) -> Option<&JourneyPhase> {
        self.current_journey
            .as_ref()
            .and_then(|j| j.phase(self.current_phase_index))
    }

    /// Whether the phase at `index` is accessible for a user with the given
    /// XP and reward tokens. Out-of-range indices and a missing journey are
    /// simply locked.
    #[must_use]
    pub fn is_phase_unlocked(
        &self,
        index: usize,
        user_xp: u32,
        user_nfts: Option<&[String]>,
    ) -> bool {
        let Some(journey) = &self.current_journey else {
            return false;
        };
        journey
            .phase(index)
            .is_some_and(|phase| unlock::is_phase_unlocked(phase, user_xp, user_nfts))
    }
}
