//! Simulation state: XP, levels, reward tokens, balances and phase sets.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::content::{JourneyContent, JourneyPhase, NftBadge, Persona, Rarity, Reward};
use crate::progress;

/// Millisecond clock used to stamp reward tokens. Injectable for tests.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Balance guard failures for the token wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },
    #[error("insufficient staked tokens: requested {requested}, staked {staked}")]
    InsufficientStake { requested: u64, staked: u64 },
}

/// Rich per-user progression state machine.
///
/// Stricter than [`JourneyStore`](crate::JourneyStore) about the cursor: any
/// move must land on a phase already present in `unlocked_phases`, which is
/// seeded with phase 0 and only ever grows. `completed_phases` and
/// `unlocked_phases` are sets, so repeating an action cannot inflate
/// count-based statistics. `level` is always a pure function of `total_xp`.
#[derive(Debug, Clone)]
pub struct SimulationStore {
    pub persona: Option<Persona>,
    pub current_journey: Option<JourneyContent>,
    pub current_phase_index: usize,
    pub total_xp: u32,
    pub level: u32,
    /// Append-only; duplicate token ids stay as distinct entries.
    pub nfts: Vec<NftBadge>,
    pub token_balance: u64,
    pub staked_tokens: u64,
    pub completed_phases: BTreeSet<usize>,
    pub unlocked_phases: BTreeSet<usize>,

    // Transient UI state, never persisted.
    pub loading: bool,
    pub error: Option<String>,
    pub reward: Option<Reward>,
    pub is_phase_transitioning: bool,
    pub active_modal: Option<String>,

    clock: Clock,
}

/// Fields of the simulation store that survive a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    #[serde(default)]
    pub persona: Option<Persona>,
    #[serde(default)]
    pub current_journey: Option<JourneyContent>,
    #[serde(default)]
    pub current_phase_index: usize,
    #[serde(default)]
    pub total_xp: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub nfts: Vec<NftBadge>,
    #[serde(default)]
    pub token_balance: u64,
    #[serde(default)]
    pub staked_tokens: u64,
    #[serde(default)]
    pub completed_phases: BTreeSet<usize>,
    #[serde(default = "seed_unlocked")]
    pub unlocked_phases: BTreeSet<usize>,
}

fn seed_unlocked() -> BTreeSet<usize> {
    BTreeSet::from([0])
}

impl Default for SimulationStore {
    fn default() -> Self {
        Self {
            persona: None,
            current_journey: None,
            current_phase_index: 0,
            total_xp: 0,
            level: 1,
            nfts: Vec::new(),
            token_balance: 0,
            staked_tokens: 0,
            completed_phases: BTreeSet::new(),
            unlocked_phases: seed_unlocked(),
            loading: false,
            error: None,
            reward: None,
            is_phase_transitioning: false,
            active_modal: None,
            clock: system_clock,
        }
    }
}

impl SimulationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with an injected clock, for deterministic tests.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Rehydrate from a persisted snapshot. The level is recomputed from the
    /// stored XP rather than trusted, and the unlocked set is re-seeded with
    /// phase 0 in case an old blob lost it.
    #[must_use]
    pub fn from_snapshot(snapshot: SimulationSnapshot) -> Self {
        let mut unlocked = snapshot.unlocked_phases;
        unlocked.insert(0);
        Self {
            persona: snapshot.persona,
            current_journey: snapshot.current_journey,
            current_phase_index: snapshot.current_phase_index,
            total_xp: snapshot.total_xp,
            level: progress::level_for_xp(snapshot.total_xp),
            nfts: snapshot.nfts,
            token_balance: snapshot.token_balance,
            staked_tokens: snapshot.staked_tokens,
            completed_phases: snapshot.completed_phases,
            unlocked_phases: unlocked,
            ..Self::default()
        }
    }

    /// The fields worth persisting.
    #[must_use]
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            persona: self.persona,
            current_journey: self.current_journey.clone(),
            current_phase_index: self.current_phase_index,
            total_xp: self.total_xp,
            level: self.level,
            nfts: self.nfts.clone(),
            token_balance: self.token_balance,
            staked_tokens: self.staked_tokens,
            completed_phases: self.completed_phases.clone(),
            unlocked_phases: self.unlocked_phases.clone(),
        }
    }

    pub fn set_current_persona(&mut self, persona: Persona) {
        self.persona = Some(persona);
    }

    /// Select a journey: cursor to 0, completed cleared, unlocked re-seeded
    /// with just the first phase, regardless of prior state.
    pub fn set_current_journey(&mut self, journey: JourneyContent) {
        self.current_journey = Some(journey);
        self.current_phase_index = 0;
        self.completed_phases.clear();
        self.unlocked_phases = seed_unlocked();
    }

    /// Move the cursor to `index`, clamped into phase bounds; the clamped
    /// destination must additionally be unlocked or nothing moves.
    pub fn set_current_phase_index(&mut self, index: isize) {
        let Some(journey) = &self.current_journey else {
            return;
        };
        if journey.phases.is_empty() {
            return;
        }
        let max_index = journey.phases.len() - 1;
        let safe_index = index.clamp(0, max_index as isize).unsigned_abs();
        if self.unlocked_phases.contains(&safe_index) {
            self.current_phase_index = safe_index;
        }
    }

    /// Add XP and recompute the level from the new total.
    pub fn add_xp(&mut self, amount: u32) {
        self.total_xp = self.total_xp.saturating_add(amount);
        self.level = progress::level_for_xp(self.total_xp);
    }

    /// Append a reward token, stamped with the current time. No dedup: a
    /// token granted twice is two collection entries.
    pub fn add_nft(&mut self, mut nft: NftBadge) {
        nft.unlocked_at = (self.clock)();
        self.nfts.push(nft);
    }

    /// Ids of every owned reward token, in grant order. Feed for the unlock
    /// predicate.
    #[must_use]
    pub fn owned_nft_ids(&self) -> Vec<String> {
        self.nfts.iter().map(|nft| nft.id.clone()).collect()
    }

    /// Number of owned tokens of a rarity tier; duplicates count separately.
    #[must_use]
    pub fn rarity_count(&self, rarity: Rarity) -> usize {
        self.nfts.iter().filter(|nft| nft.rarity == rarity).count()
    }

    /// Credit liquid tokens.
    pub fn add_tokens(&mut self, amount: u64) {
        self.token_balance = self.token_balance.saturating_add(amount);
    }

    /// Move tokens from the liquid balance into the staked pool.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InsufficientBalance`] when the liquid balance
    /// cannot cover `amount`; balances are never driven negative.
    pub fn stake_tokens(&mut self, amount: u64) -> Result<(), WalletError> {
        if amount > self.token_balance {
            return Err(WalletError::InsufficientBalance {
                requested: amount,
                available: self.token_balance,
            });
        }
        self.token_balance -= amount;
        self.staked_tokens += amount;
        Ok(())
    }

    /// Move tokens from the staked pool back to the liquid balance.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InsufficientStake`] when the staked pool cannot
    /// cover `amount`.
    pub fn unstake_tokens(&mut self, amount: u64) -> Result<(), WalletError> {
        if amount > self.staked_tokens {
            return Err(WalletError::InsufficientStake {
                requested: amount,
                staked: self.staked_tokens,
            });
        }
        self.staked_tokens -= amount;
        self.token_balance += amount;
        Ok(())
    }

    /// Record a phase as completed and unlock its successor. Completing a
    /// phase that was never unlocked is a no-op: the completed set stays a
    /// subset of the unlocked set.
    pub fn complete_phase(&mut self, index: usize) {
        let Some(journey) = &self.current_journey else {
            return;
        };
        if !self.unlocked_phases.contains(&index) {
            return;
        }
        self.completed_phases.insert(index);
        if index + 1 < journey.phases.len() {
            self.unlocked_phases.insert(index + 1);
        }
    }

    /// Unlock a phase directly.
    pub fn unlock_phase(&mut self, index: usize) {
        self.unlocked_phases.insert(index);
    }

    /// Advance the cursor if the next phase exists and is unlocked.
    pub fn next_phase(&mut self) {
        let Some(journey) = &self.current_journey else {
            return;
        };
        let next = self.current_phase_index + 1;
        if next < journey.phases.len() && self.unlocked_phases.contains(&next) {
            self.current_phase_index = next;
        }
    }

    /// Step the cursor back if the previous phase is unlocked.
    pub fn previous_phase(&mut self) {
        let Some(prev) = self.current_phase_index.checked_sub(1) else {
            return;
        };
        if self.unlocked_phases.contains(&prev) {
            self.current_phase_index = prev;
        }
    }

    /// Restore initial values; the injected clock is kept.
    pub fn reset(&mut self) {
        *self = Self {
            clock: self.clock,
            ..Self::default()
        };
    }

    // Transient UI actions.

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn show_reward(&mut self, reward: Reward) {
        self.reward = Some(reward);
    }

    pub fn hide_reward(&mut self) {
        self.reward = None;
    }

    pub fn start_phase_transition(&mut self) {
        self.is_phase_transitioning = true;
    }

    pub fn end_phase_transition(&mut self) {
        self.is_phase_transitioning = false;
    }

    pub fn set_active_modal(&mut self, modal: Option<String>) {
        self.active_modal = modal;
    }

    // Selectors.

    /// Phase under the cursor, if any.
    #[must_use]
    pub fn current_phase(&self) -> Option<&JourneyPhase> {
        self.current_journey
            .as_ref()
            .and_then(|j| j.phase(self.current_phase_index))
    }

    /// The phase after the cursor, only when it is already unlocked.
    #[must_use]
    pub fn next_unlocked_phase(&self) -> Option<&JourneyPhase> {
        let journey = self.current_journey.as_ref()?;
        let next = self.current_phase_index + 1;
        if self.unlocked_phases.contains(&next) {
            journey.phase(next)
        } else {
            None
        }
    }

    /// The phase before the cursor, only when it is unlocked.
    #[must_use]
    pub fn previous_unlocked_phase(&self) -> Option<&JourneyPhase> {
        let journey = self.current_journey.as_ref()?;
        let prev = self.current_phase_index.checked_sub(1)?;
        if self.unlocked_phases.contains(&prev) {
            journey.phase(prev)
        } else {
            None
        }
    }

    /// Membership test against the unlocked set.
    #[must_use]
    pub fn is_phase_unlocked(&self, index: usize) -> bool {
        self.unlocked_phases.contains(&index)
    }

    /// Membership test against the completed set.
    #[must_use]
    pub fn is_phase_completed(&self, index: usize) -> bool {
        self.completed_phases.contains(&index)
    }

    /// Share of the current journey's phases completed, as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percentage(&self) -> f32 {
        let Some(journey) = &self.current_journey else {
            return 0.0;
        };
        if journey.phases.is_empty() {
            return 0.0;
        }
        self.completed_phases.len() as f32 / journey.phases.len() as f32 * 100.0
    }

    /// Percentage progress within the current level.
    #[must_use]
    pub fn level_progress(&self) -> f32 {
        progress::level_progress_pct(self.total_xp)
    }

    /// XP threshold at which the next level starts.
    #[must_use]
    pub fn required_xp_for_next_level(&self) -> u32 {
        progress::required_xp_for_next_level(self.level)
    }
}
