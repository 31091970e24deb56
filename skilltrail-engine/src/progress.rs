//! XP and level arithmetic.
//!
//! Two progress derivations coexist on purpose. The simulation store levels
//! up every [`XP_PER_LEVEL`] points, while the journey progress bar treats
//! [`JOURNEY_XP_TARGET`] points as a full journey and blends that with the
//! cursor position. Callers pick the derivation that matches their surface;
//! the two are never mixed implicitly.

/// XP required per simulation level.
pub const XP_PER_LEVEL: u32 = 1_000;

/// Total XP treated as completing a whole journey by the progress bar.
pub const JOURNEY_XP_TARGET: u32 = 500;

/// Level derived from lifetime XP. Level 1 starts at zero XP.
#[must_use]
pub const fn level_for_xp(total_xp: u32) -> u32 {
    total_xp / XP_PER_LEVEL + 1
}

/// XP threshold at which `level` rolls over to the next one.
#[must_use]
pub const fn required_xp_for_next_level(level: u32) -> u32 {
    level * XP_PER_LEVEL
}

/// Percentage progress within the current level, `0.0..100.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn level_progress_pct(total_xp: u32) -> f32 {
    let into_level = total_xp % XP_PER_LEVEL;
    into_level as f32 / XP_PER_LEVEL as f32 * 100.0
}

/// Journey progress bar percentage: the better of the XP-based estimate
/// (capped at 100) and the cursor-based estimate. A journey with a single
/// phase has no cursor progress to speak of.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn journey_progress_pct(total_xp: u32, cursor: usize, phase_count: usize) -> f32 {
    if phase_count == 0 {
        return 0.0;
    }
    let xp_pct = (total_xp as f32 / JOURNEY_XP_TARGET as f32 * 100.0).min(100.0);
    let cursor_pct = if phase_count > 1 {
        cursor as f32 / (phase_count - 1) as f32 * 100.0
    } else {
        0.0
    };
    xp_pct.max(cursor_pct)
}
