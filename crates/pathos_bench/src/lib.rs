//! pathos_bench: trajectory simulation tests for the affective loop.
//!
//! Drives [`AgentState`] directly, without a runtime, over long simulated
//! spans:
//! - Idle recovery after a sustained stimulus
//! - Random stimulus storms under tick jitter
//! - Neuroticism differentiation (same stimulus, different speeds)
//! - Decay law comparison (linear vs quadratic weighting)

use pathos_core::Mood;
use pathos_limbic::AgentState;
use rand::Rng;
use std::time::Duration;

/// Run `total` of wall-clock time in ticks of `tick`, recording the mood after each tick.
pub fn simulate(state: &mut AgentState, total: Duration, tick: Duration) -> Vec<Mood> {
    let mut trajectory = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        state.tick(tick);
        elapsed += tick;
        trajectory.push(state.mood());
    }
    trajectory
}

/// Like [`simulate`], but each tick lasts a random 1..=`max_tick_ms` milliseconds.
pub fn simulate_jittered<R: Rng>(
    state: &mut AgentState,
    total: Duration,
    max_tick_ms: u64,
    rng: &mut R,
) -> Vec<Mood> {
    let mut trajectory = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        let tick = Duration::from_millis(rng.gen_range(1..=max_tick_ms));
        state.tick(tick);
        elapsed += tick;
        trajectory.push(state.mood());
    }
    trajectory
}
