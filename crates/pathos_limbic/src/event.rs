//! Stimulus events and the law their influence decays by.
//!
//! The run loop only relies on the decay contract: influence is non-negative,
//! never increases as time passes, and is exactly zero once the event's
//! duration has elapsed. Any curve honouring that can be plugged in.

use pathos_core::{DecayKind, Mood};
use std::time::Duration;

/// How an event's pull fades over its lifetime.
pub trait Decay: Send + Sync {
    /// Influence in [0, 1] after `elapsed` of an event lasting `duration`.
    fn influence(&self, elapsed: Duration, duration: Duration) -> f32;
}

/// Fraction of the lifetime still remaining, or `None` once expired.
fn remaining(elapsed: Duration, duration: Duration) -> Option<f64> {
    if duration.is_zero() || elapsed >= duration {
        return None;
    }
    Some(1.0 - elapsed.as_secs_f64() / duration.as_secs_f64())
}

/// `max(0, 1 - t/d)`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearDecay;

impl Decay for LinearDecay {
    fn influence(&self, elapsed: Duration, duration: Duration) -> f32 {
        remaining(elapsed, duration).map_or(0.0, |r| r as f32)
    }
}

/// `max(0, 1 - t/d)^2`
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticDecay;

impl Decay for QuadraticDecay {
    fn influence(&self, elapsed: Duration, duration: Duration) -> f32 {
        remaining(elapsed, duration).map_or(0.0, |r| (r * r) as f32)
    }
}

pub fn decay_law(kind: DecayKind) -> Box<dyn Decay> {
    match kind {
        DecayKind::Linear => Box::new(LinearDecay),
        DecayKind::Quadratic => Box::new(QuadraticDecay),
    }
}

/// An immutable pull toward `target`, stamped on the loop's simulation clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StimulusEvent {
    pub target: Mood,
    /// Simulation time at which the event was queued.
    pub created_at: Duration,
    pub duration: Duration,
}

impl StimulusEvent {
    pub fn new(target: Mood, created_at: Duration, duration: Duration) -> Self {
        Self {
            target,
            created_at,
            duration,
        }
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }

    pub fn influence(&self, now: Duration, law: &dyn Decay) -> f32 {
        law.influence(self.elapsed(now), self.duration)
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.elapsed(now) >= self.duration
    }
}
