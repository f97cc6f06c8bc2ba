//! # Pathos Core
//!
//! Value objects for the affective agent. Everything here is pure and
//! stateless; the run loop that animates these values lives in
//! `pathos_limbic`.
//!
//! - [`Mood`]: a point in PAD space (pleasure, arousal, dominance)
//! - [`Personality`]: Big Five traits and their resting mood
//! - [`Appraisal`]: OCC emotion intensities folded into a PAD target
//! - [`Stimulus`] / [`PersonalityInput`]: the shapes callers may submit

pub mod appraisal;
pub mod config;
pub mod error;
pub mod input;
pub mod mood;
pub mod personality;

pub use appraisal::{Appraisal, Emotion};
pub use config::{AgentConfig, DecayKind, LoggingConfig, PathosConfig, PersonalityConfig};
pub use error::{AgentError, InputError};
pub use input::{PersonalityInput, Stimulus};
pub use mood::{IntensityLevel, Mood, MoodOctant};
pub use personality::{remap, Personality};
