//! Error taxonomy.
//!
//! Bad payloads are reported to the caller at the call site and never reach
//! the run loop. The loop itself has no error path: everything it does is
//! in-memory arithmetic on already-validated values.

use thiserror::Error;

/// A caller-supplied vector or appraisal that cannot be turned into a value object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("expected {expected} components, found {found}")]
    Arity { expected: usize, found: usize },

    #[error("component {index} is not a finite number")]
    NonFinite { index: usize },

    #[error("intensity for `{emotion}` must be finite and non-negative")]
    NegativeIntensity { emotion: String },

    #[error("unknown emotion `{0}`")]
    UnknownEmotion(String),

    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Failures surfaced by the agent handle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("invalid stimulus: {0}")]
    InvalidStimulus(#[source] InputError),

    #[error("invalid personality: {0}")]
    InvalidPersonality(#[source] InputError),

    #[error("agent loop already started")]
    AlreadyStarted,

    #[error("agent loop has not been started")]
    NotStarted,

    #[error("agent loop is gone, command was not delivered")]
    Disconnected,

    #[error("no tokio runtime to run the agent loop on")]
    NoRuntime,

    #[error("agent loop terminated abnormally")]
    LoopPanicked,
}

/// Check that every component of `values` is finite, reporting the first offender.
pub(crate) fn check_finite(values: &[f32]) -> Result<(), InputError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(InputError::NonFinite { index }),
        None => Ok(()),
    }
}

/// Check that `values` has exactly `expected` components.
pub(crate) fn check_arity(values: &[f32], expected: usize) -> Result<(), InputError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(InputError::Arity {
            expected,
            found: values.len(),
        })
    }
}
