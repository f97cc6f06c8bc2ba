//! Caller-facing payloads for the agent's command interface.
//!
//! Both types accept a few shapes and resolve to a validated value object.
//! Resolution happens on the caller's thread, before anything is queued.

use crate::appraisal::Appraisal;
use crate::error::{check_finite, InputError};
use crate::mood::Mood;
use crate::personality::Personality;
use serde::{Deserialize, Serialize};

/// Something that pulls the mood toward a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stimulus {
    /// A PAD target given directly.
    Mood(Mood),
    /// An OCC appraisal folded into a PAD target.
    Appraisal(Appraisal),
    /// An untyped vector; must have exactly three finite components.
    Raw(Vec<f32>),
}

impl Stimulus {
    pub fn resolve(self) -> Result<Mood, InputError> {
        match self {
            // Fields are public, so re-run the constructor's rescale
            Stimulus::Mood(mood) => {
                let values = mood.as_array();
                check_finite(&values)?;
                Ok(Mood::from(values))
            }
            Stimulus::Appraisal(appraisal) => {
                appraisal.validate()?;
                Ok(appraisal.to_mood())
            }
            Stimulus::Raw(values) => Mood::try_from(values.as_slice()),
        }
    }
}

impl From<Mood> for Stimulus {
    fn from(mood: Mood) -> Self {
        Stimulus::Mood(mood)
    }
}

impl From<Appraisal> for Stimulus {
    fn from(appraisal: Appraisal) -> Self {
        Stimulus::Appraisal(appraisal)
    }
}

impl From<Vec<f32>> for Stimulus {
    fn from(values: Vec<f32>) -> Self {
        Stimulus::Raw(values)
    }
}

impl From<[f32; 3]> for Stimulus {
    fn from(values: [f32; 3]) -> Self {
        Stimulus::Raw(values.to_vec())
    }
}

/// A personality to rest on. Omitted or empty input means neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityInput {
    #[default]
    Neutral,
    Traits(Personality),
    /// An untyped vector; must be empty or have exactly five finite components.
    Raw(Vec<f32>),
}

impl PersonalityInput {
    pub fn resolve(self) -> Result<Personality, InputError> {
        match self {
            PersonalityInput::Neutral => Ok(Personality::neutral()),
            PersonalityInput::Traits(p) => {
                let values = p.as_array();
                check_finite(&values)?;
                Ok(Personality::from(values))
            }
            PersonalityInput::Raw(values) if values.is_empty() => Ok(Personality::neutral()),
            PersonalityInput::Raw(values) => Personality::try_from(values.as_slice()),
        }
    }
}

impl From<Personality> for PersonalityInput {
    fn from(p: Personality) -> Self {
        PersonalityInput::Traits(p)
    }
}

impl From<Option<Personality>> for PersonalityInput {
    fn from(p: Option<Personality>) -> Self {
        p.map_or(PersonalityInput::Neutral, PersonalityInput::Traits)
    }
}

impl From<Vec<f32>> for PersonalityInput {
    fn from(values: Vec<f32>) -> Self {
        PersonalityInput::Raw(values)
    }
}

impl From<[f32; 5]> for PersonalityInput {
    fn from(values: [f32; 5]) -> Self {
        PersonalityInput::Raw(values.to_vec())
    }
}
