//! OCC appraisal samples: 24 emotion intensities folded into a PAD target.
//!
//! Each emotion carries a fixed PAD coefficient triple (Gebhard's ALMA
//! mapping). An appraisal is a sparse set of intensities; emotions that are
//! not mentioned contribute nothing.

use crate::error::InputError;
use crate::mood::Mood;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    // Positive
    Admiration,
    Gloating,
    Gratification,
    Gratitude,
    Hope,
    HappyFor,
    Joy,
    Liking,
    Love,
    Pride,
    Relief,
    Satisfaction,
    // Negative
    Anger,
    Disliking,
    Disappointment,
    Distress,
    Fear,
    FearsConfirmed,
    Hate,
    Pity,
    Remorse,
    Reproach,
    Resentment,
    Shame,
}

impl Emotion {
    pub const ALL: [Emotion; 24] = [
        Emotion::Admiration,
        Emotion::Gloating,
        Emotion::Gratification,
        Emotion::Gratitude,
        Emotion::Hope,
        Emotion::HappyFor,
        Emotion::Joy,
        Emotion::Liking,
        Emotion::Love,
        Emotion::Pride,
        Emotion::Relief,
        Emotion::Satisfaction,
        Emotion::Anger,
        Emotion::Disliking,
        Emotion::Disappointment,
        Emotion::Distress,
        Emotion::Fear,
        Emotion::FearsConfirmed,
        Emotion::Hate,
        Emotion::Pity,
        Emotion::Remorse,
        Emotion::Reproach,
        Emotion::Resentment,
        Emotion::Shame,
    ];

    /// PAD coefficients `[P, A, D]`.
    pub fn pad_weights(&self) -> [f32; 3] {
        match self {
            Emotion::Admiration => [0.5, 0.3, -0.2],
            Emotion::Gloating => [0.3, -0.3, -0.1],
            Emotion::Gratification => [0.6, 0.5, 0.4],
            Emotion::Gratitude => [0.4, 0.2, -0.3],
            Emotion::Hope => [0.2, 0.2, -0.1],
            Emotion::HappyFor => [0.4, 0.2, 0.2],
            Emotion::Joy => [0.4, 0.2, 0.1],
            Emotion::Liking => [0.4, 0.16, -0.24],
            Emotion::Love => [0.3, 0.1, 0.2],
            Emotion::Pride => [0.4, 0.3, 0.3],
            Emotion::Relief => [0.2, -0.3, 0.4],
            Emotion::Satisfaction => [0.3, -0.2, 0.4],

            Emotion::Anger => [-0.51, 0.59, 0.25],
            Emotion::Disliking => [-0.4, 0.2, 0.1],
            Emotion::Disappointment => [-0.3, 0.1, -0.4],
            Emotion::Distress => [-0.4, -0.2, -0.5],
            Emotion::Fear => [-0.64, 0.6, -0.43],
            Emotion::FearsConfirmed => [-0.5, -0.3, -0.7],
            Emotion::Hate => [-0.6, 0.6, 0.3],
            Emotion::Pity => [-0.4, -0.2, -0.5],
            Emotion::Remorse => [-0.3, 0.1, -0.6],
            Emotion::Reproach => [-0.3, -0.1, 0.4],
            Emotion::Resentment => [-0.2, -0.3, -0.2],
            Emotion::Shame => [-0.3, 0.1, -0.6],
        }
    }

    /// +1 for positively valenced emotions, -1 for negative ones.
    pub fn valence(&self) -> i8 {
        if self.pad_weights()[0] >= 0.0 {
            1
        } else {
            -1
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Admiration => "admiration",
            Emotion::Gloating => "gloating",
            Emotion::Gratification => "gratification",
            Emotion::Gratitude => "gratitude",
            Emotion::Hope => "hope",
            Emotion::HappyFor => "happy_for",
            Emotion::Joy => "joy",
            Emotion::Liking => "liking",
            Emotion::Love => "love",
            Emotion::Pride => "pride",
            Emotion::Relief => "relief",
            Emotion::Satisfaction => "satisfaction",
            Emotion::Anger => "anger",
            Emotion::Disliking => "disliking",
            Emotion::Disappointment => "disappointment",
            Emotion::Distress => "distress",
            Emotion::Fear => "fear",
            Emotion::FearsConfirmed => "fears_confirmed",
            Emotion::Hate => "hate",
            Emotion::Pity => "pity",
            Emotion::Remorse => "remorse",
            Emotion::Reproach => "reproach",
            Emotion::Resentment => "resentment",
            Emotion::Shame => "shame",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('-', "_");
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == needle)
            .ok_or_else(|| InputError::UnknownEmotion(s.trim().to_string()))
    }
}

/// A sparse emotion-intensity vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Appraisal {
    intensities: BTreeMap<Emotion, f32>,
}

impl Appraisal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, emotion: Emotion, intensity: f32) -> Self {
        self.set(emotion, intensity);
        self
    }

    pub fn set(&mut self, emotion: Emotion, intensity: f32) {
        self.intensities.insert(emotion, intensity);
    }

    /// Intensity of `emotion`, 0.0 when absent.
    pub fn get(&self, emotion: Emotion) -> f32 {
        self.intensities.get(&emotion).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        self.intensities.iter().map(|(e, v)| (*e, *v))
    }

    /// Every intensity must be finite and non-negative.
    pub fn validate(&self) -> Result<(), InputError> {
        for (emotion, intensity) in self.iter() {
            if !intensity.is_finite() || intensity < 0.0 {
                return Err(InputError::NegativeIntensity {
                    emotion: emotion.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Sum of `intensity × coefficient` per axis, rescaled into the unit cube.
    ///
    /// Accumulates in `f64` so that intensities near `f32::MAX` cannot
    /// overflow the sums before the rescale.
    pub fn to_mood(&self) -> Mood {
        let mut pad = [0.0f64; 3];
        for (emotion, intensity) in self.iter() {
            for (acc, w) in pad.iter_mut().zip(emotion.pad_weights()) {
                *acc += f64::from(intensity) * f64::from(w);
            }
        }
        let norm = pad.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        if norm > 1.0 {
            for v in pad.iter_mut() {
                *v /= norm;
            }
        }
        Mood::new(pad[0] as f32, pad[1] as f32, pad[2] as f32)
    }
}

impl FromIterator<(Emotion, f32)> for Appraisal {
    fn from_iter<T: IntoIterator<Item = (Emotion, f32)>>(iter: T) -> Self {
        Self {
            intensities: iter.into_iter().collect(),
        }
    }
}

/// Parses `"joy=0.8,fear=0.2"`. A bare emotion name means intensity 1.0.
impl FromStr for Appraisal {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut appraisal = Appraisal::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = match part.split_once('=') {
                Some((name, value)) => {
                    let value: f32 = value
                        .trim()
                        .parse()
                        .map_err(|_| InputError::Malformed(part.to_string()))?;
                    (name, value)
                }
                None => (part, 1.0),
            };
            appraisal.set(name.parse()?, value);
        }
        if appraisal.is_empty() {
            return Err(InputError::Malformed(s.to_string()));
        }
        appraisal.validate()?;
        Ok(appraisal)
    }
}
