//! Big Five (OCEAN) personality, the stable disposition a mood rests on.
//!
//! Each trait lives in [-1, 1]. The personality never moves on its own; it
//! only determines where mood drifts back to when nothing is happening
//! (`to_mood`) and how quickly mood travels (`neuroticism_factor`).

use crate::error::{check_arity, check_finite, InputError};
use crate::mood::{deserialize_safe_f32, rescale_inf_norm, Mood};
use serde::{Deserialize, Serialize};

/// Linear remap of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Values outside the input range extrapolate; callers clamp if they need to.
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PersonalityRepr")]
pub struct Personality {
    pub openness: f32,
    pub conscientiousness: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub neuroticism: f32,
}

#[derive(Deserialize)]
struct PersonalityRepr {
    #[serde(default, deserialize_with = "deserialize_safe_f32")]
    openness: f32,
    #[serde(default, deserialize_with = "deserialize_safe_f32")]
    conscientiousness: f32,
    #[serde(default, deserialize_with = "deserialize_safe_f32")]
    extraversion: f32,
    #[serde(default, deserialize_with = "deserialize_safe_f32")]
    agreeableness: f32,
    #[serde(default, deserialize_with = "deserialize_safe_f32")]
    neuroticism: f32,
}

impl From<PersonalityRepr> for Personality {
    fn from(r: PersonalityRepr) -> Self {
        Personality::new(
            r.openness,
            r.conscientiousness,
            r.extraversion,
            r.agreeableness,
            r.neuroticism,
        )
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Personality {
    pub fn new(
        openness: f32,
        conscientiousness: f32,
        extraversion: f32,
        agreeableness: f32,
        neuroticism: f32,
    ) -> Self {
        let mut v = [
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            neuroticism,
        ];
        rescale_inf_norm(&mut v);
        Self {
            openness: v[0],
            conscientiousness: v[1],
            extraversion: v[2],
            agreeableness: v[3],
            neuroticism: v[4],
        }
    }

    /// All traits at zero. Rests at the PAD origin.
    pub fn neutral() -> Self {
        Self {
            openness: 0.0,
            conscientiousness: 0.0,
            extraversion: 0.0,
            agreeableness: 0.0,
            neuroticism: 0.0,
        }
    }

    pub fn as_array(&self) -> [f32; 5] {
        [
            self.openness,
            self.conscientiousness,
            self.extraversion,
            self.agreeableness,
            self.neuroticism,
        ]
    }

    /// Mehrabian's temperament mapping from OCEAN onto PAD.
    pub fn to_mood(&self) -> Mood {
        let o = self.openness;
        let c = self.conscientiousness;
        let e = self.extraversion;
        let a = self.agreeableness;
        let n = self.neuroticism;

        let pleasure = 0.21 * e + 0.59 * a + 0.19 * n;
        let arousal = 0.15 * o + 0.30 * a - 0.57 * n;
        let dominance = 0.25 * o + 0.17 * c + 0.60 * e - 0.32 * n;
        Mood::new(pleasure, arousal, dominance)
    }

    /// Neuroticism remapped from [-1, 1] onto [1, `max_neurotics`].
    ///
    /// Used as a velocity multiplier: the more neurotic, the faster mood
    /// swings toward stimuli and back to rest.
    pub fn neuroticism_factor(&self, max_neurotics: f32) -> f32 {
        remap(self.neuroticism.clamp(-1.0, 1.0), -1.0, 1.0, 1.0, max_neurotics)
    }
}

impl TryFrom<&[f32]> for Personality {
    type Error = InputError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        check_arity(values, 5)?;
        check_finite(values)?;
        Ok(Personality::new(
            values[0], values[1], values[2], values[3], values[4],
        ))
    }
}

impl From<[f32; 5]> for Personality {
    fn from(v: [f32; 5]) -> Self {
        Personality::new(v[0], v[1], v[2], v[3], v[4])
    }
}
