//! Mood as a point in Mehrabian's PAD space.
//!
//! Three continuous axes, each bounded to [-1, 1]:
//! - Pleasure: displeasure ↔ pleasure
//! - Arousal: calm ↔ excited
//! - Dominance: submissive ↔ in control
//!
//! Raw vectors that leave the unit cube are rescaled by their infinity norm
//! rather than clamped, so the direction of the vector is preserved.

use crate::error::{check_arity, check_finite, InputError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Replace NaN / Inf with 0.0 during deserialization.
pub(crate) fn deserialize_safe_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f32::deserialize(deserializer)?;
    if v.is_finite() {
        Ok(v)
    } else {
        tracing::warn!("non-finite value in serialized mood, replacing with 0.0");
        Ok(0.0)
    }
}

/// Rescale `values` in place so that its infinity norm is at most 1.
///
/// NaN components count as 0. When the norm itself is infinite the infinite
/// components become ±1 and everything else 0, which is the limit of the
/// division rather than `inf / inf`.
pub(crate) fn rescale_inf_norm(values: &mut [f32]) {
    for v in values.iter_mut().filter(|v| v.is_nan()) {
        *v = 0.0;
    }
    let norm = values.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
    if norm.is_infinite() {
        for v in values.iter_mut() {
            *v = if v.is_infinite() { v.signum() } else { 0.0 };
        }
    } else if norm > 1.0 {
        for v in values.iter_mut() {
            *v /= norm;
        }
    }
}

/// A three-axis affective state. Always inside the unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MoodRepr")]
pub struct Mood {
    pub pleasure: f32,
    pub arousal: f32,
    pub dominance: f32,
}

#[derive(Deserialize)]
struct MoodRepr {
    #[serde(deserialize_with = "deserialize_safe_f32")]
    pleasure: f32,
    #[serde(deserialize_with = "deserialize_safe_f32")]
    arousal: f32,
    #[serde(deserialize_with = "deserialize_safe_f32")]
    dominance: f32,
}

impl From<MoodRepr> for Mood {
    fn from(r: MoodRepr) -> Self {
        Mood::new(r.pleasure, r.arousal, r.dominance)
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Mood {
    pub fn new(pleasure: f32, arousal: f32, dominance: f32) -> Self {
        let mut v = [pleasure, arousal, dominance];
        rescale_inf_norm(&mut v);
        Self::from_array(v)
    }

    pub fn neutral() -> Self {
        Self {
            pleasure: 0.0,
            arousal: 0.0,
            dominance: 0.0,
        }
    }

    fn from_array(v: [f32; 3]) -> Self {
        Self {
            pleasure: v[0],
            arousal: v[1],
            dominance: v[2],
        }
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.pleasure, self.arousal, self.dominance]
    }

    /// Largest per-axis absolute difference (infinity-norm distance).
    pub fn max_abs_diff(&self, other: &Mood) -> f32 {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .fold(0.0f32, |acc, (a, b)| acc.max((a - b).abs()))
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &Mood) -> f32 {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }

    pub fn is_close(&self, other: &Mood, tolerance: f32) -> bool {
        self.max_abs_diff(other) <= tolerance
    }

    /// Advance by `speed` along the straight line toward `target`.
    ///
    /// Snaps onto the target when already within `tolerance` of it, or when the
    /// remaining distance is no longer than one stride. The direction vector is
    /// only normalized once both checks have ruled out a zero-length segment.
    pub fn move_toward(&self, target: &Mood, speed: f32, tolerance: f32) -> Mood {
        if self.is_close(target, tolerance) {
            return *target;
        }
        let distance = self.distance(target);
        if distance <= speed {
            return *target;
        }
        let scale = speed / distance;
        Mood {
            pleasure: self.pleasure + (target.pleasure - self.pleasure) * scale,
            arousal: self.arousal + (target.arousal - self.arousal) * scale,
            dominance: self.dominance + (target.dominance - self.dominance) * scale,
        }
    }

    /// Weighted mean of `(mood, weight)` pairs.
    ///
    /// Returns `None` when the total weight is not strictly positive.
    pub fn weighted_average<I>(items: I) -> Option<Mood>
    where
        I: IntoIterator<Item = (Mood, f32)>,
    {
        let mut sum = [0.0f32; 3];
        let mut total = 0.0f32;
        for (mood, weight) in items {
            for (acc, v) in sum.iter_mut().zip(mood.as_array()) {
                *acc += v * weight;
            }
            total += weight;
        }
        if total <= 0.0 || !total.is_finite() {
            return None;
        }
        Some(Mood::new(sum[0] / total, sum[1] / total, sum[2] / total))
    }

    /// The PAD octant this mood points into.
    pub fn octant(&self) -> MoodOctant {
        MoodOctant::from_signs(
            self.pleasure >= 0.0,
            self.arousal >= 0.0,
            self.dominance >= 0.0,
        )
    }

    /// How far from neutral the mood is, bucketed into three levels.
    pub fn intensity_level(&self) -> IntensityLevel {
        let origin = Mood::neutral();
        let ratio = self.distance(&origin) / 3.0f32.sqrt();
        match (ratio * 2.0).round() as u8 {
            0 => IntensityLevel::Slight,
            1 => IntensityLevel::Moderate,
            _ => IntensityLevel::High,
        }
    }

    /// Human-readable label such as "moderately exuberant".
    pub fn describe(&self) -> String {
        format!("{} {}", self.intensity_level(), self.octant())
    }
}

impl TryFrom<&[f32]> for Mood {
    type Error = InputError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        check_arity(values, 3)?;
        check_finite(values)?;
        Ok(Mood::new(values[0], values[1], values[2]))
    }
}

impl From<[f32; 3]> for Mood {
    fn from(v: [f32; 3]) -> Self {
        Mood::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P={:+.3} A={:+.3} D={:+.3}",
            self.pleasure, self.arousal, self.dominance
        )
    }
}

/// The eight corners of PAD space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodOctant {
    Exuberant,
    Dependent,
    Relaxed,
    Docile,
    Bored,
    Disdainful,
    Anxious,
    Hostile,
}

impl MoodOctant {
    fn from_signs(pleasure: bool, arousal: bool, dominance: bool) -> Self {
        match (pleasure, arousal, dominance) {
            (true, true, true) => MoodOctant::Exuberant,
            (true, true, false) => MoodOctant::Dependent,
            (true, false, true) => MoodOctant::Relaxed,
            (true, false, false) => MoodOctant::Docile,
            (false, false, false) => MoodOctant::Bored,
            (false, false, true) => MoodOctant::Disdainful,
            (false, true, false) => MoodOctant::Anxious,
            (false, true, true) => MoodOctant::Hostile,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodOctant::Exuberant => "exuberant",
            MoodOctant::Dependent => "dependent",
            MoodOctant::Relaxed => "relaxed",
            MoodOctant::Docile => "docile",
            MoodOctant::Bored => "bored",
            MoodOctant::Disdainful => "disdainful",
            MoodOctant::Anxious => "anxious",
            MoodOctant::Hostile => "hostile",
        }
    }
}

impl fmt::Display for MoodOctant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    Slight,
    Moderate,
    High,
}

impl fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntensityLevel::Slight => "slightly",
            IntensityLevel::Moderate => "moderately",
            IntensityLevel::High => "highly",
        })
    }
}
