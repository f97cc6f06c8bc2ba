//! Property-based tests for pathos_core.
//!
//! Uses proptest to verify invariants that must hold for ALL possible inputs,
//! not just hand-picked examples.

use pathos_core::{Appraisal, Emotion, Mood, Personality, PersonalityInput, Stimulus};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_mood() -> impl Strategy<Value = Mood> {
    (-1.0f32..=1.0, -1.0f32..=1.0, -1.0f32..=1.0).prop_map(|(p, a, d)| Mood::new(p, a, d))
}

fn arb_personality() -> impl Strategy<Value = Personality> {
    prop::array::uniform5(-1.0f32..=1.0).prop_map(Personality::from)
}

fn arb_appraisal() -> impl Strategy<Value = Appraisal> {
    prop::collection::vec((0usize..24, 0.0f32..=1.0), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(i, v)| (Emotion::ALL[i], v))
            .collect()
    })
}

fn in_cube(m: &Mood) -> bool {
    m.as_array().iter().all(|v| v.is_finite() && v.abs() <= 1.0)
}

// ============================================================================
// Construction
// ============================================================================

proptest! {
    /// Any finite raw vector lands inside the unit cube.
    #[test]
    fn mood_new_always_in_cube(
        p in -100.0f32..100.0,
        a in -100.0f32..100.0,
        d in -100.0f32..100.0,
    ) {
        prop_assert!(in_cube(&Mood::new(p, a, d)));
    }

    /// Rescaling preserves direction: component ratios are unchanged.
    #[test]
    fn mood_rescale_preserves_sign(
        p in -10.0f32..10.0,
        a in -10.0f32..10.0,
        d in -10.0f32..10.0,
    ) {
        let m = Mood::new(p, a, d);
        prop_assert!(m.pleasure * p >= 0.0);
        prop_assert!(m.arousal * a >= 0.0);
        prop_assert!(m.dominance * d >= 0.0);
    }

    #[test]
    fn personality_rest_mood_in_cube(p in arb_personality()) {
        prop_assert!(in_cube(&p.to_mood()));
    }

    #[test]
    fn neuroticism_factor_bounded(p in arb_personality(), max in 1.0f32..10.0) {
        let f = p.neuroticism_factor(max);
        prop_assert!(f >= 1.0 - 1e-5 && f <= max + 1e-5, "factor {} outside [1, {}]", f, max);
    }

    #[test]
    fn appraisal_mood_in_cube(a in arb_appraisal()) {
        prop_assert!(a.validate().is_ok());
        prop_assert!(in_cube(&a.to_mood()));
    }
}

// ============================================================================
// Movement
// ============================================================================

proptest! {
    /// One stride never increases the distance to the target and never leaves the cube.
    #[test]
    fn move_toward_closes_distance(
        from in arb_mood(),
        to in arb_mood(),
        speed in 0.001f32..0.05,
    ) {
        let next = from.move_toward(&to, speed, 1e-4);
        prop_assert!(in_cube(&next));
        prop_assert!(next.distance(&to) <= from.distance(&to) + 1e-6);
    }

    /// A stride is never longer than `speed`.
    #[test]
    fn move_toward_bounded_stride(
        from in arb_mood(),
        to in arb_mood(),
        speed in 0.001f32..0.05,
    ) {
        let next = from.move_toward(&to, speed, 1e-4);
        prop_assert!(from.distance(&next) <= speed + 1e-5);
    }

    /// Repeated strides converge exactly onto the target.
    #[test]
    fn move_toward_converges_exactly(
        from in arb_mood(),
        to in arb_mood(),
        speed in 0.004f32..0.012,
    ) {
        let mut m = from;
        // Longest diagonal is 2*sqrt(3) ≈ 3.47, so 1000 strides of ≥ 0.004 suffice
        for _ in 0..1000 {
            m = m.move_toward(&to, speed, 1e-4);
        }
        prop_assert_eq!(m, to);
    }

    /// The weighted mean lies inside the per-axis hull of its inputs.
    #[test]
    fn weighted_average_within_hull(
        items in prop::collection::vec((arb_mood(), 0.01f32..1.0), 1..6),
    ) {
        let avg = Mood::weighted_average(items.iter().copied()).unwrap();
        for axis in 0..3 {
            let lo = items.iter().map(|(m, _)| m.as_array()[axis]).fold(f32::INFINITY, f32::min);
            let hi = items.iter().map(|(m, _)| m.as_array()[axis]).fold(f32::NEG_INFINITY, f32::max);
            let v = avg.as_array()[axis];
            prop_assert!(v >= lo - 1e-5 && v <= hi + 1e-5);
        }
    }
}

// ============================================================================
// Caller-built values
// ============================================================================

/// Any f32 at all: huge, tiny, negative, infinite or NaN.
fn any_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        -2.0f32..2.0,
        prop::num::f32::NORMAL | prop::num::f32::ZERO,
        prop::num::f32::ANY,
    ]
}

/// Non-negative intensities spanning the whole finite range.
fn large_intensity() -> impl Strategy<Value = f32> {
    prop_oneof![
        0.0f32..=1.0,
        prop::num::f32::POSITIVE | prop::num::f32::NORMAL,
        Just(f32::MAX),
    ]
}

proptest! {
    /// Appraisals with valid but enormous intensities resolve to a finite in-cube target.
    #[test]
    fn large_appraisal_resolves_in_cube(
        pairs in prop::collection::vec((0usize..24, large_intensity()), 0..10),
    ) {
        let appraisal: Appraisal = pairs.into_iter().map(|(i, v)| (Emotion::ALL[i], v)).collect();
        let target = Stimulus::Appraisal(appraisal).resolve();
        prop_assert!(target.is_ok());
        let target = target.unwrap();
        prop_assert!(in_cube(&target), "left cube: {}", target);
    }

    /// Whatever the intensities, resolving either fails or lands in the cube.
    #[test]
    fn arbitrary_appraisal_errors_or_in_cube(
        pairs in prop::collection::vec((0usize..24, any_f32()), 0..10),
    ) {
        let appraisal: Appraisal = pairs.into_iter().map(|(i, v)| (Emotion::ALL[i], v)).collect();
        if let Ok(target) = Stimulus::Appraisal(appraisal).resolve() {
            prop_assert!(in_cube(&target), "left cube: {}", target);
        }
    }

    /// A mood written as a struct literal is checked like a raw vector.
    #[test]
    fn literal_mood_errors_or_in_cube(p in any_f32(), a in any_f32(), d in any_f32()) {
        let literal = Mood { pleasure: p, arousal: a, dominance: d };
        match Stimulus::Mood(literal).resolve() {
            Ok(target) => prop_assert!(in_cube(&target), "left cube: {}", target),
            Err(_) => prop_assert!(!(p.is_finite() && a.is_finite() && d.is_finite())),
        }
    }

    /// A personality written as a struct literal never escapes the trait
    /// bounds or the neuroticism velocity range.
    #[test]
    fn literal_personality_errors_or_bounded(traits in prop::array::uniform5(any_f32())) {
        let literal = Personality {
            openness: traits[0],
            conscientiousness: traits[1],
            extraversion: traits[2],
            agreeableness: traits[3],
            neuroticism: traits[4],
        };
        if let Ok(p) = PersonalityInput::Traits(literal).resolve() {
            prop_assert!(p.as_array().iter().all(|v| v.is_finite() && v.abs() <= 1.0));
            let f = p.neuroticism_factor(3.0);
            prop_assert!((1.0..=3.0).contains(&f), "factor {}", f);
            prop_assert!(in_cube(&p.to_mood()));
        }
    }
}
