//! Heuristic display attributes.
//!
//! None of these are astrophysically meaningful. The name hash and angle
//! functions are deterministic; distance jitter and the non-candidate ML
//! score draw from a [`RandomSource`].

use crate::catalog::{MlResult, Prediction};
use crate::random::RandomSource;
use crate::transform::coords::Coordinates;

/// Upper bound (exclusive) of the uniform distance jitter.
pub const DISTANCE_JITTER: f64 = 500.0;
/// Probability assumed for a "Candidate" verdict with no probability.
pub const DEFAULT_CANDIDATE_PROBABILITY: f64 = 0.5;
/// Score range for anything the classifier did not call a candidate.
pub const NON_CANDIDATE_HABITABILITY: (f64, f64) = (20.0, 50.0);

/// `round(1000 / |c| + jitter)`, jitter uniform in `[0, 500)`.
///
/// Returns `None` at the origin (or for a non-finite position), where the
/// reciprocal has no value.
pub fn simulated_distance(c: &Coordinates, random: &dyn RandomSource) -> Option<f64> {
    let magnitude = c.magnitude();
    if !(magnitude.is_finite() && magnitude > 0.0) {
        return None;
    }
    let d = ((1.0 / magnitude) * 1000.0 + random.range(0.0, DISTANCE_JITTER)).round();
    d.is_finite().then_some(d)
}

/// Sum of UTF-16 code units of `name`, mapped onto `[40, 80]`.
pub fn name_habitability(name: &str) -> u8 {
    let hash: u64 = name.encode_utf16().map(u64::from).sum();
    ((hash % 100) as f64 * 0.4 + 40.0).round() as u8
}

/// Wrap any angle into `[0, 360)`.
pub fn ra_to_azimuth(ra: f64) -> f64 {
    let wrapped = ra.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// `dec + 45`, clamped to `[5, 85]`.
pub fn dec_to_elevation(dec: f64) -> f64 {
    (dec + 45.0).clamp(5.0, 85.0)
}

/// Candidate verdicts score `round(p * 100)`; everything else gets a
/// random score in `[20, 50)`.
pub fn ml_to_habitability(ml: &MlResult, random: &dyn RandomSource) -> u8 {
    match ml.prediction {
        Prediction::Candidate => {
            let p = ml
                .probability
                .filter(|p| p.is_finite())
                .unwrap_or(DEFAULT_CANDIDATE_PROBABILITY)
                .clamp(0.0, 1.0);
            (p * 100.0).round() as u8
        }
        _ => {
            let (lo, hi) = NON_CANDIDATE_HABITABILITY;
            // floor keeps the integer score below the exclusive upper bound
            random.range(lo, hi).floor() as u8
        }
    }
}

/// Random display azimuth in `[0, 360)` for objects without usable angles.
pub fn random_direction(random: &dyn RandomSource) -> f64 {
    random.range(0.0, 360.0)
}

/// Random display elevation in `[0, 90)`.
pub fn random_elevation(random: &dyn RandomSource) -> f64 {
    random.range(0.0, 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, ThreadRandom};
    use crate::transform::coords::passthrough;

    #[test]
    fn name_habitability_range_and_determinism() {
        for name in ["", "K1", "K00752.01", "Kepler-22 b", "ケプラー", "🪐"] {
            let h = name_habitability(name);
            assert!((40..=80).contains(&h), "{name} -> {h}");
            assert_eq!(h, name_habitability(name));
        }
    }

    #[test]
    fn name_habitability_exact() {
        // 'K' (75) + '1' (49) = 124 -> 24 * 0.4 + 40 = 49.6
        assert_eq!(name_habitability("K1"), 50);
        assert_eq!(name_habitability(""), 40);
    }

    #[test]
    fn azimuth_wraps() {
        assert_eq!(ra_to_azimuth(370.0), 10.0);
        assert_eq!(ra_to_azimuth(360.0), 0.0);
        assert_eq!(ra_to_azimuth(-10.0), 350.0);
        assert_eq!(ra_to_azimuth(-1e-20), 0.0);
        for ra in [-1000.5, -0.1, 0.0, 123.4, 719.9, 1e9] {
            let az = ra_to_azimuth(ra);
            assert!((0.0..360.0).contains(&az), "{ra} -> {az}");
        }
    }

    #[test]
    fn elevation_clamps() {
        assert_eq!(dec_to_elevation(50.0), 85.0);
        assert_eq!(dec_to_elevation(-60.0), 5.0);
        assert_eq!(dec_to_elevation(10.0), 55.0);
        assert_eq!(dec_to_elevation(-40.0), 5.0);
        assert_eq!(dec_to_elevation(40.0), 85.0);
    }

    #[test]
    fn candidate_score_is_exact() {
        for (p, expected) in [(0.0, 0), (0.87, 87), (0.505, 51), (1.0, 100)] {
            let ml = MlResult {
                prediction: Prediction::Candidate,
                probability: Some(p),
            };
            assert_eq!(ml_to_habitability(&ml, &ThreadRandom), expected);
        }
        let ml = MlResult {
            prediction: Prediction::Candidate,
            probability: None,
        };
        assert_eq!(ml_to_habitability(&ml, &ThreadRandom), 50);
    }

    #[test]
    fn non_candidate_score_range() {
        let ml = MlResult {
            prediction: Prediction::FalsePositive,
            probability: Some(0.99),
        };
        for _ in 0..500 {
            let h = ml_to_habitability(&ml, &ThreadRandom);
            assert!((20..50).contains(&h));
        }
        assert_eq!(ml_to_habitability(&ml, &FixedRandom(0.0)), 20);
        assert_eq!(ml_to_habitability(&ml, &FixedRandom(1.0)), 49);
    }

    #[test]
    fn distance_uses_reciprocal_plus_jitter() {
        let c = passthrough(1.0, 0.0, 0.0);
        assert_eq!(simulated_distance(&c, &FixedRandom(0.0)), Some(1000.0));
        assert_eq!(simulated_distance(&c, &FixedRandom(0.5)), Some(1250.0));
        for _ in 0..100 {
            let d = simulated_distance(&c, &ThreadRandom).unwrap();
            assert!((1000.0..=1500.0).contains(&d));
        }
    }

    #[test]
    fn distance_at_origin_is_none() {
        assert_eq!(simulated_distance(&passthrough(0.0, 0.0, 0.0), &ThreadRandom), None);
        assert_eq!(
            simulated_distance(&passthrough(f64::NAN, 0.0, 0.0), &ThreadRandom),
            None
        );
    }

    #[test]
    fn random_angles_in_range() {
        for _ in 0..200 {
            assert!((0.0..360.0).contains(&random_direction(&ThreadRandom)));
            assert!((0.0..90.0).contains(&random_elevation(&ThreadRandom)));
        }
    }
}
