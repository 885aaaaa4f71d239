//! Branch-specific apparent-age formulas.
//!
//! Both branches are deterministic heuristics: identical ratios always
//! produce identical output. The numeric constants are empirically tuned
//! and carried verbatim.

use crate::geometry::{AdultGeometryRatios, ChildGeometryRatios};
use crate::types::SkinMetrics;

/// Child-branch clamp range for the age estimate, years.
pub const CHILD_AGE_MIN: f64 = 3.0;
pub const CHILD_AGE_MAX: f64 = 9.0;

/// Adult-branch clamp range for the age estimate, years.
pub const ADULT_AGE_MIN: f64 = 20.0;
pub const ADULT_AGE_MAX: f64 = 55.0;

fn round_clamp(value: f64, lo: f64, hi: f64) -> u8 {
    value.round().clamp(lo, hi) as u8
}

/// Child branch: age in [3,9] from the face-height ratio, sub-metrics
/// interpolated over the conceptual [3,14] range.
pub fn estimate_child(ratios: &ChildGeometryRatios) -> SkinMetrics {
    let age = (4.0 + ratios.face_height_ratio * 6.0)
        .round()
        .clamp(CHILD_AGE_MIN, CHILD_AGE_MAX);
    let t = (age - 3.0) / 11.0;

    SkinMetrics {
        wrinkles: round_clamp(5.0 + t * 12.0, 5.0, 20.0),
        texture: (98.0 - t * 10.0).round().max(85.0) as u8,
        volume: (95.0 - t * 5.0).round().max(88.0) as u8,
        eye_aging: round_clamp(3.0 + t * 10.0, 3.0, 15.0),
        skin_tone: round_clamp(4.0 + t * 6.0, 3.0, 12.0),
        estimated_age: age as u8,
    }
}

/// Adult branch: a stable per-face signature maps into a base age, nudged
/// by a youthfulness adjustment, then clamped to [20,55].
pub fn estimate_adult(ratios: &AdultGeometryRatios) -> SkinMetrics {
    let face_signature = ratios.face_height_ratio.abs() * 1000.0
        + ratios.eye_distance_ratio.abs() * 800.0
        + ratios.forehead_ratio.abs() * 600.0
        + ratios.jaw_ratio.abs() * 500.0
        + ratios.nose_ratio.abs() * 400.0
        + ratios.eye_openness_ratio.abs() * 300.0
        + ratios.lip_ratio.abs() * 200.0
        + ratios.brow_ratio.abs() * 100.0;
    let signature_offset = face_signature.sin() * 0.5 + 0.5;

    let base = 20.0 + signature_offset * 35.0;
    let youth_score = ratios.eye_openness_ratio * 10.0 + ratios.lip_ratio * 5.0
        - ratios.forehead_ratio * 3.0;
    let adjustment = ((youth_score - 1.5) * 3.0).clamp(-5.0, 5.0);

    let age = (base + adjustment).round().clamp(ADULT_AGE_MIN, ADULT_AGE_MAX);
    let age_percent = (age - 20.0) / 35.0;

    SkinMetrics {
        wrinkles: round_clamp(5.0 + age_percent * 60.0 + signature_offset * 10.0, 5.0, 75.0),
        texture: round_clamp(95.0 - age_percent * 25.0 - signature_offset * 10.0, 60.0, 98.0),
        volume: round_clamp(95.0 - age_percent * 30.0 - signature_offset * 10.0, 55.0, 98.0),
        eye_aging: round_clamp(3.0 + age_percent * 45.0 + signature_offset * 12.0, 3.0, 60.0),
        skin_tone: round_clamp(5.0 + age_percent * 15.0 + signature_offset * 5.0, 3.0, 25.0),
        estimated_age: age as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_ratios(face_height_ratio: f64) -> ChildGeometryRatios {
        ChildGeometryRatios {
            eye_ratio: 0.35,
            chin_ratio: 0.10,
            jaw_angle: 120.0,
            wrinkle_score: 0.01,
            face_height_ratio,
        }
    }

    fn adult_ratios(seed: f64) -> AdultGeometryRatios {
        AdultGeometryRatios {
            face_height_ratio: seed,
            eye_distance_ratio: seed * 0.7,
            forehead_ratio: seed * 0.3,
            jaw_ratio: seed * 0.6,
            nose_ratio: seed * 0.2,
            eye_openness_ratio: seed * 0.25,
            lip_ratio: seed * 0.1,
            brow_ratio: seed * 0.15,
        }
    }

    #[test]
    fn child_age_stays_in_range() {
        for fhr in [0.0, 0.1, 0.33, 0.5, 0.8, 1.3, 10.0, 1e6] {
            let m = estimate_child(&child_ratios(fhr));
            assert!((3..=9).contains(&m.estimated_age), "fhr {fhr} -> {}", m.estimated_age);
        }
    }

    #[test]
    fn child_metrics_known_values() {
        // face_height_ratio 0 -> age 4, t = 1/11.
        let m = estimate_child(&child_ratios(0.0));
        assert_eq!(m.estimated_age, 4);
        assert_eq!(m.wrinkles, 6);
        assert_eq!(m.eye_aging, 4);
        assert_eq!(m.texture, 97);
        assert_eq!(m.volume, 95);
        assert_eq!(m.skin_tone, 5);

        // face_height_ratio 0.5 -> age 7, t = 4/11.
        let m = estimate_child(&child_ratios(0.5));
        assert_eq!(m.estimated_age, 7);
        assert_eq!(m.wrinkles, 9);
        assert_eq!(m.eye_aging, 7);
        assert_eq!(m.texture, 94);
        assert_eq!(m.volume, 93);
        assert_eq!(m.skin_tone, 6);
    }

    #[test]
    fn child_submetric_bounds() {
        for fhr in [0.0, 0.5, 1.0, 5.0] {
            let m = estimate_child(&child_ratios(fhr));
            assert!((5..=20).contains(&m.wrinkles));
            assert!((3..=15).contains(&m.eye_aging));
            assert!(m.texture >= 85 && m.texture <= 98);
            assert!(m.volume >= 88 && m.volume <= 95);
            assert!((3..=12).contains(&m.skin_tone));
        }
    }

    #[test]
    fn adult_metrics_zero_ratios() {
        // All-zero ratios: signature 0 -> offset 0.5, base 37.5,
        // adjustment -4.5, age round(33) = 33, age_percent 13/35.
        let m = estimate_adult(&adult_ratios(0.0));
        assert_eq!(m.estimated_age, 33);
        assert_eq!(m.wrinkles, 32);
        assert_eq!(m.eye_aging, 26);
        assert_eq!(m.texture, 81);
        assert_eq!(m.volume, 79);
        assert_eq!(m.skin_tone, 13);
    }

    #[test]
    fn adult_bounds_hold_for_arbitrary_ratios() {
        for seed in [0.0, 0.1, 0.5, 1.0, 2.0, 7.3, 50.0, 1234.5] {
            let m = estimate_adult(&adult_ratios(seed));
            assert!((20..=55).contains(&m.estimated_age), "seed {seed}");
            assert!((5..=75).contains(&m.wrinkles));
            assert!((3..=60).contains(&m.eye_aging));
            assert!((60..=98).contains(&m.texture));
            assert!((55..=98).contains(&m.volume));
            assert!((3..=25).contains(&m.skin_tone));
        }
    }

    #[test]
    fn adult_is_deterministic() {
        let r = adult_ratios(0.83);
        assert_eq!(estimate_adult(&r), estimate_adult(&r));
    }
}
