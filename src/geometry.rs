//! Shape-ratio extraction from a landmark set.
//!
//! This module turns one [`LandmarkSet`] into the dimensionless ratios the
//! age formulas consume. Two independent ratio sets are produced from the
//! same landmarks: [`ChildGeometryRatios`] feed the child gate and the child
//! branch, [`AdultGeometryRatios`] feed the adult branch.
//!
//! Everything here is pure and total: degenerate geometry (a zero-length
//! face span, coincident jaw points) degrades to documented defaults
//! instead of failing the frame.

use crate::topology::*;
use crate::types::{Landmark, LandmarkSet};

/// Division with a zero default: `safe_div(a, 0) == 0` for every finite
/// `a`. Keeps the ratio pipeline total over degenerate landmark geometry.
pub fn safe_div(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

/// Angle in degrees at `apex` between the rays toward `left` and `right`,
/// via the arccosine of the clamped dot-product cosine. A zero-length ray
/// yields the flat default of 180°.
pub fn jaw_angle_degrees(apex: Landmark, left: Landmark, right: Landmark) -> f64 {
    let (ax, ay) = (left.x - apex.x, left.y - apex.y);
    let (bx, by) = (right.x - apex.x, right.y - apex.y);

    let len_a = (ax * ax + ay * ay).sqrt();
    let len_b = (bx * bx + by * by).sqrt();
    if len_a == 0.0 || len_b == 0.0 {
        return 180.0;
    }

    let cos = ((ax * bx + ay * by) / (len_a * len_b)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Ratios consumed by the child gate and the child-branch estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildGeometryRatios {
    /// Inner-eye-corner span relative to face width.
    pub eye_ratio: f64,
    /// Lower-lip-to-chin height relative to face height.
    pub chin_ratio: f64,
    /// Angle at the chin apex between the rays to the jaw corners, degrees.
    pub jaw_angle: f64,
    /// Geometric forehead roughness in [0,1]; smooth foreheads score near 0.
    pub wrinkle_score: f64,
    /// Face height relative to face width.
    pub face_height_ratio: f64,
}

impl ChildGeometryRatios {
    pub fn from_landmarks(set: &LandmarkSet) -> Self {
        let face_width = (set[FACE_RIGHT].x - set[FACE_LEFT].x).abs();
        let face_height = (set[CHIN].y - set[FOREHEAD_TOP].y).abs();

        let eye_span = (set[RIGHT_EYE_INNER].x - set[LEFT_EYE_INNER].x).abs();
        let chin_height = (set[CHIN].y - set[LOWER_LIP].y).abs();

        Self {
            eye_ratio: safe_div(eye_span, face_width),
            chin_ratio: safe_div(chin_height, face_height),
            jaw_angle: jaw_angle_degrees(set[CHIN], set[JAW_LEFT], set[JAW_RIGHT]),
            wrinkle_score: forehead_roughness(set, face_height),
            face_height_ratio: safe_div(face_height, face_width),
        }
    }
}

/// Ratios consumed by the adult-branch estimator. All non-negative, 0 on a
/// degenerate denominator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdultGeometryRatios {
    pub face_height_ratio: f64,
    pub eye_distance_ratio: f64,
    pub forehead_ratio: f64,
    pub jaw_ratio: f64,
    pub nose_ratio: f64,
    pub eye_openness_ratio: f64,
    pub lip_ratio: f64,
    pub brow_ratio: f64,
}

impl AdultGeometryRatios {
    pub fn from_landmarks(set: &LandmarkSet) -> Self {
        let face_width = (set[FACE_RIGHT].x - set[FACE_LEFT].x).abs();
        let face_height = (set[CHIN].y - set[FOREHEAD_TOP].y).abs();

        let eye_span = (set[RIGHT_EYE_OUTER].x - set[LEFT_EYE_OUTER].x).abs();
        let jaw_span = (set[JAW_RIGHT].x - set[JAW_LEFT].x).abs();
        let nose_length = (set[NOSE_TIP].y - set[NOSE_BRIDGE].y).abs();
        let lip_height = (set[LOWER_LIP].y - set[UPPER_LIP].y).abs();

        let brow_y = (set[LEFT_BROW].y + set[RIGHT_BROW].y) / 2.0;
        let forehead_height = (brow_y - set[FOREHEAD_TOP].y).abs();

        let left_gap = (set[LEFT_EYE_LOWER_LID].y - set[LEFT_EYE_UPPER_LID].y).abs();
        let right_gap = (set[RIGHT_EYE_LOWER_LID].y - set[RIGHT_EYE_UPPER_LID].y).abs();
        let eye_width = (set[LEFT_EYE_INNER].x - set[LEFT_EYE_OUTER].x).abs();

        let left_brow_gap = (set[LEFT_EYE_UPPER_LID].y - set[LEFT_BROW].y).abs();
        let right_brow_gap = (set[RIGHT_EYE_UPPER_LID].y - set[RIGHT_BROW].y).abs();

        Self {
            face_height_ratio: safe_div(face_height, face_width),
            eye_distance_ratio: safe_div(eye_span, face_width),
            forehead_ratio: safe_div(forehead_height, face_height),
            jaw_ratio: safe_div(jaw_span, face_width),
            nose_ratio: safe_div(nose_length, face_height),
            eye_openness_ratio: safe_div((left_gap + right_gap) / 2.0, eye_width),
            lip_ratio: safe_div(lip_height, face_height),
            brow_ratio: safe_div((left_brow_gap + right_brow_gap) / 2.0, face_height),
        }
    }
}

/// Standard deviation of the forehead band's y coordinates relative to face
/// height, clamped to [0,1]. A flat, evenly detected band scores near 0.
fn forehead_roughness(set: &LandmarkSet, face_height: f64) -> f64 {
    let n = FOREHEAD_RING.len() as f64;
    let mean = FOREHEAD_RING.iter().map(|&i| set[i].y).sum::<f64>() / n;
    let variance = FOREHEAD_RING
        .iter()
        .map(|&i| {
            let d = set[i].y - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    safe_div(variance.sqrt(), face_height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_set() -> LandmarkSet {
        LandmarkSet::new(vec![Landmark::new(0.5, 0.5, 0.0); FACE_MESH_LEN])
    }

    #[test]
    fn safe_div_zero_denominator() {
        assert_eq!(safe_div(1.0, 0.0), 0.0);
        assert_eq!(safe_div(-3.5, 0.0), 0.0);
        assert_eq!(safe_div(0.0, 0.0), 0.0);
    }

    #[test]
    fn safe_div_normal() {
        assert!((safe_div(1.0, 4.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn jaw_angle_right_angle() {
        let apex = Landmark::new(0.0, 0.0, 0.0);
        let left = Landmark::new(1.0, 0.0, 0.0);
        let right = Landmark::new(0.0, 1.0, 0.0);
        assert!((jaw_angle_degrees(apex, left, right) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn jaw_angle_degenerate_rays() {
        let p = Landmark::new(0.5, 0.5, 0.0);
        assert_eq!(jaw_angle_degrees(p, p, Landmark::new(0.6, 0.5, 0.0)), 180.0);
        assert_eq!(jaw_angle_degrees(p, p, p), 180.0);
    }

    #[test]
    fn degenerate_set_yields_zero_ratios() {
        let set = flat_set();

        let child = ChildGeometryRatios::from_landmarks(&set);
        assert_eq!(child.eye_ratio, 0.0);
        assert_eq!(child.chin_ratio, 0.0);
        assert_eq!(child.jaw_angle, 180.0);
        assert_eq!(child.wrinkle_score, 0.0);
        assert_eq!(child.face_height_ratio, 0.0);

        let adult = AdultGeometryRatios::from_landmarks(&set);
        assert_eq!(adult.face_height_ratio, 0.0);
        assert_eq!(adult.eye_openness_ratio, 0.0);
        assert_eq!(adult.brow_ratio, 0.0);
    }

    #[test]
    fn ratios_are_finite_and_non_negative() {
        let mut set = flat_set();
        set.points[FACE_LEFT] = Landmark::new(0.1, 0.5, 0.0);
        set.points[FACE_RIGHT] = Landmark::new(0.9, 0.5, 0.0);
        set.points[FOREHEAD_TOP] = Landmark::new(0.5, 0.1, 0.0);
        set.points[CHIN] = Landmark::new(0.5, 0.9, 0.0);

        let child = ChildGeometryRatios::from_landmarks(&set);
        let adult = AdultGeometryRatios::from_landmarks(&set);
        for v in [
            child.eye_ratio,
            child.chin_ratio,
            child.jaw_angle,
            child.wrinkle_score,
            child.face_height_ratio,
            adult.face_height_ratio,
            adult.eye_distance_ratio,
            adult.forehead_ratio,
            adult.jaw_ratio,
            adult.nose_ratio,
            adult.eye_openness_ratio,
            adult.lip_ratio,
            adult.brow_ratio,
        ] {
            assert!(v.is_finite());
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn wrinkle_score_tracks_forehead_spread() {
        let mut set = flat_set();
        set.points[CHIN] = Landmark::new(0.5, 0.9, 0.0);
        for &idx in &FOREHEAD_RING {
            set.points[idx] = Landmark::new(0.5, 0.15, 0.0);
        }
        let smooth = ChildGeometryRatios::from_landmarks(&set);
        assert_eq!(smooth.wrinkle_score, 0.0);

        for (k, &idx) in FOREHEAD_RING.iter().enumerate() {
            let wobble = if k % 2 == 0 { 0.08 } else { -0.08 };
            set.points[idx] = Landmark::new(0.5, 0.15 + wobble, 0.0);
        }
        let rough = ChildGeometryRatios::from_landmarks(&set);

        assert!(rough.wrinkle_score > smooth.wrinkle_score);
        assert!(rough.wrinkle_score <= 1.0);
    }
}
