//! Per-frame composition of the metric pipeline.
//!
//! One [`AgePipeline`] instance serves one tracked subject stream:
//! extract ratios, gate child vs adult, run the selected branch, stabilize.
//! The caller delivers one landmark set per frame in which a face was
//! detected, in strict arrival order, and skips frames without one — the
//! stabilizer state is preserved untouched across skipped frames.

use tracing::trace;

use crate::error::{Error, Result};
use crate::estimator::{estimate_adult, estimate_child};
use crate::gate::{child_score, is_child};
use crate::geometry::{AdultGeometryRatios, ChildGeometryRatios};
use crate::stabilizer::{LockState, Stabilizer};
use crate::topology::FACE_MESH_LEN;
use crate::types::{LandmarkSet, SkinMetrics};

/// Landmark-to-metrics pipeline for a single subject stream.
#[derive(Debug, Clone, Default)]
pub struct AgePipeline {
    stabilizer: Stabilizer,
}

impl AgePipeline {
    pub fn new() -> Self {
        Self {
            stabilizer: Stabilizer::new(),
        }
    }

    /// Process one frame's landmark set and return the stabilized metrics
    /// for that frame.
    pub fn process(&mut self, landmarks: &LandmarkSet) -> Result<SkinMetrics> {
        let raw = Self::raw_estimate(landmarks)?;
        Ok(self.stabilizer.update(raw))
    }

    /// The stateless front half: extract, gate, and run the selected
    /// branch, without temporal stabilization.
    pub fn raw_estimate(landmarks: &LandmarkSet) -> Result<SkinMetrics> {
        if !landmarks.covers_topology() {
            return Err(Error::InsufficientLandmarks {
                required: FACE_MESH_LEN,
                got: landmarks.num_landmarks(),
            });
        }

        let child_ratios = ChildGeometryRatios::from_landmarks(landmarks);
        let score = child_score(&child_ratios);
        let raw = if is_child(score) {
            estimate_child(&child_ratios)
        } else {
            let adult_ratios = AdultGeometryRatios::from_landmarks(landmarks);
            estimate_adult(&adult_ratios)
        };
        trace!(score, age = raw.estimated_age, "raw frame estimate");
        Ok(raw)
    }

    pub fn state(&self) -> &LockState {
        self.stabilizer.state()
    }

    pub fn is_locked(&self) -> bool {
        self.stabilizer.is_locked()
    }

    pub fn history_len(&self) -> usize {
        self.stabilizer.history_len()
    }

    /// Drop all per-subject state, e.g. when the caller restarts its
    /// capture session.
    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }
}
