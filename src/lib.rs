//! # apparent-age
//!
//! Real-time, per-frame facial-geometry metric pipeline: normalized face
//! landmarks in, a stable apparent-age estimate plus five cosmetic skin
//! scores out.
//!
//! This crate provides:
//! - **Geometry extraction**: dimensionless shape ratios from a fixed
//!   landmark topology, total over degenerate input
//! - **Child gate**: a weighted-threshold classifier selecting the child or
//!   adult formula branch
//! - **Age estimators**: deterministic heuristic formulas per branch
//! - **Stabilization**: bounded-history temporal smoothing with a
//!   lock/unlock state machine and identity-change detection
//!
//! The estimate is a cosmetic heuristic with no medical or scientific
//! validity.
//!
//! ## Pipeline
//!
//! 1. An external detector emits one ordered 468-point landmark set per
//!    frame in which it found a face (frames without a face are simply not
//!    delivered)
//! 2. Geometry extraction derives two independent ratio sets from the same
//!    landmarks
//! 3. The child gate picks the formula branch and the branch produces a raw
//!    per-frame record
//! 4. The stabilizer smooths the raw stream into one locked record, while
//!    watching for a sustained disagreement that means the tracked subject
//!    changed
//!
//! ## Quick Start
//!
//! ```rust
//! use apparent_age::{AgePipeline, Landmark, LandmarkSet, FACE_MESH_LEN};
//!
//! // Landmark sets come from an external face-mesh detector; a degenerate
//! // one is enough to show the flow.
//! let frame = LandmarkSet::new(vec![Landmark::new(0.5, 0.5, 0.0); FACE_MESH_LEN]);
//!
//! let mut pipeline = AgePipeline::new();
//! let metrics = pipeline.process(&frame).unwrap();
//! assert!((3..=55).contains(&metrics.estimated_age));
//! ```
//!
//! One pipeline instance serves exactly one subject stream and must be fed
//! frames in arrival order; it is not a shared-across-threads object.

pub mod topology;

mod error;
mod estimator;
mod gate;
mod geometry;
mod pipeline;
mod stabilizer;
mod types;

pub use error::{Error, Result};
pub use estimator::{estimate_adult, estimate_child};
pub use gate::{child_score, is_child, CHILD_SCORE_THRESHOLD};
pub use geometry::{
    jaw_angle_degrees, safe_div, AdultGeometryRatios, ChildGeometryRatios,
};
pub use pipeline::AgePipeline;
pub use stabilizer::{
    LockState, Stabilizer, AGE_TOLERANCE, HISTORY_CAPACITY, LOCK_THRESHOLD, MISMATCH_LIMIT,
};
pub use topology::FACE_MESH_LEN;
pub use types::{Landmark, LandmarkSet, SkinMetrics};
