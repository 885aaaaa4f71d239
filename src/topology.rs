//! Landmark index topology shared with the external face-mesh detector.
//!
//! The detector emits one ordered set of 468 normalized landmarks per frame;
//! every formula in this crate reads fixed positions out of that set. The
//! indices below are a contract with the detector and must never be
//! renumbered. Left/right are in image space (viewer's perspective).

/// Number of landmarks the detector emits per face.
pub const FACE_MESH_LEN: usize = 468;

/// Top of the forehead at the hairline midline.
pub const FOREHEAD_TOP: usize = 10;

/// Chin apex (bottom of the face outline).
pub const CHIN: usize = 152;

/// Leftmost point of the face outline (cheek/temple extreme).
pub const FACE_LEFT: usize = 234;

/// Rightmost point of the face outline.
pub const FACE_RIGHT: usize = 454;

/// Left jaw corner (gonion).
pub const JAW_LEFT: usize = 172;

/// Right jaw corner.
pub const JAW_RIGHT: usize = 397;

/// Left eye, outer corner.
pub const LEFT_EYE_OUTER: usize = 33;

/// Left eye, inner corner.
pub const LEFT_EYE_INNER: usize = 133;

/// Right eye, inner corner.
pub const RIGHT_EYE_INNER: usize = 362;

/// Right eye, outer corner.
pub const RIGHT_EYE_OUTER: usize = 263;

/// Left eye, upper lid midpoint.
pub const LEFT_EYE_UPPER_LID: usize = 159;

/// Left eye, lower lid midpoint.
pub const LEFT_EYE_LOWER_LID: usize = 145;

/// Right eye, upper lid midpoint.
pub const RIGHT_EYE_UPPER_LID: usize = 386;

/// Right eye, lower lid midpoint.
pub const RIGHT_EYE_LOWER_LID: usize = 374;

/// Nose tip.
pub const NOSE_TIP: usize = 1;

/// Nose bridge, between the eyes.
pub const NOSE_BRIDGE: usize = 168;

/// Upper lip, outer margin midline.
pub const UPPER_LIP: usize = 0;

/// Lower lip, outer margin midline.
pub const LOWER_LIP: usize = 17;

/// Left eyebrow, upper midpoint.
pub const LEFT_BROW: usize = 105;

/// Right eyebrow, upper midpoint.
pub const RIGHT_BROW: usize = 334;

/// Six-point band across the forehead, left to right, used for the
/// geometric wrinkle proxy.
pub const FOREHEAD_RING: [usize; 6] = [10, 109, 108, 151, 337, 338];
