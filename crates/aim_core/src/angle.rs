//! Angle arithmetic
//!
//! Yaw/pitch rotations in degrees and the wrap-around helpers every other
//! module relies on.
//!
//! ## Conventions
//! - Yaw 0 looks along +Z, yaw 90 along -X (same handedness as the host world).
//! - Pitch is positive when looking down.
//! - Stored yaw is never wrapped; only *differences* are normalized to
//!   `(-180, 180]`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in world space (blocks / meters).
pub type SpatialPoint = Vector3<f64>;

/// Below this length a look vector has no defined direction.
const DIRECTION_EPS: f64 = 1.0e-5;

/// Viewing orientation (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub const ZERO: Rotation = Rotation { yaw: 0.0, pitch: 0.0 };

    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Shortest signed `(yaw, pitch)` delta that turns `self` into `target`.
    pub fn difference_to(&self, target: &Rotation) -> (f32, f32) {
        (angle_difference(target.yaw, self.yaw), angle_difference(target.pitch, self.pitch))
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(yaw={:.3}, pitch={:.3})", self.yaw, self.pitch)
    }
}

/// A target point together with the rotation that looked at it when it was
/// captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VecRotation {
    pub rotation: Rotation,
    pub vec: SpatialPoint,
}

impl VecRotation {
    pub fn new(rotation: Rotation, vec: SpatialPoint) -> Self {
        Self { rotation, vec }
    }

    /// Capture `point` as seen from `eyes`.
    pub fn towards(point: SpatialPoint, eyes: SpatialPoint) -> Self {
        Self { rotation: make_rotation(point, eyes), vec: point }
    }
}

/// Wrap an angle into `(-180, 180]`.
pub fn wrap_degrees(angle: f32) -> f32 {
    // `%` keeps the sign, so tiny negative angles stay exact
    let wrapped = angle % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Shortest signed difference `a - b`, in `(-180, 180]`.
///
/// E.g. going from 170 to -170 is +20, not -340.
pub fn angle_difference(a: f32, b: f32) -> f32 {
    wrap_degrees(a - b)
}

/// Combined angular distance between two rotations (hypot of both axes).
pub fn rotation_difference(a: &Rotation, b: &Rotation) -> f32 {
    let yaw = angle_difference(a.yaw, b.yaw);
    let pitch = angle_difference(a.pitch, b.pitch);
    yaw.abs().hypot(pitch.abs())
}

/// Rotation that looks from `eyes` at `point`.
///
/// A point sitting exactly at the eyes has no direction; `Rotation::ZERO` is
/// returned.
pub fn make_rotation(point: SpatialPoint, eyes: SpatialPoint) -> Rotation {
    let diff = point - eyes;
    let horizontal = diff.x.hypot(diff.z);

    if horizontal <= DIRECTION_EPS && diff.y.abs() <= DIRECTION_EPS {
        return Rotation::ZERO;
    }

    let yaw = diff.z.atan2(diff.x).to_degrees() - 90.0;
    let pitch = -diff.y.atan2(horizontal).to_degrees();

    Rotation::new(wrap_degrees(yaw as f32), wrap_degrees(pitch as f32))
}
